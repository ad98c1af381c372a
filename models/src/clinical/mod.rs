// models/src/clinical/mod.rs
//! The clinical entity model: immutable-identity records for the nodes of
//! the encounter graph, plus the read projections assembled from it.

pub mod appointment;
pub mod attachment;
pub mod clinic;
pub mod department;
pub mod diagnosis;
pub mod doctor;
pub mod enums;
pub mod note;
pub mod observation;
pub mod patient;
pub mod projections;

pub use appointment::Appointment;
pub use attachment::Attachment;
pub use clinic::Clinic;
pub use department::Department;
pub use diagnosis::Diagnosis;
pub use doctor::Doctor;
pub use enums::{Severity, Sex};
pub use note::{Note, NoteTarget};
pub use observation::Observation;
pub use patient::Patient;
pub use projections::{
    AppointmentWithDetails, CascadeImpact, CascadeOutcome, DepartmentWithDoctors,
    DiagnosisWithContext, ObservationWithContext, PatientWithDoctor,
};
