// lib/src/repos/mod.rs
//! The repository layer: one repository per primary entity type, each
//! owning the relationships rooted at that type. Repositories never call
//! each other; every operation opens one store session, validates, reads,
//! and writes inside it, and releases it on every exit path.

pub mod appointment;
pub mod department;
pub mod diagnosis;
pub mod doctor;
pub mod note;
pub mod observation;
pub mod patient;

mod support;

pub use appointment::AppointmentRepository;
pub use department::DepartmentRepository;
pub use diagnosis::DiagnosisRepository;
pub use doctor::DoctorRepository;
pub use note::NoteRepository;
pub use observation::ObservationRepository;
pub use patient::PatientRepository;
