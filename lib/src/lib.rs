// lib/src/lib.rs
//! Clinical graph data layer: repositories over a property-graph store.
//!
//! The store seam is [`store::GraphStore`]; [`memory::MemoryGraphStore`]
//! is the bundled in-memory engine. Each repository owns the relationships
//! rooted at its primary entity type and never calls another repository.

pub mod config;
pub mod engine;
pub mod identity;
pub mod memory;
pub mod provision;
pub mod repos;
pub mod store;
pub mod util;

// Explicit re-exports.
pub use config::{open_store, StoreConfig, StoreEngineKind};
pub use identity::{GraphIdentityResolver, IdentityResolver, ParticipantRef};
pub use memory::MemoryGraphStore;
pub use repos::{
    AppointmentRepository, DepartmentRepository, DiagnosisRepository, DoctorRepository,
    NoteRepository, ObservationRepository, PatientRepository,
};
pub use store::{Filter, GraphSession, GraphStore};
