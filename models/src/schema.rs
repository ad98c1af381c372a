// models/src/schema.rs
//! Interned labels and edge types of the clinical graph schema.

use once_cell::sync::Lazy;

use crate::identifiers::Identifier;

fn ident(value: &str) -> Identifier {
    Identifier::new(value).expect("schema identifier is valid")
}

// Node labels.
pub static CLINIC: Lazy<Identifier> = Lazy::new(|| ident("Clinic"));
pub static DEPARTMENT: Lazy<Identifier> = Lazy::new(|| ident("Department"));
pub static DOCTOR: Lazy<Identifier> = Lazy::new(|| ident("Doctor"));
pub static PATIENT: Lazy<Identifier> = Lazy::new(|| ident("Patient"));
pub static APPOINTMENT: Lazy<Identifier> = Lazy::new(|| ident("Appointment"));
pub static OBSERVATION: Lazy<Identifier> = Lazy::new(|| ident("Observation"));
pub static DIAGNOSIS: Lazy<Identifier> = Lazy::new(|| ident("Diagnosis"));
pub static NOTE: Lazy<Identifier> = Lazy::new(|| ident("Note"));
pub static ATTACHMENT: Lazy<Identifier> = Lazy::new(|| ident("Attachment"));

// Edge types.
pub static IN_CLINIC: Lazy<Identifier> = Lazy::new(|| ident("IN_CLINIC"));
pub static WORKS_IN: Lazy<Identifier> = Lazy::new(|| ident("WORKS_IN"));
pub static HAS_PRIMARY_DOCTOR: Lazy<Identifier> = Lazy::new(|| ident("HAS_PRIMARY_DOCTOR"));
pub static REGISTERED_AT: Lazy<Identifier> = Lazy::new(|| ident("REGISTERED_AT"));
pub static FOR_PATIENT: Lazy<Identifier> = Lazy::new(|| ident("FOR_PATIENT"));
pub static WITH_DOCTOR: Lazy<Identifier> = Lazy::new(|| ident("WITH_DOCTOR"));
pub static HAS_OBSERVATION: Lazy<Identifier> = Lazy::new(|| ident("HAS_OBSERVATION"));
pub static HAS_DIAGNOSIS: Lazy<Identifier> = Lazy::new(|| ident("HAS_DIAGNOSIS"));
pub static AUTHORED_BY: Lazy<Identifier> = Lazy::new(|| ident("AUTHORED_BY"));
pub static ABOUT_APPOINTMENT: Lazy<Identifier> = Lazy::new(|| ident("ABOUT_APPOINTMENT"));
pub static ABOUT_OBSERVATION: Lazy<Identifier> = Lazy::new(|| ident("ABOUT_OBSERVATION"));
pub static ABOUT_DIAGNOSIS: Lazy<Identifier> = Lazy::new(|| ident("ABOUT_DIAGNOSIS"));
pub static ATTACHED_TO: Lazy<Identifier> = Lazy::new(|| ident("ATTACHED_TO"));
