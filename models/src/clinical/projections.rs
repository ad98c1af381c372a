// models/src/clinical/projections.rs
//! Read-only projections: fields gathered by traversing several
//! relationships and returned as one record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clinical::{Appointment, Diagnosis, Doctor, Observation, Patient};

/// A patient joined with their primary doctor and registering clinic.
/// The doctor chain is optional: a patient may momentarily lack one while
/// being re-registered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientWithDoctor {
    pub patient: Patient,
    pub doctor: Option<Doctor>,
    pub clinic_name: Option<String>,
}

/// An appointment joined with its patient and doctor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppointmentWithDetails {
    pub appointment: Appointment,
    pub patient: Patient,
    pub doctor: Doctor,
}

/// An observation with the appointment context it was recorded in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationWithContext {
    pub observation: Observation,
    pub patient: Patient,
    pub doctor: Doctor,
    pub appointment_id: String,
}

/// A diagnosis with its full upward context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisWithContext {
    pub diagnosis: Diagnosis,
    pub patient: Patient,
    pub doctor: Doctor,
    pub appointment_id: String,
    pub appointment_starts: DateTime<Utc>,
    pub observation_id: String,
    pub observation_text: String,
}

/// One department of a clinic with its doctor roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentWithDoctors {
    pub clinic_id: String,
    pub department_id: String,
    pub department_name: String,
    pub doctors: Vec<Doctor>,
}

/// What a cascading patient delete would remove (preview) or removed
/// (confirmed): counts per entity kind reachable from the patient.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CascadeImpact {
    pub patient_pn: String,
    pub first_name: String,
    pub last_name: String,
    pub appointments: usize,
    pub observations: usize,
    pub diagnoses: usize,
    pub notes: usize,
    pub attachments: usize,
}

impl CascadeImpact {
    pub fn related_total(&self) -> usize {
        self.appointments + self.observations + self.diagnoses + self.notes + self.attachments
    }

    /// Human-readable warning shown before a confirmed delete.
    pub fn preview_text(&self) -> String {
        format!(
            "WARNING: deleting {} {} (PN: {})\n\nWill cascade delete:\n  \
             {} appointment(s)\n  {} observation(s)\n  {} diagnosis(es)\n  \
             {} note(s)\n  {} attachment(s)\n\nCall again with confirmed=true to proceed",
            self.first_name,
            self.last_name,
            self.patient_pn,
            self.appointments,
            self.observations,
            self.diagnoses,
            self.notes,
            self.attachments,
        )
    }

    /// Human-readable summary after a confirmed delete.
    pub fn summary_text(&self) -> String {
        format!(
            "Deleted {} {} (PN: {}) and {} related record(s)",
            self.first_name,
            self.last_name,
            self.patient_pn,
            self.related_total(),
        )
    }
}

/// Outcome of the two-phase patient delete.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CascadeOutcome {
    /// Computed impact only; nothing was mutated.
    Preview(CascadeImpact),
    /// The cascade was applied; the impact records what was removed.
    Deleted(CascadeImpact),
}

impl CascadeOutcome {
    pub fn impact(&self) -> &CascadeImpact {
        match self {
            CascadeOutcome::Preview(impact) | CascadeOutcome::Deleted(impact) => impact,
        }
    }

    pub fn render(&self) -> String {
        match self {
            CascadeOutcome::Preview(impact) => impact.preview_text(),
            CascadeOutcome::Deleted(impact) => impact.summary_text(),
        }
    }
}
