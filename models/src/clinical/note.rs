// models/src/clinical/note.rs

use serde::{Deserialize, Serialize};

use crate::errors::RepoResult;
use crate::identifiers::Identifier;
use crate::rows::Row;
use crate::{schema, ToVertex, Vertex};

/// A free-text annotation authored by a doctor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub note_id: String,
    pub description: String,
}

impl Note {
    pub fn from_row(row: &Row) -> RepoResult<Self> {
        Ok(Note {
            note_id: row.get_str("noteID")?.to_string(),
            description: row.get_str("description")?.to_string(),
        })
    }
}

impl ToVertex for Note {
    fn to_vertex(&self) -> Vertex {
        Vertex::new(schema::NOTE.clone())
            .with_property("noteID", self.note_id.as_str())
            .with_property("description", self.description.as_str())
    }
}

/// The single subject a note is about. The tag selects which ABOUT_* edge
/// is created, and resolution later is a match instead of null-probing
/// three candidate fields.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum NoteTarget {
    Appointment(String),
    Observation(String),
    Diagnosis(String),
}

impl NoteTarget {
    /// The identity key of the target node.
    pub fn target_id(&self) -> &str {
        match self {
            NoteTarget::Appointment(id) | NoteTarget::Observation(id) | NoteTarget::Diagnosis(id) => {
                id
            }
        }
    }

    /// Label of the target node.
    pub fn label(&self) -> &'static Identifier {
        match self {
            NoteTarget::Appointment(_) => &schema::APPOINTMENT,
            NoteTarget::Observation(_) => &schema::OBSERVATION,
            NoteTarget::Diagnosis(_) => &schema::DIAGNOSIS,
        }
    }

    /// Identity property name on the target node.
    pub fn key_property(&self) -> &'static str {
        match self {
            NoteTarget::Appointment(_) => "appointmentID",
            NoteTarget::Observation(_) => "observationID",
            NoteTarget::Diagnosis(_) => "diagnosisID",
        }
    }

    /// The ABOUT_* edge type this target selects.
    pub fn edge_type(&self) -> &'static Identifier {
        match self {
            NoteTarget::Appointment(_) => &schema::ABOUT_APPOINTMENT,
            NoteTarget::Observation(_) => &schema::ABOUT_OBSERVATION,
            NoteTarget::Diagnosis(_) => &schema::ABOUT_DIAGNOSIS,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NoteTarget::Appointment(_) => "appointment",
            NoteTarget::Observation(_) => "observation",
            NoteTarget::Diagnosis(_) => "diagnosis",
        }
    }
}
