// models/src/clinical/appointment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RepoResult;
use crate::rows::Row;
use crate::{schema, ToVertex, Vertex};

/// A scheduled encounter between one patient and one doctor.
///
/// The `[starts, ends)` interval is half-open; per doctor no two intervals
/// may overlap, and `ends` is strictly after `starts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: String,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub reason: String,
}

impl Appointment {
    pub fn from_row(row: &Row) -> RepoResult<Self> {
        Ok(Appointment {
            appointment_id: row.get_str("appointmentID")?.to_string(),
            starts: row.get_timestamp("starts")?,
            ends: row.get_timestamp("ends")?,
            reason: row.get_str("reason")?.to_string(),
        })
    }

    /// Half-open interval intersection test against another interval.
    pub fn overlaps(&self, starts: DateTime<Utc>, ends: DateTime<Utc>) -> bool {
        self.starts < ends && self.ends > starts
    }
}

impl ToVertex for Appointment {
    fn to_vertex(&self) -> Vertex {
        Vertex::new(schema::APPOINTMENT.clone())
            .with_property("appointmentID", self.appointment_id.as_str())
            .with_property("starts", self.starts)
            .with_property("ends", self.ends)
            .with_property("reason", self.reason.as_str())
    }
}
