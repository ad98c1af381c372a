// models/src/clinical/observation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RepoResult;
use crate::rows::Row;
use crate::{schema, ToVertex, Vertex};

/// A clinical finding recorded during an appointment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub observation_id: String,
    pub observed_at: DateTime<Utc>,
    pub text: String,
}

impl Observation {
    pub fn from_row(row: &Row) -> RepoResult<Self> {
        Ok(Observation {
            observation_id: row.get_str("observationID")?.to_string(),
            observed_at: row.get_timestamp("observedAt")?,
            text: row.get_str("text")?.to_string(),
        })
    }
}

impl ToVertex for Observation {
    fn to_vertex(&self) -> Vertex {
        Vertex::new(schema::OBSERVATION.clone())
            .with_property("observationID", self.observation_id.as_str())
            .with_property("observedAt", self.observed_at)
            .with_property("text", self.text.as_str())
    }
}
