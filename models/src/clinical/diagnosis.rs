// models/src/clinical/diagnosis.rs

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clinical::enums::Severity;
use crate::errors::RepoResult;
use crate::rows::Row;
use crate::{schema, ToVertex, Vertex};

/// A diagnosis derived from one observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub diagnosis_id: String,
    pub severity: Severity,
    pub details: String,
}

impl Diagnosis {
    pub fn from_row(row: &Row) -> RepoResult<Self> {
        Ok(Diagnosis {
            diagnosis_id: row.get_str("diagnosisID")?.to_string(),
            severity: Severity::from_str(row.get_str("severity")?)?,
            details: row.get_str("details")?.to_string(),
        })
    }
}

impl ToVertex for Diagnosis {
    fn to_vertex(&self) -> Vertex {
        Vertex::new(schema::DIAGNOSIS.clone())
            .with_property("diagnosisID", self.diagnosis_id.as_str())
            .with_property("severity", self.severity.label())
            .with_property("details", self.details.as_str())
    }
}
