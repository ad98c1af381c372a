// models/src/clinical/patient.rs

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clinical::enums::Sex;
use crate::errors::RepoResult;
use crate::rows::Row;
use crate::{schema, ToVertex, Vertex};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Personal number; the immutable identity key of the patient node.
    pub patient_pn: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub phone_number: String,
}

impl Patient {
    pub fn from_row(row: &Row) -> RepoResult<Self> {
        Ok(Patient {
            patient_pn: row.get_str("patientPN")?.to_string(),
            first_name: row.get_str("firstName")?.to_string(),
            last_name: row.get_str("lastName")?.to_string(),
            sex: Sex::from_str(row.get_str("sex")?)?,
            phone_number: row.get_str("phoneNumber")?.to_string(),
        })
    }
}

impl ToVertex for Patient {
    fn to_vertex(&self) -> Vertex {
        Vertex::new(schema::PATIENT.clone())
            .with_property("patientPN", self.patient_pn.as_str())
            .with_property("firstName", self.first_name.as_str())
            .with_property("lastName", self.last_name.as_str())
            .with_property("sex", self.sex.label())
            .with_property("phoneNumber", self.phone_number.as_str())
    }
}
