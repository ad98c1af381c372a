// models/src/clinical/doctor.rs

use serde::{Deserialize, Serialize};

use crate::errors::RepoResult;
use crate::rows::Row;
use crate::{schema, ToVertex, Vertex};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl Doctor {
    pub fn from_row(row: &Row) -> RepoResult<Self> {
        Ok(Doctor {
            doctor_id: row.get_str("doctorID")?.to_string(),
            first_name: row.get_str("firstName")?.to_string(),
            last_name: row.get_str("lastName")?.to_string(),
            phone_number: row.get_str("phoneNumber")?.to_string(),
        })
    }
}

impl ToVertex for Doctor {
    fn to_vertex(&self) -> Vertex {
        Vertex::new(schema::DOCTOR.clone())
            .with_property("doctorID", self.doctor_id.as_str())
            .with_property("firstName", self.first_name.as_str())
            .with_property("lastName", self.last_name.as_str())
            .with_property("phoneNumber", self.phone_number.as_str())
    }
}
