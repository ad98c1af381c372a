// models/src/clinical/clinic.rs

use serde::{Deserialize, Serialize};

use crate::errors::RepoResult;
use crate::rows::Row;
use crate::{schema, ToVertex, Vertex};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    pub clinic_id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Clinic {
    pub fn from_row(row: &Row) -> RepoResult<Self> {
        Ok(Clinic {
            clinic_id: row.get_str("clinicID")?.to_string(),
            name: row.get_str("name")?.to_string(),
            address: row.get_str("address")?.to_string(),
            phone: row.get_str("phone")?.to_string(),
        })
    }
}

impl ToVertex for Clinic {
    fn to_vertex(&self) -> Vertex {
        Vertex::new(schema::CLINIC.clone())
            .with_property("clinicID", self.clinic_id.as_str())
            .with_property("name", self.name.as_str())
            .with_property("address", self.address.as_str())
            .with_property("phone", self.phone.as_str())
    }
}
