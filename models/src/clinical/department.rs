// models/src/clinical/department.rs

use serde::{Deserialize, Serialize};

use crate::errors::RepoResult;
use crate::rows::Row;
use crate::{schema, ToVertex, Vertex};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub department_id: String,
    pub name: String,
}

impl Department {
    pub fn from_row(row: &Row) -> RepoResult<Self> {
        Ok(Department {
            department_id: row.get_str("departmentID")?.to_string(),
            name: row.get_str("name")?.to_string(),
        })
    }
}

impl ToVertex for Department {
    fn to_vertex(&self) -> Vertex {
        Vertex::new(schema::DEPARTMENT.clone())
            .with_property("departmentID", self.department_id.as_str())
            .with_property("name", self.name.as_str())
    }
}
