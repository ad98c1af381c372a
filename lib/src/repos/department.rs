// lib/src/repos/department.rs
//! Department repository: read-only clinic rosters.

use std::sync::Arc;

use models::clinical::{Department, DepartmentWithDoctors, Doctor};
use models::errors::RepoResult;
use models::rows::Row;
use models::schema;

use crate::repos::support;
use crate::store::GraphStore;
use crate::util::require_non_blank;

pub struct DepartmentRepository {
    store: Arc<dyn GraphStore>,
}

impl DepartmentRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        DepartmentRepository { store }
    }

    /// Doctors of a clinic grouped by department. Departments come back
    /// in first-seen order (the order their IN_CLINIC edges were created);
    /// each roster is ordered by last name.
    pub async fn list_by_clinic(&self, clinic_id: &str) -> RepoResult<Vec<DepartmentWithDoctors>> {
        require_non_blank("clinicID", clinic_id)?;
        let mut session = self.store.session().await?;
        let clinic = support::clinic_row(session.as_mut(), clinic_id).await?;

        let department_rows: Vec<Row> = session
            .in_neighbors(clinic.node_id()?, &schema::IN_CLINIC, &[])
            .await?
            .into_iter()
            .collect();

        let mut results = Vec::with_capacity(department_rows.len());
        for department_row in &department_rows {
            let department = Department::from_row(department_row)?;
            let mut doctors: Vec<Doctor> = session
                .in_neighbors(department_row.node_id()?, &schema::WORKS_IN, &[])
                .await?
                .iter()
                .map(Doctor::from_row)
                .collect::<RepoResult<_>>()?;
            doctors.sort_by(|a, b| {
                (&a.last_name, &a.first_name, &a.doctor_id).cmp(&(
                    &b.last_name,
                    &b.first_name,
                    &b.doctor_id,
                ))
            });
            results.push(DepartmentWithDoctors {
                clinic_id: clinic_id.to_string(),
                department_id: department.department_id,
                department_name: department.name,
                doctors,
            });
        }
        Ok(results)
    }
}
