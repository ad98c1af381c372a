// lib/src/provision.rs
//! Roster provisioning: creates a Clinic → Department → Doctor chain so a
//! fresh store has somewhere to register patients. Nodes that already
//! exist are reused; ownership edges are only created alongside a new
//! node, so repeated seeding is idempotent.

use tracing::info;

use models::clinical::{Clinic, Department, Doctor};
use models::errors::RepoResult;
use models::{schema, ToVertex};

use crate::store::GraphStore;

pub async fn seed_roster(
    store: &dyn GraphStore,
    clinic: &Clinic,
    department: &Department,
    doctor: &Doctor,
) -> RepoResult<()> {
    let mut session = store.session().await?;

    let clinic_id = match session
        .find_by_key(&schema::CLINIC, "clinicID", &clinic.clinic_id)
        .await?
    {
        Some(row) => row.node_id()?,
        None => session.create_node(clinic.to_vertex()).await?,
    };

    let department_id = match session
        .find_by_key(&schema::DEPARTMENT, "departmentID", &department.department_id)
        .await?
    {
        Some(row) => row.node_id()?,
        None => {
            let id = session.create_node(department.to_vertex()).await?;
            session.create_edge(id, &schema::IN_CLINIC, clinic_id).await?;
            id
        }
    };

    if session
        .find_by_key(&schema::DOCTOR, "doctorID", &doctor.doctor_id)
        .await?
        .is_none()
    {
        let id = session.create_node(doctor.to_vertex()).await?;
        session.create_edge(id, &schema::WORKS_IN, department_id).await?;
        info!(
            doctor = %doctor.doctor_id,
            department = %department.department_id,
            clinic = %clinic.clinic_id,
            "Seeded roster chain"
        );
    }

    Ok(())
}
