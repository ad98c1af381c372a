// lib/src/repos/doctor.rs
//! Doctor repository: read-only lookups. Unlike the list operations
//! elsewhere, these are true lookups and fail with `NotFound` when no
//! row matches.

use std::sync::Arc;

use models::clinical::{Clinic, Department, Doctor};
use models::errors::{RepoError, RepoResult};
use models::schema;

use crate::repos::support;
use crate::store::{Filter, GraphStore};
use crate::util::require_non_blank;

pub struct DoctorRepository {
    store: Arc<dyn GraphStore>,
}

impl DoctorRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        DoctorRepository { store }
    }

    pub async fn find_by_id(&self, doctor_id: &str) -> RepoResult<Doctor> {
        require_non_blank("doctorID", doctor_id)?;
        let mut session = self.store.session().await?;
        let row = support::doctor_row(session.as_mut(), doctor_id).await?;
        Doctor::from_row(&row)
    }

    /// Exact match on both names; `NotFound` when nobody matches.
    pub async fn search_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Vec<Doctor>> {
        require_non_blank("firstName", first_name)?;
        require_non_blank("lastName", last_name)?;

        let mut session = self.store.session().await?;
        let rows = session
            .match_nodes(
                &schema::DOCTOR,
                &[
                    Filter::PropEq("firstName".to_string(), first_name.into()),
                    Filter::PropEq("lastName".to_string(), last_name.into()),
                ],
            )
            .await?;
        if rows.is_empty() {
            return Err(RepoError::not_found(format!(
                "doctor named {first_name} {last_name}"
            )));
        }
        let mut doctors: Vec<Doctor> =
            rows.iter().map(Doctor::from_row).collect::<RepoResult<_>>()?;
        doctors.sort_by(|a, b| a.doctor_id.cmp(&b.doctor_id));
        Ok(doctors)
    }

    /// The clinic containing the doctor, resolved through the
    /// WORKS_IN → IN_CLINIC chain.
    pub async fn clinic_id(&self, doctor_id: &str) -> RepoResult<String> {
        require_non_blank("doctorID", doctor_id)?;
        let mut session = self.store.session().await?;
        let (_doctor, _department, clinic) =
            support::doctor_chain(session.as_mut(), doctor_id).await?;
        Ok(clinic.get_str("clinicID")?.to_string())
    }

    /// Doctor + department + clinic rendered as one line block.
    pub async fn profile(&self, doctor_id: &str) -> RepoResult<String> {
        require_non_blank("doctorID", doctor_id)?;
        let mut session = self.store.session().await?;
        let (doctor_row, department_row, clinic_row) =
            support::doctor_chain(session.as_mut(), doctor_id).await?;
        let doctor = Doctor::from_row(&doctor_row)?;
        let department = Department::from_row(&department_row)?;
        let clinic = Clinic::from_row(&clinic_row)?;

        Ok(format!(
            "Dr. {} {} ({})\nPhone: {}\nDepartment: {}, Clinic: {}",
            doctor.first_name,
            doctor.last_name,
            doctor.doctor_id,
            doctor.phone_number,
            department.name,
            clinic.name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraphStore;
    use crate::provision::seed_roster;
    use models::clinical::Clinic;

    async fn seeded_store() -> Arc<dyn GraphStore> {
        let store: Arc<dyn GraphStore> = Arc::new(MemoryGraphStore::new());
        seed_roster(
            store.as_ref(),
            &Clinic {
                clinic_id: "CL01".to_string(),
                name: "Central Clinic".to_string(),
                address: "1 Main St".to_string(),
                phone: "555-0100".to_string(),
            },
            &Department {
                department_id: "DPT1".to_string(),
                name: "Cardiology".to_string(),
            },
            &Doctor {
                doctor_id: "DR01".to_string(),
                first_name: "Anna".to_string(),
                last_name: "Berg".to_string(),
                phone_number: "555-0110".to_string(),
            },
        )
        .await
        .unwrap();
        store
    }

    #[tokio::test]
    async fn should_find_doctor_by_id() {
        let store = seeded_store().await;
        let repo = DoctorRepository::new(store);

        let doctor = repo.find_by_id("DR01").await.unwrap();
        assert_eq!(doctor.last_name, "Berg");
        assert!(matches!(
            repo.find_by_id("DR99").await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn should_search_by_exact_name() {
        let store = seeded_store().await;
        let repo = DoctorRepository::new(store);

        let hits = repo.search_by_name("Anna", "Berg").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doctor_id, "DR01");

        // Exact match only; no match is NotFound, not an empty list.
        assert!(matches!(
            repo.search_by_name("anna", "berg").await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn should_resolve_clinic_through_department_chain() {
        let store = seeded_store().await;
        let repo = DoctorRepository::new(store);

        assert_eq!(repo.clinic_id("DR01").await.unwrap(), "CL01");

        let profile = repo.profile("DR01").await.unwrap();
        assert!(profile.contains("Dr. Anna Berg (DR01)"));
        assert!(profile.contains("Cardiology"));
        assert!(profile.contains("Central Clinic"));
    }
}
