// lib/src/identity.rs
//! Display-identity resolution for the external messaging collaborator.
//! The messaging store addresses people by stable references; this seam
//! turns such a reference into a human-readable name.

use std::sync::Arc;

use async_trait::async_trait;

use models::clinical::{Doctor, Patient};
use models::errors::{RepoError, RepoResult};
use models::schema;

use crate::store::GraphStore;

/// A stable reference to a messaging participant. Receptionists are not
/// graph nodes; they exist only in the authentication collaborator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParticipantRef {
    Doctor(String),
    Patient(String),
    Receptionist(String),
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn display_name(&self, participant: &ParticipantRef) -> RepoResult<String>;
}

/// Resolves doctors and patients against the clinical graph.
pub struct GraphIdentityResolver {
    store: Arc<dyn GraphStore>,
}

impl GraphIdentityResolver {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        GraphIdentityResolver { store }
    }
}

#[async_trait]
impl IdentityResolver for GraphIdentityResolver {
    async fn display_name(&self, participant: &ParticipantRef) -> RepoResult<String> {
        let mut session = self.store.session().await?;
        match participant {
            ParticipantRef::Doctor(doctor_id) => {
                let row = session
                    .find_by_key(&schema::DOCTOR, "doctorID", doctor_id)
                    .await?
                    .ok_or_else(|| RepoError::not_found(format!("doctor {doctor_id}")))?;
                let doctor = Doctor::from_row(&row)?;
                Ok(format!("Dr. {} {}", doctor.first_name, doctor.last_name))
            }
            ParticipantRef::Patient(patient_pn) => {
                let row = session
                    .find_by_key(&schema::PATIENT, "patientPN", patient_pn)
                    .await?
                    .ok_or_else(|| RepoError::not_found(format!("patient {patient_pn}")))?;
                let patient = Patient::from_row(&row)?;
                Ok(format!("{} {}", patient.first_name, patient.last_name))
            }
            ParticipantRef::Receptionist(id) => Ok(format!("Receptionist {id}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraphStore;
    use crate::provision::seed_roster;
    use models::clinical::{Clinic, Department};

    #[tokio::test]
    async fn should_resolve_display_names() {
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

        let resolver = GraphIdentityResolver::new(store);
        assert_eq!(
            resolver
                .display_name(&ParticipantRef::Doctor("DR01".to_string()))
                .await
                .unwrap(),
            "Dr. Anna Berg"
        );
        assert_eq!(
            resolver
                .display_name(&ParticipantRef::Receptionist("RC01".to_string()))
                .await
                .unwrap(),
            "Receptionist RC01"
        );
        assert!(matches!(
            resolver
                .display_name(&ParticipantRef::Patient("PN99".to_string()))
                .await,
            Err(RepoError::NotFound(_))
        ));
    }
}
