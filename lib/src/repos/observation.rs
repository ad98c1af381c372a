// lib/src/repos/observation.rs
//! Observation repository: clinical findings owned by one appointment.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use models::clinical::{Appointment, Doctor, Observation, ObservationWithContext, Patient};
use models::errors::{RepoError, RepoResult};
use models::{schema, PropertyValue, ToVertex};

use crate::repos::support;
use crate::store::GraphStore;
use crate::util::require_non_blank;

pub struct ObservationRepository {
    store: Arc<dyn GraphStore>,
}

impl ObservationRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        ObservationRepository { store }
    }

    /// Creates the observation under its appointment via HAS_OBSERVATION.
    /// The parent must exist first.
    pub async fn create(
        &self,
        observation: Observation,
        appointment_id: &str,
    ) -> RepoResult<Observation> {
        require_non_blank("observationID", &observation.observation_id)?;
        require_non_blank("text", &observation.text)?;
        require_non_blank("appointmentID", appointment_id)?;

        let mut session = self.store.session().await?;
        let appointment = support::appointment_row(session.as_mut(), appointment_id).await?;
        let observation_node = session.create_node(observation.to_vertex()).await?;
        session
            .create_edge(
                appointment.node_id()?,
                &schema::HAS_OBSERVATION,
                observation_node,
            )
            .await?;

        info!(
            observation = %observation.observation_id,
            appointment = %appointment_id,
            "Created observation"
        );
        Ok(observation)
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update(
        &self,
        observation_id: &str,
        observed_at: Option<DateTime<Utc>>,
        text: Option<&str>,
    ) -> RepoResult<Observation> {
        require_non_blank("observationID", observation_id)?;
        if observed_at.is_none() && text.is_none() {
            return Err(RepoError::invalid("update requires at least one field"));
        }
        if let Some(text) = text {
            require_non_blank("text", text)?;
        }

        let mut session = self.store.session().await?;
        let row = support::observation_row(session.as_mut(), observation_id).await?;

        let mut props: Vec<(String, PropertyValue)> = Vec::new();
        if let Some(observed_at) = observed_at {
            props.push(("observedAt".to_string(), observed_at.into()));
        }
        if let Some(text) = text {
            props.push(("text".to_string(), text.into()));
        }
        session.set_properties(row.node_id()?, props).await?;

        let row = support::observation_row(session.as_mut(), observation_id).await?;
        Observation::from_row(&row)
    }

    pub async fn delete(&self, observation_id: &str) -> RepoResult<()> {
        require_non_blank("observationID", observation_id)?;
        let mut session = self.store.session().await?;
        let row = support::observation_row(session.as_mut(), observation_id).await?;
        session.detach_delete(&[row.node_id()?]).await?;
        info!(observation = %observation_id, "Deleted observation");
        Ok(())
    }

    /// Every observation recorded for the patient, with the appointment
    /// and doctor context, ordered by observation time.
    pub async fn list_by_patient(
        &self,
        patient_pn: &str,
    ) -> RepoResult<Vec<ObservationWithContext>> {
        require_non_blank("patientPN", patient_pn)?;
        let mut session = self.store.session().await?;
        let patient_row = support::patient_row(session.as_mut(), patient_pn).await?;
        let patient = Patient::from_row(&patient_row)?;

        let mut results = Vec::new();
        let appointments = session
            .in_neighbors(patient_row.node_id()?, &schema::FOR_PATIENT, &[])
            .await?;
        for appointment_row in &appointments {
            let appointment = Appointment::from_row(appointment_row)?;
            let doctor_row = session
                .out_neighbors(appointment_row.node_id()?, &schema::WITH_DOCTOR, &[])
                .await?
                .single(format!(
                    "doctor of appointment {}",
                    appointment.appointment_id
                ))?;
            let doctor = Doctor::from_row(&doctor_row)?;

            let observations = session
                .out_neighbors(appointment_row.node_id()?, &schema::HAS_OBSERVATION, &[])
                .await?;
            for observation_row in &observations {
                results.push(ObservationWithContext {
                    observation: Observation::from_row(observation_row)?,
                    patient: patient.clone(),
                    doctor: doctor.clone(),
                    appointment_id: appointment.appointment_id.clone(),
                });
            }
        }
        results.sort_by(|a, b| {
            (a.observation.observed_at, &a.observation.observation_id)
                .cmp(&(b.observation.observed_at, &b.observation.observation_id))
        });
        Ok(results)
    }

    /// Observation + owning appointment + patient + doctor rendered as
    /// one block.
    pub async fn details(&self, observation_id: &str) -> RepoResult<String> {
        require_non_blank("observationID", observation_id)?;
        let mut session = self.store.session().await?;
        let row = support::observation_row(session.as_mut(), observation_id).await?;
        let observation = Observation::from_row(&row)?;

        let appointment_row = session
            .in_neighbors(row.node_id()?, &schema::HAS_OBSERVATION, &[])
            .await?
            .single(format!("appointment of observation {observation_id}"))?;
        let appointment = Appointment::from_row(&appointment_row)?;
        let patient_row = session
            .out_neighbors(appointment_row.node_id()?, &schema::FOR_PATIENT, &[])
            .await?
            .single(format!(
                "patient of appointment {}",
                appointment.appointment_id
            ))?;
        let patient = Patient::from_row(&patient_row)?;
        let doctor_row = session
            .out_neighbors(appointment_row.node_id()?, &schema::WITH_DOCTOR, &[])
            .await?
            .single(format!(
                "doctor of appointment {}",
                appointment.appointment_id
            ))?;
        let doctor = Doctor::from_row(&doctor_row)?;

        Ok(format!(
            "Observation {} at {}\n{}\nAppointment: {} ({})\n\
             Patient: {} {} (PN: {})\nDoctor: Dr. {} {} ({})",
            observation.observation_id,
            observation.observed_at.format("%Y-%m-%d %H:%M"),
            observation.text,
            appointment.appointment_id,
            appointment.starts.format("%Y-%m-%d %H:%M"),
            patient.first_name,
            patient.last_name,
            patient.patient_pn,
            doctor.first_name,
            doctor.last_name,
            doctor.doctor_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraphStore;
    use crate::provision::seed_roster;
    use crate::repos::{AppointmentRepository, PatientRepository};
    use chrono::TimeZone;
    use models::clinical::{Clinic, Department, Sex};

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

        PatientRepository::new(Arc::clone(&store))
            .create(
                Patient {
                    patient_pn: "PN01".to_string(),
                    first_name: "Astrid".to_string(),
                    last_name: "Lind".to_string(),
                    sex: Sex::Female,
                    phone_number: "555-0101".to_string(),
                },
                "DR01",
            )
            .await
            .unwrap();
        AppointmentRepository::new(Arc::clone(&store))
            .create(
                Appointment {
                    appointment_id: "AP01".to_string(),
                    starts: Utc.with_ymd_and_hms(2030, 3, 1, 10, 0, 0).unwrap(),
                    ends: Utc.with_ymd_and_hms(2030, 3, 1, 10, 30, 0).unwrap(),
                    reason: "checkup".to_string(),
                },
                "PN01",
                "DR01",
            )
            .await
            .unwrap();
        store
    }

    fn observation(id: &str, text: &str) -> Observation {
        Observation {
            observation_id: id.to_string(),
            observed_at: Utc.with_ymd_and_hms(2030, 3, 1, 10, 10, 0).unwrap(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn should_require_existing_appointment() {
        let store = seeded_store().await;
        let repo = ObservationRepository::new(store);

        let err = repo
            .create(observation("OB01", "elevated pulse"), "AP99")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_create_update_and_list_with_context() {
        let store = seeded_store().await;
        let repo = ObservationRepository::new(store);

        repo.create(observation("OB01", "elevated pulse"), "AP01")
            .await
            .unwrap();
        let updated = repo
            .update("OB01", None, Some("pulse back to normal"))
            .await
            .unwrap();
        assert_eq!(updated.text, "pulse back to normal");

        let listed = repo.list_by_patient("PN01").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].appointment_id, "AP01");
        assert_eq!(listed[0].doctor.doctor_id, "DR01");
        assert_eq!(listed[0].observation.text, "pulse back to normal");
    }

    #[tokio::test]
    async fn should_render_details_and_delete() {
        let store = seeded_store().await;
        let repo = ObservationRepository::new(store);
        repo.create(observation("OB01", "elevated pulse"), "AP01")
            .await
            .unwrap();

        let details = repo.details("OB01").await.unwrap();
        assert!(details.contains("Observation OB01"));
        assert!(details.contains("elevated pulse"));
        assert!(details.contains("Appointment: AP01"));

        repo.delete("OB01").await.unwrap();
        assert!(matches!(
            repo.details("OB01").await,
            Err(RepoError::NotFound(_))
        ));
    }
}
