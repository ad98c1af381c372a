// lib/src/repos/diagnosis.rs
//! Diagnosis repository: findings derived from one observation, with the
//! severity-filtered patient listing.

use std::sync::Arc;

use tracing::info;

use models::clinical::{
    Appointment, Diagnosis, DiagnosisWithContext, Doctor, Observation, Patient, Severity,
};
use models::errors::{RepoError, RepoResult};
use models::{schema, PropertyValue, ToVertex};

use crate::repos::support;
use crate::store::{Filter, GraphStore};
use crate::util::require_non_blank;

pub struct DiagnosisRepository {
    store: Arc<dyn GraphStore>,
}

impl DiagnosisRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        DiagnosisRepository { store }
    }

    /// Creates the diagnosis under its observation via HAS_DIAGNOSIS.
    pub async fn create(
        &self,
        diagnosis: Diagnosis,
        observation_id: &str,
    ) -> RepoResult<Diagnosis> {
        require_non_blank("diagnosisID", &diagnosis.diagnosis_id)?;
        require_non_blank("details", &diagnosis.details)?;
        require_non_blank("observationID", observation_id)?;

        let mut session = self.store.session().await?;
        let observation = support::observation_row(session.as_mut(), observation_id).await?;
        let diagnosis_node = session.create_node(diagnosis.to_vertex()).await?;
        session
            .create_edge(observation.node_id()?, &schema::HAS_DIAGNOSIS, diagnosis_node)
            .await?;

        info!(
            diagnosis = %diagnosis.diagnosis_id,
            observation = %observation_id,
            "Created diagnosis"
        );
        Ok(diagnosis)
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update(
        &self,
        diagnosis_id: &str,
        severity: Option<Severity>,
        details: Option<&str>,
    ) -> RepoResult<Diagnosis> {
        require_non_blank("diagnosisID", diagnosis_id)?;
        if severity.is_none() && details.is_none() {
            return Err(RepoError::invalid("update requires at least one field"));
        }
        if let Some(details) = details {
            require_non_blank("details", details)?;
        }

        let mut session = self.store.session().await?;
        let row = support::diagnosis_row(session.as_mut(), diagnosis_id).await?;

        let mut props: Vec<(String, PropertyValue)> = Vec::new();
        if let Some(severity) = severity {
            props.push(("severity".to_string(), severity.label().into()));
        }
        if let Some(details) = details {
            props.push(("details".to_string(), details.into()));
        }
        session.set_properties(row.node_id()?, props).await?;

        let row = support::diagnosis_row(session.as_mut(), diagnosis_id).await?;
        Diagnosis::from_row(&row)
    }

    pub async fn delete(&self, diagnosis_id: &str) -> RepoResult<()> {
        require_non_blank("diagnosisID", diagnosis_id)?;
        let mut session = self.store.session().await?;
        let row = support::diagnosis_row(session.as_mut(), diagnosis_id).await?;
        session.detach_delete(&[row.node_id()?]).await?;
        info!(diagnosis = %diagnosis_id, "Deleted diagnosis");
        Ok(())
    }

    /// Every diagnosis of the patient at the given severity, with the full
    /// upward context, ordered by appointment start time.
    pub async fn list_by_patient_and_severity(
        &self,
        patient_pn: &str,
        severity: Severity,
    ) -> RepoResult<Vec<DiagnosisWithContext>> {
        require_non_blank("patientPN", patient_pn)?;
        let mut session = self.store.session().await?;
        let patient_row = support::patient_row(session.as_mut(), patient_pn).await?;
        let patient = Patient::from_row(&patient_row)?;

        let severity_filter = [Filter::PropEq(
            "severity".to_string(),
            severity.label().into(),
        )];
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
                let observation = Observation::from_row(observation_row)?;
                let diagnoses = session
                    .out_neighbors(
                        observation_row.node_id()?,
                        &schema::HAS_DIAGNOSIS,
                        &severity_filter,
                    )
                    .await?;
                for diagnosis_row in &diagnoses {
                    results.push(DiagnosisWithContext {
                        diagnosis: Diagnosis::from_row(diagnosis_row)?,
                        patient: patient.clone(),
                        doctor: doctor.clone(),
                        appointment_id: appointment.appointment_id.clone(),
                        appointment_starts: appointment.starts,
                        observation_id: observation.observation_id.clone(),
                        observation_text: observation.text.clone(),
                    });
                }
            }
        }
        results.sort_by(|a, b| {
            (a.appointment_starts, &a.diagnosis.diagnosis_id)
                .cmp(&(b.appointment_starts, &b.diagnosis.diagnosis_id))
        });
        Ok(results)
    }

    /// Diagnosis + owning observation + appointment + patient + doctor
    /// rendered as one block.
    pub async fn details(&self, diagnosis_id: &str) -> RepoResult<String> {
        require_non_blank("diagnosisID", diagnosis_id)?;
        let mut session = self.store.session().await?;
        let row = support::diagnosis_row(session.as_mut(), diagnosis_id).await?;
        let diagnosis = Diagnosis::from_row(&row)?;

        let observation_row = session
            .in_neighbors(row.node_id()?, &schema::HAS_DIAGNOSIS, &[])
            .await?
            .single(format!("observation of diagnosis {diagnosis_id}"))?;
        let observation = Observation::from_row(&observation_row)?;
        let appointment_row = session
            .in_neighbors(observation_row.node_id()?, &schema::HAS_OBSERVATION, &[])
            .await?
            .single(format!(
                "appointment of observation {}",
                observation.observation_id
            ))?;
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
            "Diagnosis {} (severity: {})\n{}\nObservation: {} - {}\n\
             Appointment: {} ({})\nPatient: {} {} (PN: {})\nDoctor: Dr. {} {} ({})",
            diagnosis.diagnosis_id,
            diagnosis.severity,
            diagnosis.details,
            observation.observation_id,
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
