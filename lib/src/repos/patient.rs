// lib/src/repos/patient.rs
//! Patient repository: CRUD over Patient nodes, their doctor/clinic
//! relationships, and the two-phase cascading delete.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use models::clinical::{
    CascadeImpact, CascadeOutcome, Clinic, Department, Doctor, Patient, PatientWithDoctor, Sex,
};
use models::errors::{RepoError, RepoResult};
use models::rows::Row;
use models::{schema, Identifier, ToVertex};

use crate::repos::support;
use crate::store::{Filter, GraphSession, GraphStore};
use crate::util::require_non_blank;

/// Sparse update: only supplied fields are written. A supplied `doctor_id`
/// re-points both the HAS_PRIMARY_DOCTOR and REGISTERED_AT edges.
#[derive(Clone, Debug, Default)]
pub struct PatientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sex: Option<Sex>,
    pub phone_number: Option<String>,
    pub doctor_id: Option<String>,
}

impl PatientUpdate {
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.sex.is_none()
            && self.phone_number.is_none()
            && self.doctor_id.is_none()
    }
}

/// Node ids gathered by the ownership walk from one patient.
#[derive(Default)]
struct CascadeTargets {
    appointments: Vec<Uuid>,
    observations: Vec<Uuid>,
    diagnoses: Vec<Uuid>,
    notes: Vec<Uuid>,
    attachments: Vec<Uuid>,
}

pub struct PatientRepository {
    store: Arc<dyn GraphStore>,
}

impl PatientRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        PatientRepository { store }
    }

    /// Creates the patient plus its HAS_PRIMARY_DOCTOR and REGISTERED_AT
    /// edges in one session. Fails with `NotFound` when the doctor has no
    /// department/clinic chain to register the patient at.
    pub async fn create(&self, patient: Patient, doctor_id: &str) -> RepoResult<Patient> {
        require_non_blank("patientPN", &patient.patient_pn)?;
        require_non_blank("firstName", &patient.first_name)?;
        require_non_blank("lastName", &patient.last_name)?;
        require_non_blank("phoneNumber", &patient.phone_number)?;
        require_non_blank("doctorID", doctor_id)?;

        let mut session = self.store.session().await?;
        let (doctor, _department, clinic) =
            support::doctor_chain(session.as_mut(), doctor_id).await?;

        let patient_node = session.create_node(patient.to_vertex()).await?;
        session
            .create_edge(patient_node, &schema::HAS_PRIMARY_DOCTOR, doctor.node_id()?)
            .await?;
        session
            .create_edge(patient_node, &schema::REGISTERED_AT, clinic.node_id()?)
            .await?;

        info!(patient = %patient.patient_pn, doctor = %doctor_id, "Created patient");
        Ok(patient)
    }

    /// Applies only the supplied fields; re-points the doctor and clinic
    /// edges when `doctor_id` is supplied. Returns the updated patient.
    pub async fn update(&self, patient_pn: &str, update: PatientUpdate) -> RepoResult<Patient> {
        require_non_blank("patientPN", patient_pn)?;
        if update.is_empty() {
            return Err(RepoError::invalid("update requires at least one field"));
        }
        // All supplied fields are validated before any I/O.
        if let Some(first_name) = &update.first_name {
            require_non_blank("firstName", first_name)?;
        }
        if let Some(last_name) = &update.last_name {
            require_non_blank("lastName", last_name)?;
        }
        if let Some(phone_number) = &update.phone_number {
            require_non_blank("phoneNumber", phone_number)?;
        }
        if let Some(doctor_id) = &update.doctor_id {
            require_non_blank("doctorID", doctor_id)?;
        }

        let mut session = self.store.session().await?;
        let patient = support::patient_row(session.as_mut(), patient_pn).await?;
        let patient_node = patient.node_id()?;

        let mut props = Vec::new();
        if let Some(first_name) = &update.first_name {
            props.push(("firstName".to_string(), first_name.as_str().into()));
        }
        if let Some(last_name) = &update.last_name {
            props.push(("lastName".to_string(), last_name.as_str().into()));
        }
        if let Some(sex) = update.sex {
            props.push(("sex".to_string(), sex.label().into()));
        }
        if let Some(phone_number) = &update.phone_number {
            props.push(("phoneNumber".to_string(), phone_number.as_str().into()));
        }
        if !props.is_empty() {
            session.set_properties(patient_node, props).await?;
        }

        if let Some(doctor_id) = &update.doctor_id {
            let (doctor, _department, clinic) =
                support::doctor_chain(session.as_mut(), doctor_id).await?;
            session
                .delete_out_edges(
                    patient_node,
                    &[&schema::HAS_PRIMARY_DOCTOR, &schema::REGISTERED_AT],
                )
                .await?;
            session
                .create_edge(patient_node, &schema::HAS_PRIMARY_DOCTOR, doctor.node_id()?)
                .await?;
            session
                .create_edge(patient_node, &schema::REGISTERED_AT, clinic.node_id()?)
                .await?;
            debug!(patient = %patient_pn, doctor = %doctor_id, "Re-pointed primary doctor");
        }

        let row = support::patient_row(session.as_mut(), patient_pn).await?;
        Patient::from_row(&row)
    }

    /// Two-phase cascading delete. `confirmed=false` computes the impact
    /// without mutating anything; `confirmed=true` removes the patient and
    /// everything the ownership walk reaches, all in the same session.
    pub async fn delete(&self, patient_pn: &str, confirmed: bool) -> RepoResult<CascadeOutcome> {
        require_non_blank("patientPN", patient_pn)?;

        let mut session = self.store.session().await?;
        let patient = support::patient_row(session.as_mut(), patient_pn).await?;
        let patient_node = patient.node_id()?;

        let targets = Self::cascade_targets(session.as_mut(), patient_node).await?;
        let impact = CascadeImpact {
            patient_pn: patient_pn.to_string(),
            first_name: patient.get_str("firstName")?.to_string(),
            last_name: patient.get_str("lastName")?.to_string(),
            appointments: targets.appointments.len(),
            observations: targets.observations.len(),
            diagnoses: targets.diagnoses.len(),
            notes: targets.notes.len(),
            attachments: targets.attachments.len(),
        };

        if !confirmed {
            return Ok(CascadeOutcome::Preview(impact));
        }

        // Leaves first, then the ownership chain bottom-up, then the root.
        session.detach_delete(&targets.attachments).await?;
        session.detach_delete(&targets.notes).await?;
        session.detach_delete(&targets.diagnoses).await?;
        session.detach_delete(&targets.observations).await?;
        session.detach_delete(&targets.appointments).await?;
        session.detach_delete(&[patient_node]).await?;

        info!(
            patient = %patient_pn,
            removed = impact.related_total(),
            "Cascade-deleted patient"
        );
        Ok(CascadeOutcome::Deleted(impact))
    }

    /// Bounded-depth reachability walk over the ownership edges:
    /// Patient ← Appointment → Observation → Diagnosis, collecting the
    /// Note and Attachment leaves hanging off each level.
    async fn cascade_targets(
        session: &mut dyn GraphSession,
        patient_node: Uuid,
    ) -> RepoResult<CascadeTargets> {
        let mut targets = CascadeTargets::default();

        let appointments = session
            .in_neighbors(patient_node, &schema::FOR_PATIENT, &[])
            .await?;
        for appointment in &appointments {
            let appointment_node = appointment.node_id()?;
            targets.appointments.push(appointment_node);
            Self::collect_notes(session, appointment_node, &schema::ABOUT_APPOINTMENT, &mut targets)
                .await?;

            let observations = session
                .out_neighbors(appointment_node, &schema::HAS_OBSERVATION, &[])
                .await?;
            for observation in &observations {
                let observation_node = observation.node_id()?;
                targets.observations.push(observation_node);
                Self::collect_notes(
                    session,
                    observation_node,
                    &schema::ABOUT_OBSERVATION,
                    &mut targets,
                )
                .await?;

                let diagnoses = session
                    .out_neighbors(observation_node, &schema::HAS_DIAGNOSIS, &[])
                    .await?;
                for diagnosis in &diagnoses {
                    let diagnosis_node = diagnosis.node_id()?;
                    targets.diagnoses.push(diagnosis_node);
                    Self::collect_notes(
                        session,
                        diagnosis_node,
                        &schema::ABOUT_DIAGNOSIS,
                        &mut targets,
                    )
                    .await?;
                }
            }
        }
        Ok(targets)
    }

    async fn collect_notes(
        session: &mut dyn GraphSession,
        target_node: Uuid,
        about: &Identifier,
        targets: &mut CascadeTargets,
    ) -> RepoResult<()> {
        let notes = session.in_neighbors(target_node, about, &[]).await?;
        for note in &notes {
            let note_node = note.node_id()?;
            targets.notes.push(note_node);
            let attachments = session
                .in_neighbors(note_node, &schema::ATTACHED_TO, &[])
                .await?;
            for attachment in &attachments {
                targets.attachments.push(attachment.node_id()?);
            }
        }
        Ok(())
    }

    pub async fn find_by_pn(&self, patient_pn: &str) -> RepoResult<Patient> {
        require_non_blank("patientPN", patient_pn)?;
        let mut session = self.store.session().await?;
        let row = support::patient_row(session.as_mut(), patient_pn).await?;
        Patient::from_row(&row)
    }

    /// Case-insensitive exact match on both names, each hit joined with
    /// its primary doctor and registering clinic. An empty result is an
    /// empty list, not a failure.
    pub async fn search_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Vec<PatientWithDoctor>> {
        require_non_blank("firstName", first_name)?;
        require_non_blank("lastName", last_name)?;

        let mut session = self.store.session().await?;
        let rows = session
            .match_nodes(
                &schema::PATIENT,
                &[
                    Filter::PropEqIgnoreCase("firstName".to_string(), first_name.to_string()),
                    Filter::PropEqIgnoreCase("lastName".to_string(), last_name.to_string()),
                ],
            )
            .await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in &rows {
            let patient_node = row.node_id()?;
            let doctor = session
                .out_neighbors(patient_node, &schema::HAS_PRIMARY_DOCTOR, &[])
                .await?
                .first()
                .map(Doctor::from_row)
                .transpose()?;
            let clinic_name = session
                .out_neighbors(patient_node, &schema::REGISTERED_AT, &[])
                .await?
                .first()
                .map(|clinic| clinic.get_str("name").map(str::to_string))
                .transpose()?;
            results.push(PatientWithDoctor {
                patient: Patient::from_row(row)?,
                doctor,
                clinic_name,
            });
        }
        sort_joined(&mut results);
        Ok(results)
    }

    pub async fn list_by_doctor(&self, doctor_id: &str) -> RepoResult<Vec<Patient>> {
        require_non_blank("doctorID", doctor_id)?;
        let mut session = self.store.session().await?;
        let doctor = support::doctor_row(session.as_mut(), doctor_id).await?;
        let rows = session
            .in_neighbors(doctor.node_id()?, &schema::HAS_PRIMARY_DOCTOR, &[])
            .await?;
        let mut patients = decode_patients(rows.iter())?;
        sort_patients(&mut patients);
        Ok(patients)
    }

    /// Every patient whose primary doctor works in a department of the
    /// clinic, joined with that doctor and the clinic name.
    pub async fn list_by_clinic(&self, clinic_id: &str) -> RepoResult<Vec<PatientWithDoctor>> {
        require_non_blank("clinicID", clinic_id)?;
        let mut session = self.store.session().await?;
        let clinic = support::clinic_row(session.as_mut(), clinic_id).await?;
        let clinic_name = clinic.get_str("name")?.to_string();

        let mut results = Vec::new();
        let departments = session
            .in_neighbors(clinic.node_id()?, &schema::IN_CLINIC, &[])
            .await?;
        for department in &departments {
            let doctors = session
                .in_neighbors(department.node_id()?, &schema::WORKS_IN, &[])
                .await?;
            for doctor_row in &doctors {
                let doctor = Doctor::from_row(doctor_row)?;
                let patients = session
                    .in_neighbors(doctor_row.node_id()?, &schema::HAS_PRIMARY_DOCTOR, &[])
                    .await?;
                for patient_row in &patients {
                    results.push(PatientWithDoctor {
                        patient: Patient::from_row(patient_row)?,
                        doctor: Some(doctor.clone()),
                        clinic_name: Some(clinic_name.clone()),
                    });
                }
            }
        }
        sort_joined(&mut results);
        Ok(results)
    }

    /// Patient + primary doctor + department + clinic, rendered as one
    /// human-readable block. A patient without a doctor chain still
    /// renders; the doctor line says so.
    pub async fn summary(&self, patient_pn: &str) -> RepoResult<String> {
        require_non_blank("patientPN", patient_pn)?;
        let mut session = self.store.session().await?;
        let patient_row = support::patient_row(session.as_mut(), patient_pn).await?;
        let patient = Patient::from_row(&patient_row)?;

        let doctor_line = match Self::primary_chain(session.as_mut(), &patient_row).await? {
            Some((doctor, department, clinic)) => format!(
                "Primary doctor: Dr. {} {} ({}), Department: {}, Clinic: {}",
                doctor.first_name,
                doctor.last_name,
                doctor.doctor_id,
                department.name,
                clinic.name,
            ),
            None => "Primary doctor: none".to_string(),
        };

        Ok(format!(
            "Patient: {} {} (PN: {})\nSex: {}, Phone: {}\n{}",
            patient.first_name,
            patient.last_name,
            patient.patient_pn,
            patient.sex,
            patient.phone_number,
            doctor_line,
        ))
    }

    async fn primary_chain(
        session: &mut dyn GraphSession,
        patient_row: &Row,
    ) -> RepoResult<Option<(Doctor, Department, Clinic)>> {
        let doctors = session
            .out_neighbors(patient_row.node_id()?, &schema::HAS_PRIMARY_DOCTOR, &[])
            .await?;
        let doctor_row = match doctors.first() {
            Some(row) => row.clone(),
            None => return Ok(None),
        };
        let department_row = session
            .out_neighbors(doctor_row.node_id()?, &schema::WORKS_IN, &[])
            .await?
            .single("department of primary doctor")?;
        let clinic_row = session
            .out_neighbors(department_row.node_id()?, &schema::IN_CLINIC, &[])
            .await?
            .single("clinic of primary doctor")?;
        Ok(Some((
            Doctor::from_row(&doctor_row)?,
            Department::from_row(&department_row)?,
            Clinic::from_row(&clinic_row)?,
        )))
    }
}

fn decode_patients<'a>(rows: impl Iterator<Item = &'a Row>) -> RepoResult<Vec<Patient>> {
    rows.map(Patient::from_row).collect()
}

fn sort_patients(patients: &mut [Patient]) {
    patients.sort_by(|a, b| {
        (&a.last_name, &a.first_name, &a.patient_pn).cmp(&(
            &b.last_name,
            &b.first_name,
            &b.patient_pn,
        ))
    });
}

fn sort_joined(results: &mut [PatientWithDoctor]) {
    results.sort_by(|a, b| {
        (&a.patient.last_name, &a.patient.first_name, &a.patient.patient_pn).cmp(&(
            &b.patient.last_name,
            &b.patient.first_name,
            &b.patient.patient_pn,
        ))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraphStore;
    use crate::provision::seed_roster;
    use models::clinical::{Clinic, Department, Sex};

    async fn seeded_store() -> Arc<dyn GraphStore> {
        let store = MemoryGraphStore::new();
        let clinic = Clinic {
            clinic_id: "CL01".to_string(),
            name: "Central Clinic".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
        };
        let department = Department {
            department_id: "DPT1".to_string(),
            name: "Cardiology".to_string(),
        };
        let doctor = Doctor {
            doctor_id: "DR01".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Berg".to_string(),
            phone_number: "555-0110".to_string(),
        };
        seed_roster(&store, &clinic, &department, &doctor).await.unwrap();
        Arc::new(store)
    }

    fn patient(pn: &str, first: &str, last: &str) -> Patient {
        Patient {
            patient_pn: pn.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            sex: Sex::Female,
            phone_number: "555-0101".to_string(),
        }
    }

    #[tokio::test]
    async fn should_create_and_find_patient() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(store);

        let created = repo
            .create(patient("PN01", "Astrid", "Lind"), "DR01")
            .await
            .unwrap();
        let found = repo.find_by_pn("PN01").await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn should_reject_doctor_without_clinic_chain() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(store);

        let err = repo
            .create(patient("PN01", "Astrid", "Lind"), "DR99")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_reject_blank_identity() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(store);

        let err = repo
            .create(patient("  ", "Astrid", "Lind"), "DR01")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn should_update_only_supplied_fields() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(store);
        repo.create(patient("PN01", "Astrid", "Lind"), "DR01")
            .await
            .unwrap();

        let updated = repo
            .update(
                "PN01",
                PatientUpdate {
                    phone_number: Some("555-0199".to_string()),
                    ..PatientUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone_number, "555-0199");
        assert_eq!(updated.first_name, "Astrid");

        let err = repo.update("PN01", PatientUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn should_validate_update_fields_before_any_read() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(store);

        // A blank supplied field fails validation even though the patient
        // does not exist; no lookup happens first.
        let err = repo
            .update(
                "PN99",
                PatientUpdate {
                    first_name: Some("   ".to_string()),
                    ..PatientUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn should_search_names_case_insensitively_with_doctor_context() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(store);
        repo.create(patient("PN01", "Astrid", "Lind"), "DR01")
            .await
            .unwrap();

        let hits = repo.search_by_name("astrid", "LIND").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].patient.patient_pn, "PN01");
        assert_eq!(hits[0].doctor.as_ref().unwrap().doctor_id, "DR01");
        assert_eq!(hits[0].clinic_name.as_deref(), Some("Central Clinic"));

        let misses = repo.search_by_name("Astrid", "Linden").await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn should_list_patients_by_doctor_and_clinic() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(store);
        repo.create(patient("PN01", "Astrid", "Lind"), "DR01")
            .await
            .unwrap();
        repo.create(patient("PN02", "Bo", "Ek"), "DR01").await.unwrap();

        let by_doctor = repo.list_by_doctor("DR01").await.unwrap();
        assert_eq!(by_doctor.len(), 2);
        // Sorted by last name.
        assert_eq!(by_doctor[0].patient_pn, "PN02");

        let by_clinic = repo.list_by_clinic("CL01").await.unwrap();
        assert_eq!(by_clinic.len(), 2);
        assert_eq!(
            by_clinic[0].doctor.as_ref().unwrap().doctor_id,
            "DR01"
        );
        assert_eq!(by_clinic[0].clinic_name.as_deref(), Some("Central Clinic"));
    }

    #[tokio::test]
    async fn should_render_patient_summary() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(store);
        repo.create(patient("PN01", "Astrid", "Lind"), "DR01")
            .await
            .unwrap();

        let summary = repo.summary("PN01").await.unwrap();
        assert!(summary.contains("Astrid Lind (PN: PN01)"));
        assert!(summary.contains("Dr. Anna Berg (DR01)"));
        assert!(summary.contains("Cardiology"));
        assert!(summary.contains("Central Clinic"));
    }

    #[tokio::test]
    async fn should_preview_delete_without_mutating() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(Arc::clone(&store));
        repo.create(patient("PN01", "Astrid", "Lind"), "DR01")
            .await
            .unwrap();

        let first = repo.delete("PN01", false).await.unwrap();
        let second = repo.delete("PN01", false).await.unwrap();
        assert_eq!(first.impact(), second.impact());
        assert!(matches!(first, CascadeOutcome::Preview(_)));
        assert!(repo.find_by_pn("PN01").await.is_ok());
    }

    #[tokio::test]
    async fn should_delete_patient_when_confirmed() {
        let store = seeded_store().await;
        let repo = PatientRepository::new(store);
        repo.create(patient("PN01", "Astrid", "Lind"), "DR01")
            .await
            .unwrap();

        let outcome = repo.delete("PN01", true).await.unwrap();
        assert!(matches!(outcome, CascadeOutcome::Deleted(_)));
        assert!(matches!(
            repo.find_by_pn("PN01").await,
            Err(RepoError::NotFound(_))
        ));
    }
}
