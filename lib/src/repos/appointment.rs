// lib/src/repos/appointment.rs
//! Appointment repository. The defining algorithm is the per-doctor
//! scheduling invariant: `[starts, ends)` intervals are half-open, `ends`
//! is strictly after `starts`, and no two appointments of the same doctor
//! may overlap. The overlap check and the write it guards run in the same
//! exclusive session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use models::clinical::{Appointment, AppointmentWithDetails, Clinic, Department, Doctor, Patient};
use models::errors::{RepoError, RepoResult};
use models::{schema, ToVertex};

use crate::repos::support;
use crate::store::{Filter, GraphSession, GraphStore};
use crate::util::require_non_blank;

pub struct AppointmentRepository {
    store: Arc<dyn GraphStore>,
}

impl AppointmentRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        AppointmentRepository { store }
    }

    /// Creates the appointment node plus its FOR_PATIENT and WITH_DOCTOR
    /// edges. Fails with `Conflict` when the doctor already has an
    /// appointment intersecting the half-open interval.
    pub async fn create(
        &self,
        appointment: Appointment,
        patient_pn: &str,
        doctor_id: &str,
    ) -> RepoResult<Appointment> {
        require_non_blank("appointmentID", &appointment.appointment_id)?;
        require_non_blank("reason", &appointment.reason)?;
        require_non_blank("patientPN", patient_pn)?;
        require_non_blank("doctorID", doctor_id)?;
        require_valid_interval(appointment.starts, appointment.ends)?;

        let mut session = self.store.session().await?;
        let patient = support::patient_row(session.as_mut(), patient_pn).await?;
        let doctor = support::doctor_row(session.as_mut(), doctor_id).await?;
        let doctor_node = doctor.node_id()?;

        Self::check_overlap(
            session.as_mut(),
            doctor_node,
            doctor_id,
            appointment.starts,
            appointment.ends,
            None,
        )
        .await?;

        let appointment_node = session.create_node(appointment.to_vertex()).await?;
        session
            .create_edge(appointment_node, &schema::FOR_PATIENT, patient.node_id()?)
            .await?;
        session
            .create_edge(appointment_node, &schema::WITH_DOCTOR, doctor_node)
            .await?;

        info!(
            appointment = %appointment.appointment_id,
            patient = %patient_pn,
            doctor = %doctor_id,
            "Created appointment"
        );
        Ok(appointment)
    }

    /// Partial update of interval and reason. The effective interval (new
    /// value where supplied, existing otherwise) is re-validated and
    /// re-checked against all other appointments of the same doctor.
    /// The FOR_PATIENT and WITH_DOCTOR edges are never re-pointed.
    pub async fn update(
        &self,
        appointment_id: &str,
        new_starts: Option<DateTime<Utc>>,
        new_ends: Option<DateTime<Utc>>,
        new_reason: Option<&str>,
    ) -> RepoResult<Appointment> {
        require_non_blank("appointmentID", appointment_id)?;
        if new_starts.is_none() && new_ends.is_none() && new_reason.is_none() {
            return Err(RepoError::invalid("update requires at least one field"));
        }
        if let Some(reason) = new_reason {
            require_non_blank("reason", reason)?;
        }

        let mut session = self.store.session().await?;
        let row = support::appointment_row(session.as_mut(), appointment_id).await?;
        let existing = Appointment::from_row(&row)?;

        let starts = new_starts.unwrap_or(existing.starts);
        let ends = new_ends.unwrap_or(existing.ends);
        require_valid_interval(starts, ends)?;

        let doctor = session
            .out_neighbors(row.node_id()?, &schema::WITH_DOCTOR, &[])
            .await?
            .single(format!("doctor of appointment {appointment_id}"))?;
        let doctor_id = doctor.get_str("doctorID")?.to_string();
        Self::check_overlap(
            session.as_mut(),
            doctor.node_id()?,
            &doctor_id,
            starts,
            ends,
            Some(appointment_id),
        )
        .await?;

        let mut props: Vec<(String, models::PropertyValue)> = Vec::new();
        if let Some(starts) = new_starts {
            props.push(("starts".to_string(), starts.into()));
        }
        if let Some(ends) = new_ends {
            props.push(("ends".to_string(), ends.into()));
        }
        if let Some(reason) = new_reason {
            props.push(("reason".to_string(), reason.into()));
        }
        let appointment_node = row.node_id()?;
        session.set_properties(appointment_node, props).await?;

        let row = support::appointment_row(session.as_mut(), appointment_id).await?;
        Appointment::from_row(&row)
    }

    /// Raises `Conflict` when the doctor has any appointment whose
    /// half-open interval intersects `[starts, ends)`, excluding
    /// `excluding_id` so an update never conflicts with itself.
    async fn check_overlap(
        session: &mut dyn GraphSession,
        doctor_node: Uuid,
        doctor_id: &str,
        starts: DateTime<Utc>,
        ends: DateTime<Utc>,
        excluding_id: Option<&str>,
    ) -> RepoResult<()> {
        let mut filters = vec![
            Filter::TimestampLt("starts".to_string(), ends),
            Filter::TimestampGt("ends".to_string(), starts),
        ];
        if let Some(id) = excluding_id {
            filters.push(Filter::PropNe("appointmentID".to_string(), id.into()));
        }
        let clashing = session
            .in_neighbors(doctor_node, &schema::WITH_DOCTOR, &filters)
            .await?;
        if let Some(clash) = clashing.first() {
            debug!(
                doctor = %doctor_id,
                clashing = %clash.get_str("appointmentID")?,
                "Rejected overlapping appointment"
            );
            return Err(RepoError::Conflict(format!(
                "doctor {} already has appointment {} in this time slot",
                doctor_id,
                clash.get_str("appointmentID")?,
            )));
        }
        Ok(())
    }

    /// Detaches and deletes the node. Child observations are left in
    /// place; only the patient cascade removes them.
    pub async fn delete(&self, appointment_id: &str) -> RepoResult<()> {
        require_non_blank("appointmentID", appointment_id)?;
        let mut session = self.store.session().await?;
        let row = support::appointment_row(session.as_mut(), appointment_id).await?;
        session.detach_delete(&[row.node_id()?]).await?;
        info!(appointment = %appointment_id, "Deleted appointment");
        Ok(())
    }

    /// Appointments of one patient with their doctor, ordered by start
    /// time. `include_past=false` drops appointments already ended.
    pub async fn list_by_patient(
        &self,
        patient_pn: &str,
        include_past: bool,
    ) -> RepoResult<Vec<AppointmentWithDetails>> {
        require_non_blank("patientPN", patient_pn)?;
        let mut session = self.store.session().await?;
        let patient_row = support::patient_row(session.as_mut(), patient_pn).await?;
        let patient = Patient::from_row(&patient_row)?;

        let rows = session
            .in_neighbors(patient_row.node_id()?, &schema::FOR_PATIENT, &[])
            .await?;
        let mut results = Vec::new();
        for row in &rows {
            let appointment = Appointment::from_row(row)?;
            if !include_past && appointment.ends < Utc::now() {
                continue;
            }
            let doctor_row = session
                .out_neighbors(row.node_id()?, &schema::WITH_DOCTOR, &[])
                .await?
                .single(format!("doctor of appointment {}", appointment.appointment_id))?;
            results.push(AppointmentWithDetails {
                appointment,
                patient: patient.clone(),
                doctor: Doctor::from_row(&doctor_row)?,
            });
        }
        sort_by_start(&mut results);
        Ok(results)
    }

    /// Appointments of one doctor with their patient, ordered by start
    /// time. Same `include_past` presentation filter as above.
    pub async fn list_by_doctor(
        &self,
        doctor_id: &str,
        include_past: bool,
    ) -> RepoResult<Vec<AppointmentWithDetails>> {
        require_non_blank("doctorID", doctor_id)?;
        let mut session = self.store.session().await?;
        let doctor_row = support::doctor_row(session.as_mut(), doctor_id).await?;
        let doctor = Doctor::from_row(&doctor_row)?;

        let rows = session
            .in_neighbors(doctor_row.node_id()?, &schema::WITH_DOCTOR, &[])
            .await?;
        let mut results = Vec::new();
        for row in &rows {
            let appointment = Appointment::from_row(row)?;
            if !include_past && appointment.ends < Utc::now() {
                continue;
            }
            let patient_row = session
                .out_neighbors(row.node_id()?, &schema::FOR_PATIENT, &[])
                .await?
                .single(format!("patient of appointment {}", appointment.appointment_id))?;
            results.push(AppointmentWithDetails {
                appointment,
                patient: Patient::from_row(&patient_row)?,
                doctor: doctor.clone(),
            });
        }
        sort_by_start(&mut results);
        Ok(results)
    }

    /// Full join rendered as one block: appointment + patient + doctor +
    /// department + clinic.
    pub async fn details(&self, appointment_id: &str) -> RepoResult<String> {
        require_non_blank("appointmentID", appointment_id)?;
        let mut session = self.store.session().await?;
        let row = support::appointment_row(session.as_mut(), appointment_id).await?;
        let appointment = Appointment::from_row(&row)?;
        let appointment_node = row.node_id()?;

        let patient_row = session
            .out_neighbors(appointment_node, &schema::FOR_PATIENT, &[])
            .await?
            .single(format!("patient of appointment {appointment_id}"))?;
        let patient = Patient::from_row(&patient_row)?;

        let doctor_row = session
            .out_neighbors(appointment_node, &schema::WITH_DOCTOR, &[])
            .await?
            .single(format!("doctor of appointment {appointment_id}"))?;
        let doctor = Doctor::from_row(&doctor_row)?;
        let department_row = session
            .out_neighbors(doctor_row.node_id()?, &schema::WORKS_IN, &[])
            .await?
            .single(format!("department of doctor {}", doctor.doctor_id))?;
        let department = Department::from_row(&department_row)?;
        let clinic_row = session
            .out_neighbors(department_row.node_id()?, &schema::IN_CLINIC, &[])
            .await?
            .single(format!("clinic of doctor {}", doctor.doctor_id))?;
        let clinic = Clinic::from_row(&clinic_row)?;

        Ok(format!(
            "Appointment {}: {} - {}\nReason: {}\nPatient: {} {} (PN: {})\n\
             Doctor: Dr. {} {} ({}), Department: {}, Clinic: {}",
            appointment.appointment_id,
            appointment.starts.format("%Y-%m-%d %H:%M"),
            appointment.ends.format("%Y-%m-%d %H:%M"),
            appointment.reason,
            patient.first_name,
            patient.last_name,
            patient.patient_pn,
            doctor.first_name,
            doctor.last_name,
            doctor.doctor_id,
            department.name,
            clinic.name,
        ))
    }
}

fn require_valid_interval(starts: DateTime<Utc>, ends: DateTime<Utc>) -> RepoResult<()> {
    if ends <= starts {
        return Err(RepoError::invalid("ends must be strictly after starts"));
    }
    Ok(())
}

fn sort_by_start(results: &mut [AppointmentWithDetails]) {
    results.sort_by(|a, b| {
        (a.appointment.starts, &a.appointment.appointment_id)
            .cmp(&(b.appointment.starts, &b.appointment.appointment_id))
    });
}
