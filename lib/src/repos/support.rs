// lib/src/repos/support.rs
//! Row lookups shared by the repositories. Each helper resolves one node
//! by its identity key and raises `NotFound` naming the missing entity.

use models::errors::{RepoError, RepoResult};
use models::rows::Row;
use models::schema;

use crate::store::GraphSession;

pub(crate) async fn patient_row(
    session: &mut dyn GraphSession,
    patient_pn: &str,
) -> RepoResult<Row> {
    session
        .find_by_key(&schema::PATIENT, "patientPN", patient_pn)
        .await?
        .ok_or_else(|| RepoError::not_found(format!("patient {patient_pn}")))
}

pub(crate) async fn doctor_row(
    session: &mut dyn GraphSession,
    doctor_id: &str,
) -> RepoResult<Row> {
    session
        .find_by_key(&schema::DOCTOR, "doctorID", doctor_id)
        .await?
        .ok_or_else(|| RepoError::not_found(format!("doctor {doctor_id}")))
}

pub(crate) async fn clinic_row(
    session: &mut dyn GraphSession,
    clinic_id: &str,
) -> RepoResult<Row> {
    session
        .find_by_key(&schema::CLINIC, "clinicID", clinic_id)
        .await?
        .ok_or_else(|| RepoError::not_found(format!("clinic {clinic_id}")))
}

pub(crate) async fn appointment_row(
    session: &mut dyn GraphSession,
    appointment_id: &str,
) -> RepoResult<Row> {
    session
        .find_by_key(&schema::APPOINTMENT, "appointmentID", appointment_id)
        .await?
        .ok_or_else(|| RepoError::not_found(format!("appointment {appointment_id}")))
}

pub(crate) async fn observation_row(
    session: &mut dyn GraphSession,
    observation_id: &str,
) -> RepoResult<Row> {
    session
        .find_by_key(&schema::OBSERVATION, "observationID", observation_id)
        .await?
        .ok_or_else(|| RepoError::not_found(format!("observation {observation_id}")))
}

pub(crate) async fn diagnosis_row(
    session: &mut dyn GraphSession,
    diagnosis_id: &str,
) -> RepoResult<Row> {
    session
        .find_by_key(&schema::DIAGNOSIS, "diagnosisID", diagnosis_id)
        .await?
        .ok_or_else(|| RepoError::not_found(format!("diagnosis {diagnosis_id}")))
}

pub(crate) async fn note_row(session: &mut dyn GraphSession, note_id: &str) -> RepoResult<Row> {
    session
        .find_by_key(&schema::NOTE, "noteID", note_id)
        .await?
        .ok_or_else(|| RepoError::not_found(format!("note {note_id}")))
}

/// The doctor's department and clinic, reached through the
/// WORKS_IN → IN_CLINIC chain. `NotFound` when either hop is missing.
pub(crate) async fn doctor_chain(
    session: &mut dyn GraphSession,
    doctor_id: &str,
) -> RepoResult<(Row, Row, Row)> {
    let doctor = doctor_row(session, doctor_id).await?;
    let department = session
        .out_neighbors(doctor.node_id()?, &schema::WORKS_IN, &[])
        .await?
        .single(format!("department of doctor {doctor_id}"))?;
    let clinic = session
        .out_neighbors(department.node_id()?, &schema::IN_CLINIC, &[])
        .await?
        .single(format!("clinic of doctor {doctor_id}"))?;
    Ok((doctor, department, clinic))
}
