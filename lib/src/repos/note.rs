// lib/src/repos/note.rs
//! Note repository: author-scoped free-text annotations attached to one
//! appointment, observation, or diagnosis. Mutations are permitted only
//! for the authoring doctor, checked at this layer before any write.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use models::clinical::{Appointment, Attachment, Note, NoteTarget, Patient};
use models::errors::{RepoError, RepoResult};
use models::{schema, ToVertex};

use crate::repos::support;
use crate::store::{GraphSession, GraphStore};
use crate::util::require_non_blank;

pub struct NoteRepository {
    store: Arc<dyn GraphStore>,
}

impl NoteRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        NoteRepository { store }
    }

    /// Creates the note with its AUTHORED_BY edge and the single ABOUT_*
    /// edge the target variant selects. Both the doctor and the target
    /// must already exist.
    pub async fn add(&self, note: Note, doctor_id: &str, target: NoteTarget) -> RepoResult<Note> {
        require_non_blank("noteID", &note.note_id)?;
        require_non_blank("description", &note.description)?;
        require_non_blank("doctorID", doctor_id)?;
        require_non_blank(target.key_property(), target.target_id())?;

        let mut session = self.store.session().await?;
        let doctor = support::doctor_row(session.as_mut(), doctor_id).await?;
        let target_row = session
            .find_by_key(target.label(), target.key_property(), target.target_id())
            .await?
            .ok_or_else(|| {
                RepoError::not_found(format!("{} {}", target.kind(), target.target_id()))
            })?;

        let note_node = session.create_node(note.to_vertex()).await?;
        session
            .create_edge(note_node, &schema::AUTHORED_BY, doctor.node_id()?)
            .await?;
        session
            .create_edge(note_node, target.edge_type(), target_row.node_id()?)
            .await?;

        info!(
            note = %note.note_id,
            doctor = %doctor_id,
            target = %target.target_id(),
            "Added note"
        );
        Ok(note)
    }

    /// Rewrites the description. Fails with `Forbidden` when `doctor_id`
    /// is not the note's author; the note is left unchanged.
    pub async fn update(
        &self,
        note_id: &str,
        description: &str,
        doctor_id: &str,
    ) -> RepoResult<Note> {
        require_non_blank("noteID", note_id)?;
        require_non_blank("description", description)?;
        require_non_blank("doctorID", doctor_id)?;

        let mut session = self.store.session().await?;
        let row = support::note_row(session.as_mut(), note_id).await?;
        let note_node = row.node_id()?;
        Self::check_author(session.as_mut(), note_node, note_id, doctor_id).await?;

        session
            .set_properties(note_node, vec![("description".to_string(), description.into())])
            .await?;
        let row = support::note_row(session.as_mut(), note_id).await?;
        Note::from_row(&row)
    }

    /// Deletes the note and every attachment attached to it. Same author
    /// check as `update`.
    pub async fn delete(&self, note_id: &str, doctor_id: &str) -> RepoResult<()> {
        require_non_blank("noteID", note_id)?;
        require_non_blank("doctorID", doctor_id)?;

        let mut session = self.store.session().await?;
        let row = support::note_row(session.as_mut(), note_id).await?;
        let note_node = row.node_id()?;
        Self::check_author(session.as_mut(), note_node, note_id, doctor_id).await?;

        let attachments = session
            .in_neighbors(note_node, &schema::ATTACHED_TO, &[])
            .await?;
        let mut doomed: Vec<Uuid> = Vec::with_capacity(attachments.len() + 1);
        for attachment in &attachments {
            doomed.push(attachment.node_id()?);
        }
        doomed.push(note_node);
        session.detach_delete(&doomed).await?;

        info!(
            note = %note_id,
            attachments = attachments.len(),
            "Deleted note"
        );
        Ok(())
    }

    async fn check_author(
        session: &mut dyn GraphSession,
        note_node: Uuid,
        note_id: &str,
        doctor_id: &str,
    ) -> RepoResult<()> {
        let author = session
            .out_neighbors(note_node, &schema::AUTHORED_BY, &[])
            .await?
            .single(format!("author of note {note_id}"))?;
        let author_id = author.get_str("doctorID")?;
        if author_id != doctor_id {
            warn!(
                note = %note_id,
                author = %author_id,
                caller = %doctor_id,
                "Rejected note mutation by non-author"
            );
            return Err(RepoError::Forbidden(format!(
                "note {note_id} belongs to doctor {author_id}"
            )));
        }
        Ok(())
    }

    /// Renders the note, its author, and whichever ABOUT_* target is
    /// present: the appointment (with its patient), the observation, or
    /// the diagnosis.
    pub async fn details(&self, note_id: &str) -> RepoResult<String> {
        require_non_blank("noteID", note_id)?;
        let mut session = self.store.session().await?;
        let row = support::note_row(session.as_mut(), note_id).await?;
        let note = Note::from_row(&row)?;
        let note_node = row.node_id()?;

        let author = session
            .out_neighbors(note_node, &schema::AUTHORED_BY, &[])
            .await?
            .single(format!("author of note {note_id}"))?;
        let context = Self::target_context(session.as_mut(), note_node, note_id).await?;

        Ok(format!(
            "Note {} by Dr. {} {} ({})\n{}\n{}",
            note.note_id,
            author.get_str("firstName")?,
            author.get_str("lastName")?,
            author.get_str("doctorID")?,
            context,
            note.description,
        ))
    }

    async fn target_context(
        session: &mut dyn GraphSession,
        note_node: Uuid,
        note_id: &str,
    ) -> RepoResult<String> {
        let appointments = session
            .out_neighbors(note_node, &schema::ABOUT_APPOINTMENT, &[])
            .await?;
        if let Some(appointment_row) = appointments.first() {
            let appointment = Appointment::from_row(appointment_row)?;
            let patient_row = session
                .out_neighbors(appointment_row.node_id()?, &schema::FOR_PATIENT, &[])
                .await?
                .single(format!(
                    "patient of appointment {}",
                    appointment.appointment_id
                ))?;
            let patient = Patient::from_row(&patient_row)?;
            return Ok(format!(
                "About appointment {} ({}) for {} {} (PN: {})",
                appointment.appointment_id,
                appointment.starts.format("%Y-%m-%d %H:%M"),
                patient.first_name,
                patient.last_name,
                patient.patient_pn,
            ));
        }

        let observations = session
            .out_neighbors(note_node, &schema::ABOUT_OBSERVATION, &[])
            .await?;
        if let Some(observation_row) = observations.first() {
            return Ok(format!(
                "About observation {}: {}",
                observation_row.get_str("observationID")?,
                observation_row.get_str("text")?,
            ));
        }

        let diagnoses = session
            .out_neighbors(note_node, &schema::ABOUT_DIAGNOSIS, &[])
            .await?;
        if let Some(diagnosis_row) = diagnoses.first() {
            return Ok(format!(
                "About diagnosis {} (severity: {})",
                diagnosis_row.get_str("diagnosisID")?,
                diagnosis_row.get_str("severity")?,
            ));
        }

        Err(RepoError::Store(format!("note {note_id} has no target edge")))
    }

    /// Attaches a file record to the note via ATTACHED_TO. The blob lives
    /// in the external document store; only title and type are recorded.
    pub async fn add_attachment(
        &self,
        note_id: &str,
        attachment: Attachment,
    ) -> RepoResult<Attachment> {
        require_non_blank("noteID", note_id)?;
        require_non_blank("attachmentID", &attachment.attachment_id)?;
        require_non_blank("title", &attachment.title)?;

        let mut session = self.store.session().await?;
        let note = support::note_row(session.as_mut(), note_id).await?;
        let attachment_node = session.create_node(attachment.to_vertex()).await?;
        session
            .create_edge(attachment_node, &schema::ATTACHED_TO, note.node_id()?)
            .await?;

        info!(
            attachment = %attachment.attachment_id,
            note = %note_id,
            "Attached file record to note"
        );
        Ok(attachment)
    }

    pub async fn list_attachments(&self, note_id: &str) -> RepoResult<Vec<Attachment>> {
        require_non_blank("noteID", note_id)?;
        let mut session = self.store.session().await?;
        let note = support::note_row(session.as_mut(), note_id).await?;
        let rows = session
            .in_neighbors(note.node_id()?, &schema::ATTACHED_TO, &[])
            .await?;
        let mut attachments: Vec<Attachment> =
            rows.iter().map(Attachment::from_row).collect::<RepoResult<_>>()?;
        attachments.sort_by(|a, b| a.attachment_id.cmp(&b.attachment_id));
        Ok(attachments)
    }
}
