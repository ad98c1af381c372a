// lib/tests/scenarios.rs
//! End-to-end scenarios over the in-memory store: the scheduling
//! conflict flow, the severity listing, note authorization, and the
//! cascading patient delete.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use lib::provision::seed_roster;
use lib::{
    AppointmentRepository, DiagnosisRepository, GraphStore, MemoryGraphStore, NoteRepository,
    ObservationRepository, PatientRepository,
};
use models::clinical::{
    Appointment, Attachment, CascadeOutcome, Clinic, Department, Diagnosis, Doctor, Note,
    NoteTarget, Observation, Patient, Severity, Sex,
};
use models::errors::RepoError;
use models::schema;

struct Fixture {
    store: Arc<dyn GraphStore>,
    patients: PatientRepository,
    appointments: AppointmentRepository,
    observations: ObservationRepository,
    diagnoses: DiagnosisRepository,
    notes: NoteRepository,
}

async fn fixture() -> Fixture {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let store: Arc<dyn GraphStore> = Arc::new(MemoryGraphStore::new());
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
    for (id, first, last) in [("DR01", "Anna", "Berg"), ("DR02", "Erik", "Dahl")] {
        seed_roster(
            store.as_ref(),
            &clinic,
            &department,
            &Doctor {
                doctor_id: id.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                phone_number: "555-0110".to_string(),
            },
        )
        .await
        .unwrap();
    }

    let patients = PatientRepository::new(Arc::clone(&store));
    patients
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

    Fixture {
        appointments: AppointmentRepository::new(Arc::clone(&store)),
        observations: ObservationRepository::new(Arc::clone(&store)),
        diagnoses: DiagnosisRepository::new(Arc::clone(&store)),
        notes: NoteRepository::new(Arc::clone(&store)),
        patients,
        store,
    }
}

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 1, h, m, 0).unwrap()
}

fn appointment(id: &str, starts: DateTime<Utc>, ends: DateTime<Utc>) -> Appointment {
    Appointment {
        appointment_id: id.to_string(),
        starts,
        ends,
        reason: "checkup".to_string(),
    }
}

#[tokio::test]
async fn scheduling_scenario_rejects_overlap_and_allows_abutting() {
    let fx = fixture().await;

    fx.appointments
        .create(appointment("AP01", at(10, 0), at(10, 30)), "PN01", "DR01")
        .await
        .unwrap();

    let err = fx
        .appointments
        .create(appointment("AP02", at(10, 15), at(10, 45)), "PN01", "DR01")
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    // 10:30-11:00 abuts 10:00-10:30 and must succeed.
    fx.appointments
        .create(appointment("AP03", at(10, 30), at(11, 0)), "PN01", "DR01")
        .await
        .unwrap();

    // The other doctor's schedule is a separate partition.
    fx.appointments
        .create(appointment("AP04", at(10, 15), at(10, 45)), "PN01", "DR02")
        .await
        .unwrap();
}

#[tokio::test]
async fn severity_scenario_lists_exactly_the_matching_diagnosis() {
    let fx = fixture().await;
    fx.appointments
        .create(appointment("AP01", at(10, 0), at(10, 30)), "PN01", "DR01")
        .await
        .unwrap();
    fx.observations
        .create(
            Observation {
                observation_id: "OB01".to_string(),
                observed_at: at(10, 10),
                text: "elevated pulse".to_string(),
            },
            "AP01",
        )
        .await
        .unwrap();
    fx.diagnoses
        .create(
            Diagnosis {
                diagnosis_id: "DG01".to_string(),
                severity: Severity::High,
                details: "arrhythmia".to_string(),
            },
            "OB01",
        )
        .await
        .unwrap();

    let high = fx
        .diagnoses
        .list_by_patient_and_severity("PN01", Severity::High)
        .await
        .unwrap();
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].diagnosis.diagnosis_id, "DG01");
    assert_eq!(high[0].patient.patient_pn, "PN01");
    assert_eq!(high[0].observation_text, "elevated pulse");

    assert!(fx
        .diagnoses
        .list_by_patient_and_severity("PN01", Severity::Low)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn note_scenario_enforces_author_only_mutation() {
    let fx = fixture().await;
    fx.appointments
        .create(appointment("AP01", at(10, 0), at(10, 30)), "PN01", "DR01")
        .await
        .unwrap();
    fx.notes
        .add(
            Note {
                note_id: "NT01".to_string(),
                description: "patient recovering well".to_string(),
            },
            "DR01",
            NoteTarget::Appointment("AP01".to_string()),
        )
        .await
        .unwrap();

    let err = fx
        .notes
        .update("NT01", "rewritten by someone else", "DR02")
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Forbidden(_)));

    let updated = fx
        .notes
        .update("NT01", "patient discharged", "DR01")
        .await
        .unwrap();
    assert_eq!(updated.description, "patient discharged");
}

#[tokio::test]
async fn cascade_scenario_removes_everything_reachable_from_the_patient() {
    let fx = fixture().await;
    fx.appointments
        .create(appointment("AP01", at(10, 0), at(10, 30)), "PN01", "DR01")
        .await
        .unwrap();
    fx.appointments
        .create(appointment("AP02", at(11, 0), at(11, 30)), "PN01", "DR01")
        .await
        .unwrap();
    fx.observations
        .create(
            Observation {
                observation_id: "OB01".to_string(),
                observed_at: at(10, 10),
                text: "elevated pulse".to_string(),
            },
            "AP01",
        )
        .await
        .unwrap();
    fx.diagnoses
        .create(
            Diagnosis {
                diagnosis_id: "DG01".to_string(),
                severity: Severity::High,
                details: "arrhythmia".to_string(),
            },
            "OB01",
        )
        .await
        .unwrap();
    fx.notes
        .add(
            Note {
                note_id: "NT01".to_string(),
                description: "about the appointment".to_string(),
            },
            "DR01",
            NoteTarget::Appointment("AP01".to_string()),
        )
        .await
        .unwrap();
    fx.notes
        .add(
            Note {
                note_id: "NT02".to_string(),
                description: "about the diagnosis".to_string(),
            },
            "DR01",
            NoteTarget::Diagnosis("DG01".to_string()),
        )
        .await
        .unwrap();
    fx.notes
        .add_attachment(
            "NT01",
            Attachment {
                attachment_id: "AT01".to_string(),
                title: "scan.pdf".to_string(),
                kind: "application/pdf".to_string(),
            },
        )
        .await
        .unwrap();

    // Preview never mutates; repeating it yields identical counts.
    let preview = fx.patients.delete("PN01", false).await.unwrap();
    let again = fx.patients.delete("PN01", false).await.unwrap();
    assert_eq!(preview.impact(), again.impact());
    assert!(matches!(preview, CascadeOutcome::Preview(_)));
    assert_eq!(preview.impact().appointments, 2);
    assert_eq!(preview.impact().observations, 1);
    assert_eq!(preview.impact().diagnoses, 1);
    assert_eq!(preview.impact().notes, 2);
    assert_eq!(preview.impact().attachments, 1);
    assert!(fx.patients.find_by_pn("PN01").await.is_ok());

    let outcome = fx.patients.delete("PN01", true).await.unwrap();
    assert!(matches!(outcome, CascadeOutcome::Deleted(_)));
    assert_eq!(outcome.impact().related_total(), 7);

    // Nothing reachable remains, and the roster is untouched.
    let mut session = fx.store.session().await.unwrap();
    for label in [
        &schema::PATIENT,
        &schema::APPOINTMENT,
        &schema::OBSERVATION,
        &schema::DIAGNOSIS,
        &schema::NOTE,
        &schema::ATTACHMENT,
    ] {
        assert!(session.match_nodes(label, &[]).await.unwrap().is_empty());
    }
    assert_eq!(session.match_nodes(&schema::DOCTOR, &[]).await.unwrap().len(), 2);
}

#[tokio::test]
async fn round_trip_preserves_every_field_not_updated() {
    let fx = fixture().await;
    let created = Patient {
        patient_pn: "PN02".to_string(),
        first_name: "Bo".to_string(),
        last_name: "Ek".to_string(),
        sex: Sex::Male,
        phone_number: "555-0102".to_string(),
    };
    fx.patients.create(created.clone(), "DR01").await.unwrap();
    assert_eq!(fx.patients.find_by_pn("PN02").await.unwrap(), created);

    fx.appointments
        .create(appointment("AP10", at(9, 0), at(9, 30)), "PN02", "DR02")
        .await
        .unwrap();
    let updated = fx
        .appointments
        .update("AP10", None, None, Some("follow-up"))
        .await
        .unwrap();
    assert_eq!(updated.starts, at(9, 0));
    assert_eq!(updated.ends, at(9, 30));
    assert_eq!(updated.reason, "follow-up");
}
