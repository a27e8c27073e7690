//! End-to-end flows through the sprint service: start, track, gate, submit,
//! verify, and the failure modes in between.

use sprint_catalog::InMemoryProjectCatalog;
use sprint_identity::{RegistrationRequest, Role};
use sprint_service::{Actor, SprintService};
use sprint_storage::InMemorySprintStorage;
use sprint_types::{
    AccountId, CertificateId, Deliverable, DeliverableId, FieldUpdates, IntegrityAttestations,
    LecturerId, Project, ProjectId, ReviewDecision, SprintError, StudentId, SubmissionStatus,
    TrackedStatus,
};
use std::sync::Arc;

fn service() -> SprintService {
    let catalog = InMemoryProjectCatalog::new();
    catalog
        .publish(Project {
            id: ProjectId::new("p1"),
            title: "Fintech dashboard".to_string(),
            deliverables: vec![
                Deliverable::new("d1", "Wireframes", "Low-fi screens"),
                Deliverable::new("d2", "Prototype", "Clickable build"),
            ],
            stakeholder_feedback: "The CFO wants CSV export.".to_string(),
            detailed_requirements: "See the brief.".to_string(),
        })
        .unwrap();

    let service = SprintService::new(
        Arc::new(catalog) as Arc<dyn sprint_catalog::ProjectCatalog>,
        Arc::new(InMemorySprintStorage::new()),
    );

    service
        .register_account(RegistrationRequest {
            id: AccountId::new("s1"),
            name: "Sam Student".to_string(),
            email: "s1@praxis.example".to_string(),
            role: Role::Student,
        })
        .unwrap();
    service
        .register_account(RegistrationRequest {
            id: AccountId::new("s2"),
            name: "Sasha Student".to_string(),
            email: "s2@praxis.example".to_string(),
            role: Role::Student,
        })
        .unwrap();
    service
        .register_account(RegistrationRequest {
            id: AccountId::new("l1"),
            name: "Dr. Lecturer".to_string(),
            email: "l1@praxis.example".to_string(),
            role: Role::Lecturer,
        })
        .unwrap();

    service
}

fn s1() -> StudentId {
    StudentId::new("s1")
}

fn l1() -> LecturerId {
    LecturerId::new("l1")
}

fn fill_fields() -> FieldUpdates {
    FieldUpdates {
        deliverable_link: Some("https://github.com/s1/p1".to_string()),
        impact_statement: Some("Analyzed X, improved Y by 10%".to_string()),
    }
}

#[tokio::test]
async fn start_toggle_and_premature_submit() {
    let service = service();

    // Scenario 1: start, toggle on then off, submit fails on the link
    let sub = service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();
    assert_eq!(sub.status, SubmissionStatus::InProgress);

    let d1 = DeliverableId::new("d1");
    service.toggle_deliverable(&s1(), &sub.id, &d1).await.unwrap();
    let toggled = service.toggle_deliverable(&s1(), &sub.id, &d1).await.unwrap();
    assert!(toggled.completed_deliverables.is_empty());

    let err = service.submit(&s1(), &sub.id).await.unwrap_err();
    assert!(matches!(err, SprintError::MissingDeliverable));
}

#[tokio::test]
async fn feedback_gate_blocks_submit_until_revealed() {
    let service = service();
    let sub = service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();

    // Scenario 2: fields filled, feedback unread
    service.update_fields(&s1(), &sub.id, fill_fields()).await.unwrap();
    let err = service.submit(&s1(), &sub.id).await.unwrap_err();
    assert!(matches!(err, SprintError::FeedbackNotReviewed));

    // The feedback text itself is gated the same way
    let err = service.stakeholder_feedback(&s1(), &sub.id).await.unwrap_err();
    assert!(matches!(err, SprintError::FeedbackNotReviewed));

    // Scenario 3: reveal, then submit succeeds
    service.reveal_feedback(&s1(), &sub.id).await.unwrap();
    let feedback = service.stakeholder_feedback(&s1(), &sub.id).await.unwrap();
    assert_eq!(feedback, "The CFO wants CSV export.");

    let submitted = service.submit(&s1(), &sub.id).await.unwrap();
    assert_eq!(submitted.status, SubmissionStatus::Submitted);
    assert!(submitted.submitted_at.is_some());
}

#[tokio::test]
async fn approval_attaches_certificate_and_is_single_shot() {
    let service = service();
    let sub = service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();
    service.update_fields(&s1(), &sub.id, fill_fields()).await.unwrap();
    service.reveal_feedback(&s1(), &sub.id).await.unwrap();
    service.submit(&s1(), &sub.id).await.unwrap();

    // Scenario 4: approve with certificate
    let (recorded, updated) = service
        .verify(
            &l1(),
            &sub.id,
            IntegrityAttestations::all(),
            ReviewDecision::approve("Strong work").with_certificate(CertificateId::new("cert-42")),
        )
        .await
        .unwrap();
    assert!(recorded.approved);
    assert_eq!(updated.status, SubmissionStatus::Verified);
    assert_eq!(updated.certificate_id, Some(CertificateId::new("cert-42")));

    let err = service
        .verify(
            &l1(),
            &sub.id,
            IntegrityAttestations::all(),
            ReviewDecision::approve("Again"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SprintError::AlreadyVerified(_)));

    // The record is queryable by the lecturer
    let found = service.get_verification(&l1(), &sub.id).await.unwrap();
    assert_eq!(found.unwrap().id, recorded.id);
}

#[tokio::test]
async fn rejection_without_full_attestations_changes_nothing() {
    let service = service();
    let sub = service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();
    service.update_fields(&s1(), &sub.id, fill_fields()).await.unwrap();
    service.reveal_feedback(&s1(), &sub.id).await.unwrap();
    service.submit(&s1(), &sub.id).await.unwrap();

    // Scenario 5: rejection is not an attestation bypass
    let partial = IntegrityAttestations {
        functionality_verified: false,
        skill_level_verified: true,
        original_work_verified: true,
    };
    let err = service
        .verify(&l1(), &sub.id, partial, ReviewDecision::reject("no"))
        .await
        .unwrap_err();
    assert!(matches!(err, SprintError::IntegrityChecksIncomplete));

    let snapshot = service
        .get_submission(&Actor::Lecturer(l1()), &sub.id)
        .await
        .unwrap();
    assert_eq!(snapshot.status, SubmissionStatus::Submitted);
}

#[tokio::test]
async fn rejected_submissions_are_terminal() {
    let service = service();
    let sub = service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();
    service.update_fields(&s1(), &sub.id, fill_fields()).await.unwrap();
    service.reveal_feedback(&s1(), &sub.id).await.unwrap();
    service.submit(&s1(), &sub.id).await.unwrap();

    service
        .verify(
            &l1(),
            &sub.id,
            IntegrityAttestations::all(),
            ReviewDecision::reject("Requirements unmet"),
        )
        .await
        .unwrap();

    // No mutation succeeds after the terminal transition
    let err = service.submit(&s1(), &sub.id).await.unwrap_err();
    assert!(matches!(err, SprintError::InvalidTransition(_)));
    let err = service
        .update_fields(&s1(), &sub.id, fill_fields())
        .await
        .unwrap_err();
    assert!(matches!(err, SprintError::InvalidTransition(_)));

    // There is no re-open path: starting again returns the rejected record
    let again = service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();
    assert_eq!(again.id, sub.id);
    assert_eq!(again.status, SubmissionStatus::Rejected);
}

#[tokio::test]
async fn pair_status_query_reports_not_started() {
    let service = service();
    let actor = Actor::Student(s1());

    let before = service
        .status_for(&actor, &ProjectId::new("p1"), &s1())
        .await
        .unwrap();
    assert_eq!(before, TrackedStatus::NotStarted);

    service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();
    let after = service
        .status_for(&actor, &ProjectId::new("p1"), &s1())
        .await
        .unwrap();
    assert_eq!(
        after,
        TrackedStatus::Recorded(SubmissionStatus::InProgress)
    );
}

#[tokio::test]
async fn role_and_ownership_checks() {
    let service = service();
    let sub = service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();

    // A lecturer cannot run student operations
    let err = service
        .start_sprint(&StudentId::new("l1"), &ProjectId::new("p1"))
        .await
        .unwrap_err();
    assert!(matches!(err, SprintError::Unauthorized(_)));

    // A student cannot verify
    let err = service
        .verify(
            &LecturerId::new("s1"),
            &sub.id,
            IntegrityAttestations::all(),
            ReviewDecision::approve("self-serve"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SprintError::Unauthorized(_)));

    // Another student cannot read the submission; a lecturer can
    let err = service
        .get_submission(&Actor::Student(StudentId::new("s2")), &sub.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SprintError::Unauthorized(_)));
    assert!(service
        .get_submission(&Actor::Lecturer(l1()), &sub.id)
        .await
        .is_ok());

    // Unregistered accounts are rejected outright
    let err = service
        .start_sprint(&StudentId::new("ghost"), &ProjectId::new("p1"))
        .await
        .unwrap_err();
    assert!(matches!(err, SprintError::Unauthorized(_)));
}

#[tokio::test]
async fn student_listing_is_scoped() {
    let service = service();
    service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();

    let own = service
        .submissions_for_student(&Actor::Student(s1()), &s1())
        .await
        .unwrap();
    assert_eq!(own.len(), 1);

    let err = service
        .submissions_for_student(&Actor::Student(StudentId::new("s2")), &s1())
        .await
        .unwrap_err();
    assert!(matches!(err, SprintError::Unauthorized(_)));

    let as_lecturer = service
        .submissions_for_student(&Actor::Lecturer(l1()), &s1())
        .await
        .unwrap();
    assert_eq!(as_lecturer.len(), 1);
}

#[tokio::test]
async fn verifying_in_progress_work_fails_not_submitted() {
    let service = service();
    let sub = service.start_sprint(&s1(), &ProjectId::new("p1")).await.unwrap();

    let err = service
        .verify(
            &l1(),
            &sub.id,
            IntegrityAttestations::all(),
            ReviewDecision::approve("too early"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SprintError::NotSubmitted(_)));
}
