// Tests for legacy export normalization: the adapter is the only place
// alternate field names are resolved.
use joblog::model::ApplicationStatus;
use joblog::model::adapter::{
    application_from_doc, interview_from_doc, planner_task_from_doc, workspace_from_export,
};
use joblog::schedule::Bucket;
use serde_json::json;

#[test]
fn test_application_deadline_fallback_chain() {
    let doc = json!({
        "id": "app-1",
        "company": "Acme",
        "role": "Backend engineer",
        "status": "interview",
        "documentDeadline": "2024-06-20"
    });
    let app = application_from_doc(&doc).unwrap();
    assert_eq!(app.deadline, joblog::schedule::dates::parse_ymd("2024-06-20"));
    assert_eq!(app.status, ApplicationStatus::Interviewing);

    // The newest field name shadows the older ones.
    let doc = json!({
        "company": "Acme",
        "role": "Backend engineer",
        "deadline": "2024-06-01",
        "docDeadline": "2024-06-10",
        "documentDeadline": "2024-06-20"
    });
    let app = application_from_doc(&doc).unwrap();
    assert_eq!(app.deadline, joblog::schedule::dates::parse_ymd("2024-06-01"));
}

#[test]
fn test_role_falls_back_through_position_and_title() {
    let doc = json!({"company": "Acme", "position": "Data engineer"});
    assert_eq!(application_from_doc(&doc).unwrap().role, "Data engineer");

    let doc = json!({"company": "Acme", "title": "SRE"});
    assert_eq!(application_from_doc(&doc).unwrap().role, "SRE");

    let doc = json!({"company": "Acme"});
    assert_eq!(application_from_doc(&doc).unwrap().role, "Untitled role");
}

#[test]
fn test_task_bucket_and_label_survive_import() {
    let doc = json!({
        "title": "Ship take-home",
        "bucket": "week",
        "ddayLabel": "D-4",
        "completed": "true",
        "createdAt": {"_seconds": 1700000000}
    });
    let task = planner_task_from_doc(&doc).unwrap();
    assert_eq!(task.bucket, Some(Bucket::Upcoming));
    assert_eq!(task.legacy_label.as_deref(), Some("D-4"));
    assert!(task.done);
    assert_eq!(task.created_at_millis, 1_700_000_000_000);
    assert_eq!(task.due, None);
}

#[test]
fn test_malformed_date_degrades_to_none_not_error() {
    let doc = json!({"title": "Bad date", "dueDate": "2024-6-1"});
    let task = planner_task_from_doc(&doc).unwrap();
    assert_eq!(task.due, None);
}

#[test]
fn test_interview_date_fallback() {
    let doc = json!({
        "applicationId": "app-1",
        "round": "Phone screen",
        "interviewDate": "2024-06-18"
    });
    let round = interview_from_doc(&doc).unwrap();
    assert_eq!(round.application_id, "app-1");
    assert_eq!(round.stage, "Phone screen");
    assert_eq!(
        round.scheduled_on,
        joblog::schedule::dates::parse_ymd("2024-06-18")
    );

    // `interviewAt` shadows `interviewDate`.
    let doc = json!({
        "appId": "app-1",
        "interviewAt": "2024-06-19",
        "interviewDate": "2024-06-25"
    });
    let round = interview_from_doc(&doc).unwrap();
    assert_eq!(
        round.scheduled_on,
        joblog::schedule::dates::parse_ymd("2024-06-19")
    );
}

#[test]
fn test_documents_without_id_get_a_fresh_one() {
    let a = planner_task_from_doc(&json!({"title": "One"})).unwrap();
    let b = planner_task_from_doc(&json!({"title": "Two"})).unwrap();
    assert!(!a.id.is_empty());
    assert_ne!(a.id, b.id);
}

#[test]
fn test_workspace_export_skips_junk_entries() {
    let export = json!({
        "applications": [
            {"company": "Acme", "role": "Backend engineer"},
            "not an object",
            42
        ],
        "plannerTasks": [
            {"title": "Prep", "dueDate": "2024-06-18"}
        ],
        "resumes": [
            {"name": "v3 — systems focus", "fileName": "resume_v3.pdf"}
        ]
    });

    let imported = workspace_from_export(&export);
    assert_eq!(imported.applications.len(), 1);
    assert_eq!(imported.tasks.len(), 1);
    assert_eq!(imported.interviews.len(), 0);
    assert_eq!(imported.resumes.len(), 1);
    assert_eq!(imported.record_count(), 3);
}

#[test]
fn test_unknown_status_string_lands_on_drafting() {
    let doc = json!({"company": "Acme", "role": "X", "status": "ghosted???"});
    assert_eq!(
        application_from_doc(&doc).unwrap().status,
        ApplicationStatus::Drafting
    );
}
