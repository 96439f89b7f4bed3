// File: src/model/adapter.rs
// Normalizes raw documents exported by the previous storage backend into
// model records. Every legacy field-name fallback chain lives here and
// nowhere else; the schedule core only ever sees canonical dates.
use crate::model::item::{Application, ApplicationStatus, InterviewRound, PlannerTask, ResumeVersion};
use crate::schedule::{Bucket, dates};
use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

const APPLICATION_DEADLINE_KEYS: &[&str] = &["deadline", "docDeadline", "documentDeadline"];
const TASK_DUE_KEYS: &[&str] = &["dueDate", "deadline", "date"];
const INTERVIEW_DATE_KEYS: &[&str] = &["interviewAt", "interviewDate", "scheduledAt"];
const BUCKET_KEYS: &[&str] = &["bucket", "tab", "section"];

/// Everything recovered from one exported workspace document.
#[derive(Debug, Default)]
pub struct ImportedWorkspace {
    pub applications: Vec<Application>,
    pub tasks: Vec<PlannerTask>,
    pub interviews: Vec<InterviewRound>,
    pub resumes: Vec<ResumeVersion>,
}

impl ImportedWorkspace {
    pub fn record_count(&self) -> usize {
        self.applications.len() + self.tasks.len() + self.interviews.len() + self.resumes.len()
    }
}

fn string_field<'a>(doc: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|k| doc.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First present date key wins, parsed or not: `a ?? b` in the old clients
/// stopped at the first non-null field, so a malformed primary value must
/// not fall through to an alternate key.
fn date_field(doc: &Value, keys: &[&str]) -> Option<NaiveDate> {
    keys.iter()
        .find_map(|k| doc.get(*k).and_then(Value::as_str))
        .and_then(dates::parse_ymd)
}

fn bool_field(doc: &Value, keys: &[&str]) -> bool {
    for key in keys {
        match doc.get(*key) {
            Some(Value::Bool(b)) => return *b,
            Some(Value::String(s)) => return s.eq_ignore_ascii_case("true"),
            _ => {}
        }
    }
    false
}

/// Creation timestamps appear as integer millis, float millis, digit
/// strings, or `{seconds}` / `{_seconds}` objects depending on which client
/// wrote the record. Anything else reads as 0 (oldest).
fn created_at_field(doc: &Value) -> i64 {
    match doc.get("createdAt") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Object(map)) => map
            .get("seconds")
            .or_else(|| map.get("_seconds"))
            .and_then(Value::as_i64)
            .map(|secs| secs * 1000)
            .unwrap_or(0),
        _ => 0,
    }
}

fn bucket_field(doc: &Value) -> Option<Bucket> {
    string_field(doc, BUCKET_KEYS).and_then(Bucket::from_legacy)
}

fn id_field(doc: &Value) -> String {
    doc.get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub fn application_from_doc(doc: &Value) -> Option<Application> {
    doc.as_object()?;
    Some(Application {
        id: id_field(doc),
        company: string_field(doc, &["company", "employer"])
            .unwrap_or("Unknown company")
            .to_string(),
        role: string_field(doc, &["role", "position", "title"])
            .unwrap_or("Untitled role")
            .to_string(),
        status: string_field(doc, &["status"])
            .map(ApplicationStatus::from_legacy)
            .unwrap_or(ApplicationStatus::Drafting),
        deadline: date_field(doc, APPLICATION_DEADLINE_KEYS),
        bucket: bucket_field(doc),
        created_at_millis: created_at_field(doc),
        applied_on: date_field(doc, &["appliedOn", "appliedAt"]),
        url: string_field(doc, &["url", "link"]).map(str::to_string),
        resume_id: string_field(doc, &["resumeId", "resumeVersionId"]).map(str::to_string),
        notes: string_field(doc, &["notes", "memo"]).unwrap_or_default().to_string(),
    })
}

pub fn planner_task_from_doc(doc: &Value) -> Option<PlannerTask> {
    doc.as_object()?;
    Some(PlannerTask {
        id: id_field(doc),
        title: string_field(doc, &["title", "name"])
            .unwrap_or("Untitled")
            .to_string(),
        done: bool_field(doc, &["done", "completed"]),
        due: date_field(doc, TASK_DUE_KEYS),
        bucket: bucket_field(doc),
        created_at_millis: created_at_field(doc),
        legacy_label: string_field(doc, &["ddayLabel"]).map(str::to_string),
        notes: string_field(doc, &["notes", "memo"]).unwrap_or_default().to_string(),
    })
}

pub fn interview_from_doc(doc: &Value) -> Option<InterviewRound> {
    doc.as_object()?;
    Some(InterviewRound {
        id: id_field(doc),
        application_id: string_field(doc, &["applicationId", "appId"])
            .unwrap_or_default()
            .to_string(),
        stage: string_field(doc, &["round", "stage", "title"])
            .unwrap_or("Interview")
            .to_string(),
        scheduled_on: date_field(doc, INTERVIEW_DATE_KEYS),
        done: bool_field(doc, &["done", "completed"]),
        created_at_millis: created_at_field(doc),
    })
}

pub fn resume_from_doc(doc: &Value) -> Option<ResumeVersion> {
    doc.as_object()?;
    Some(ResumeVersion {
        id: id_field(doc),
        name: string_field(doc, &["name", "title"])
            .unwrap_or("Untitled résumé")
            .to_string(),
        file_name: string_field(doc, &["fileName", "file"]).map(str::to_string),
        created_at_millis: created_at_field(doc),
        notes: string_field(doc, &["notes", "memo"]).unwrap_or_default().to_string(),
    })
}

/// Reads one exported workspace: top-level arrays keyed by collection.
/// Entries that are not objects are skipped rather than failing the import.
pub fn workspace_from_export(root: &Value) -> ImportedWorkspace {
    fn collect<T>(root: &Value, keys: &[&str], convert: impl Fn(&Value) -> Option<T>) -> Vec<T> {
        keys.iter()
            .find_map(|k| root.get(*k).and_then(Value::as_array))
            .map(|docs| docs.iter().filter_map(&convert).collect())
            .unwrap_or_default()
    }

    ImportedWorkspace {
        applications: collect(root, &["applications"], application_from_doc),
        tasks: collect(root, &["tasks", "plannerTasks"], planner_task_from_doc),
        interviews: collect(root, &["interviews"], interview_from_doc),
        resumes: collect(root, &["resumes", "resumeVersions"], resume_from_doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deadline_fallback_chain_stops_at_first_key() {
        let doc = json!({
            "title": "Send portfolio",
            "dueDate": "garbage",
            "deadline": "2024-06-20"
        });
        // `dueDate` is present but malformed; the chain must not fall
        // through to `deadline`.
        let task = planner_task_from_doc(&doc).unwrap();
        assert_eq!(task.due, None);
    }

    #[test]
    fn test_created_at_variants() {
        assert_eq!(created_at_field(&json!({"createdAt": 1700000000000_i64})), 1700000000000);
        assert_eq!(created_at_field(&json!({"createdAt": "1700000000000"})), 1700000000000);
        assert_eq!(created_at_field(&json!({"createdAt": {"seconds": 1700000000}})), 1700000000000);
        assert_eq!(created_at_field(&json!({"createdAt": {"_seconds": 2}})), 2000);
        assert_eq!(created_at_field(&json!({"createdAt": null})), 0);
        assert_eq!(created_at_field(&json!({})), 0);
    }

    #[test]
    fn test_non_object_input_is_rejected() {
        assert!(planner_task_from_doc(&json!("just a string")).is_none());
        assert!(application_from_doc(&json!(42)).is_none());
        assert!(interview_from_doc(&json!(null)).is_none());
    }
}
