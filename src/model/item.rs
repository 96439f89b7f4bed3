// File: ./src/model/item.rs
use crate::schedule::{Bucket, TemporalRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;
use uuid::Uuid;

fn default_uid() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, EnumIter)]
pub enum ApplicationStatus {
    Drafting,
    Applied,
    Screening,
    Interviewing,
    Offer,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    /// Closed statuses count as "done" everywhere a completion flag is
    /// needed (sorting, dashboard tallies).
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected | Self::Withdrawn)
    }

    /// Maps the free-form status strings older clients stored. Unknown
    /// values land on `Drafting` rather than failing the record.
    pub fn from_legacy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "applied" | "submitted" => Self::Applied,
            "screening" | "screen" | "assessment" => Self::Screening,
            "interviewing" | "interview" => Self::Interviewing,
            "offer" | "offered" => Self::Offer,
            "accepted" | "hired" => Self::Accepted,
            "rejected" | "failed" => Self::Rejected,
            "withdrawn" | "cancelled" => Self::Withdrawn,
            _ => Self::Drafting,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Drafting => "Drafting",
            Self::Applied => "Applied",
            Self::Screening => "Screening",
            Self::Interviewing => "Interviewing",
            Self::Offer => "Offer",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Withdrawn => "Withdrawn",
        };
        write!(f, "{}", name)
    }
}

/// One tracked job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default = "default_uid")]
    pub id: String,
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    /// Document deadline driving bucket and countdown.
    pub deadline: Option<NaiveDate>,
    /// Caller-supplied bucket, honored only while no deadline is set.
    #[serde(default)]
    pub bucket: Option<Bucket>,
    #[serde(default)]
    pub created_at_millis: i64,
    pub applied_on: Option<NaiveDate>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl Application {
    pub fn new(company: &str, role: &str, created_at_millis: i64) -> Self {
        Self {
            id: default_uid(),
            company: company.to_string(),
            role: role.to_string(),
            status: ApplicationStatus::Drafting,
            deadline: None,
            bucket: None,
            created_at_millis,
            applied_on: None,
            url: None,
            resume_id: None,
            notes: String::new(),
        }
    }
}

impl TemporalRecord for Application {
    fn is_done(&self) -> bool {
        self.status.is_closed()
    }
    fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }
    fn explicit_bucket(&self) -> Option<Bucket> {
        self.bucket
    }
    fn created_at_millis(&self) -> i64 {
        self.created_at_millis
    }
    fn title(&self) -> &str {
        &self.role
    }
}

/// One planner entry: a small dated or dateless to-do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerTask {
    #[serde(default = "default_uid")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub done: bool,
    pub due: Option<NaiveDate>,
    #[serde(default)]
    pub bucket: Option<Bucket>,
    #[serde(default)]
    pub created_at_millis: i64,
    /// Countdown text the old client stored; shown only when no due date
    /// survived normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_label: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl PlannerTask {
    pub fn new(title: &str, created_at_millis: i64) -> Self {
        Self {
            id: default_uid(),
            title: title.to_string(),
            done: false,
            due: None,
            bucket: None,
            created_at_millis,
            legacy_label: None,
            notes: String::new(),
        }
    }
}

impl TemporalRecord for PlannerTask {
    fn is_done(&self) -> bool {
        self.done
    }
    fn deadline(&self) -> Option<NaiveDate> {
        self.due
    }
    fn explicit_bucket(&self) -> Option<Bucket> {
        self.bucket
    }
    fn created_at_millis(&self) -> i64 {
        self.created_at_millis
    }
    fn title(&self) -> &str {
        &self.title
    }
}

/// One interview round attached to an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRound {
    #[serde(default = "default_uid")]
    pub id: String,
    pub application_id: String,
    pub stage: String,
    pub scheduled_on: Option<NaiveDate>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub created_at_millis: i64,
}

impl InterviewRound {
    pub fn new(application_id: &str, stage: &str, created_at_millis: i64) -> Self {
        Self {
            id: default_uid(),
            application_id: application_id.to_string(),
            stage: stage.to_string(),
            scheduled_on: None,
            done: false,
            created_at_millis,
        }
    }
}

impl TemporalRecord for InterviewRound {
    fn is_done(&self) -> bool {
        self.done
    }
    fn deadline(&self) -> Option<NaiveDate> {
        self.scheduled_on
    }
    fn explicit_bucket(&self) -> Option<Bucket> {
        None
    }
    fn created_at_millis(&self) -> i64 {
        self.created_at_millis
    }
    fn title(&self) -> &str {
        &self.stage
    }
}

/// One stored résumé revision. Not a dated record; lists sort newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeVersion {
    #[serde(default = "default_uid")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub created_at_millis: i64,
    #[serde(default)]
    pub notes: String,
}

impl ResumeVersion {
    pub fn new(name: &str, created_at_millis: i64) -> Self {
        Self {
            id: default_uid(),
            name: name.to_string(),
            file_name: None,
            created_at_millis,
            notes: String::new(),
        }
    }
}
