// File: ./src/model/display.rs
use crate::model::item::{Application, ApplicationStatus, InterviewRound, PlannerTask};
use crate::schedule::{TemporalRecord, countdown_label};
use chrono::NaiveDate;

/// Presentation helpers shared by every list renderer.
pub trait RecordDisplay {
    fn status_symbol(&self) -> &'static str;
    fn countdown_text(&self, today: NaiveDate) -> String;
}

impl RecordDisplay for PlannerTask {
    fn status_symbol(&self) -> &'static str {
        if self.done { "[✔]" } else { "[ ]" }
    }

    fn countdown_text(&self, today: NaiveDate) -> String {
        let label = countdown_label(self.deadline(), today);
        if label.is_empty() {
            // Imported records without a parseable date may still carry the
            // label the old client rendered from.
            return self.legacy_label.clone().unwrap_or_default();
        }
        label
    }
}

impl RecordDisplay for Application {
    fn status_symbol(&self) -> &'static str {
        match self.status {
            ApplicationStatus::Accepted => "[✔]",
            ApplicationStatus::Rejected => "[✘]",
            ApplicationStatus::Withdrawn => "[–]",
            ApplicationStatus::Offer => "[★]",
            ApplicationStatus::Screening | ApplicationStatus::Interviewing => "[▶]",
            ApplicationStatus::Drafting | ApplicationStatus::Applied => "[ ]",
        }
    }

    fn countdown_text(&self, today: NaiveDate) -> String {
        countdown_label(self.deadline(), today)
    }
}

impl RecordDisplay for InterviewRound {
    fn status_symbol(&self) -> &'static str {
        if self.done { "[✔]" } else { "[ ]" }
    }

    fn countdown_text(&self, today: NaiveDate) -> String {
        countdown_label(self.deadline(), today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_label_used_only_without_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let mut task = PlannerTask::new("Follow up", 0);
        task.legacy_label = Some("D-2".to_string());
        assert_eq!(task.countdown_text(today), "D-2");

        task.due = NaiveDate::from_ymd_opt(2024, 6, 18);
        assert_eq!(task.countdown_text(today), "D-3");
    }

    #[test]
    fn test_dateless_task_without_label_is_blank() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let task = PlannerTask::new("Someday", 0);
        assert_eq!(task.countdown_text(today), "");
    }
}
