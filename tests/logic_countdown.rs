// Tests for countdown labels and their display fallback.
use chrono::NaiveDate;
use joblog::model::PlannerTask;
use joblog::model::display::RecordDisplay;
use joblog::schedule::{countdown_label, dates};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_exact_values_with_pinned_now() {
    let today = date(2024, 6, 15);

    assert_eq!(countdown_label(Some(date(2024, 6, 15)), today), "D-DAY");
    assert_eq!(countdown_label(Some(date(2024, 6, 18)), today), "D-3");
    assert_eq!(countdown_label(Some(date(2024, 6, 10)), today), "D+5");
    assert_eq!(countdown_label(Some(date(2024, 6, 16)), today), "D-1");
    assert_eq!(countdown_label(Some(date(2024, 6, 14)), today), "D+1");
}

#[test]
fn test_missing_deadline_is_empty() {
    let today = date(2024, 6, 15);
    assert_eq!(countdown_label(None, today), "");
}

#[test]
fn test_labels_cross_month_and_year_boundaries() {
    let today = date(2024, 12, 30);
    assert_eq!(countdown_label(Some(date(2025, 1, 2)), today), "D-3");
    assert_eq!(countdown_label(Some(date(2024, 11, 30)), today), "D+30");
}

#[test]
fn test_malformed_input_degrades_to_empty_label() {
    let today = date(2024, 6, 15);
    for bad in ["", "06/15/2024", "2024-6-15", "soon", "2024-00-01"] {
        let parsed = dates::parse_ymd(bad);
        assert_eq!(parsed, None, "{:?} should not parse", bad);
        assert_eq!(countdown_label(parsed, today), "");
    }
}

#[test]
fn test_label_is_idempotent() {
    let today = date(2024, 6, 15);
    let due = Some(date(2024, 6, 18));
    assert_eq!(countdown_label(due, today), countdown_label(due, today));
}

#[test]
fn test_display_falls_back_to_stored_legacy_label() {
    let today = date(2024, 6, 15);

    let mut t = PlannerTask::new("Imported without a date", 0);
    t.legacy_label = Some("D-7".to_string());
    assert_eq!(t.countdown_text(today), "D-7");

    // A parseable date always beats the stored label.
    t.due = Some(date(2024, 6, 16));
    assert_eq!(t.countdown_text(today), "D-1");
}
