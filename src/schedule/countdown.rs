// Countdown labels and the display ordering over records.
use super::TemporalRecord;
use super::dates::days_between;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Renders the human countdown for a deadline relative to `today`.
///
/// `""` when there is no deadline (callers fall back to a stored legacy
/// label if they have one), `"D-DAY"` on the day itself, `"D-<n>"` before
/// it, `"D+<n>"` after it. Whole calendar days on both sides, so the label
/// never flips within a day regardless of time-of-day.
pub fn countdown_label(deadline: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(due) = deadline else {
        return String::new();
    };
    let diff = days_between(today, due);
    if diff == 0 {
        "D-DAY".to_string()
    } else if diff > 0 {
        format!("D-{}", diff)
    } else {
        format!("D+{}", -diff)
    }
}

/// Total order used for every record list.
///
/// Incomplete before complete, then soonest deadline first (a record with no
/// deadline sorts after any record that has one), then newest created, then
/// title. Callers sort with `sort_by`, which is stable, so records tied on
/// all four keys keep their incoming order.
pub fn compare_for_display<R: TemporalRecord>(a: &R, b: &R) -> Ordering {
    a.is_done()
        .cmp(&b.is_done())
        .then_with(|| match (a.deadline(), b.deadline()) {
            (Some(d1), Some(d2)) => d1.cmp(&d2),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at_millis().cmp(&a.created_at_millis()))
        .then_with(|| a.title().cmp(b.title()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Bucket;

    struct Probe {
        done: bool,
        deadline: Option<NaiveDate>,
        created: i64,
        title: &'static str,
    }

    impl TemporalRecord for Probe {
        fn is_done(&self) -> bool {
            self.done
        }
        fn deadline(&self) -> Option<NaiveDate> {
            self.deadline
        }
        fn explicit_bucket(&self) -> Option<Bucket> {
            None
        }
        fn created_at_millis(&self) -> i64 {
            self.created
        }
        fn title(&self) -> &str {
            self.title
        }
    }

    fn probe(title: &'static str) -> Probe {
        Probe {
            done: false,
            deadline: None,
            created: 0,
            title,
        }
    }

    #[test]
    fn test_label_fixed_now() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(countdown_label(NaiveDate::from_ymd_opt(2024, 6, 15), today), "D-DAY");
        assert_eq!(countdown_label(NaiveDate::from_ymd_opt(2024, 6, 18), today), "D-3");
        assert_eq!(countdown_label(NaiveDate::from_ymd_opt(2024, 6, 10), today), "D+5");
        assert_eq!(countdown_label(None, today), "");
    }

    #[test]
    fn test_created_at_breaks_ties_newest_first() {
        let mut a = probe("A");
        a.created = 100;
        let mut b = probe("B");
        b.created = 200;
        assert_eq!(compare_for_display(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_title_is_final_tiebreaker() {
        let a = probe("Alpha");
        let b = probe("Beta");
        assert_eq!(compare_for_display(&a, &b), Ordering::Less);
        assert_eq!(compare_for_display(&a, &a), Ordering::Equal);
    }
}
