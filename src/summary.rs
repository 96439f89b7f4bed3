// Dashboard aggregates derived from a store snapshot.
use crate::schedule::{Bucket, TemporalRecord, countdown_label, resolve_bucket};
use crate::store::JobStore;
use chrono::{Days, NaiveDate};

/// One approaching-deadline row on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineRow {
    pub title: String,
    pub label: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub open_applications: usize,
    pub closed_applications: usize,
    pub tasks_today: usize,
    pub tasks_upcoming: usize,
    pub tasks_overdue: usize,
    pub pending_interviews: usize,
    pub next_deadlines: Vec<DeadlineRow>,
}

impl DashboardSummary {
    /// Pure derivation over the store; `tasks_overdue` counts a subset of
    /// `tasks_today` (overdue work folds into the today bucket).
    pub fn compute(store: &JobStore, today: NaiveDate, window_days: u32) -> Self {
        let mut summary = Self::default();

        for application in &store.applications {
            if application.status.is_closed() {
                summary.closed_applications += 1;
            } else {
                summary.open_applications += 1;
            }
        }

        for task in &store.tasks {
            if task.done {
                continue;
            }
            match resolve_bucket(task, today) {
                Bucket::Today => {
                    summary.tasks_today += 1;
                    if let Some(due) = task.due
                        && due < today
                    {
                        summary.tasks_overdue += 1;
                    }
                }
                Bucket::Upcoming => summary.tasks_upcoming += 1,
            }
        }

        summary.pending_interviews = store.upcoming_interviews(today, window_days).len();
        summary.next_deadlines = next_deadlines(store, today, window_days);
        summary
    }
}

/// Incomplete dated records inside the window, soonest first. Applications
/// contribute their document deadline, tasks their due date.
fn next_deadlines(store: &JobStore, today: NaiveDate, window_days: u32) -> Vec<DeadlineRow> {
    let end = today
        .checked_add_days(Days::new(window_days as u64))
        .unwrap_or(today);

    let mut rows: Vec<DeadlineRow> = Vec::new();
    let mut push = |record: &dyn TemporalRecord| {
        if record.is_done() {
            return;
        }
        if let Some(date) = record.deadline()
            && date >= today
            && date < end
        {
            rows.push(DeadlineRow {
                title: record.title().to_string(),
                label: countdown_label(Some(date), today),
                date,
            });
        }
    };

    for application in &store.applications {
        push(application);
    }
    for task in &store.tasks {
        push(task);
    }

    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
    rows
}
