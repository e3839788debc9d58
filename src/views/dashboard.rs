use chrono::{Local, NaiveDate};

use crate::reconcile::{self, TaskBuckets};
use crate::views::BoardState;

#[derive(Debug, Clone)]
pub struct DeadlinePreview {
    pub task_id: String,
    pub title: String,
    pub due_date: NaiveDate,
    /// Days between today and the due date; negative when overdue.
    pub days_until: i64,
}

/// Everything the dashboard renders: progress stats, the three task tabs
/// and the next-deadline card.
#[derive(Debug)]
pub struct DashboardSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub buckets: TaskBuckets,
    pub next_deadline: Option<DeadlinePreview>,
    pub loaded: bool,
}

pub fn summarize(state: &BoardState) -> DashboardSummary {
    summarize_at(state, Local::now().date_naive())
}

/// Same as `summarize` with an explicit "today", so days-until is testable.
pub fn summarize_at(state: &BoardState, today: NaiveDate) -> DashboardSummary {
    let next_deadline = reconcile::next_deadline(&state.effective).and_then(|task| {
        let due_date = task.due_date()?;
        Some(DeadlinePreview {
            task_id: task.task.id.clone(),
            title: task.task.title.clone(),
            due_date,
            days_until: (due_date - today).num_days(),
        })
    });

    DashboardSummary {
        total: state.effective.len(),
        completed: reconcile::completed_count(&state.effective),
        in_progress: reconcile::in_progress_count(&state.effective),
        buckets: reconcile::partition(&state.effective),
        next_deadline,
        loaded: state.loaded,
    }
}
