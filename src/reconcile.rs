//! Merges the task catalog with the viewing student's submissions into a
//! per-task effective status. Everything here is a pure function of its
//! inputs; the views re-run it whenever either collection or the viewer
//! identity changes.

use chrono::NaiveDate;

use crate::models::{Submission, SubmissionStatus, Task};

/// A task joined with the viewer's submission state. Recomputed on every
/// refresh, never persisted.
#[derive(Debug, Clone)]
pub struct EffectiveTask {
    pub task: Task,
    pub student_submission_status: Option<SubmissionStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Locked,
    Upcoming,
    Completed,
}

impl EffectiveTask {
    /// Total, non-overlapping classification. A graded submission counts as
    /// completed even when the task is still flagged locked.
    pub fn bucket(&self) -> Bucket {
        if self.student_submission_status == Some(SubmissionStatus::Graded) {
            Bucket::Completed
        } else if self.task.is_locked {
            Bucket::Locked
        } else {
            Bucket::Upcoming
        }
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_due_date(&self.task.due_date)
    }
}

#[derive(Debug, Default)]
pub struct TaskBuckets {
    pub upcoming: Vec<EffectiveTask>,
    pub locked: Vec<EffectiveTask>,
    pub completed: Vec<EffectiveTask>,
}

/// Left join of tasks against submissions on task id. Submissions whose
/// task id is not in the catalog are dropped; a task with no match keeps
/// `student_submission_status = None`.
pub fn reconcile(tasks: &[Task], submissions: &[Submission]) -> Vec<EffectiveTask> {
    tasks
        .iter()
        .map(|task| {
            let submission = submissions.iter().find(|s| s.task_id == task.id);
            EffectiveTask {
                task: task.clone(),
                student_submission_status: submission.map(|s| s.status),
            }
        })
        .collect()
}

/// Splits reconciled tasks into the three display buckets, preserving
/// catalog order within each bucket.
pub fn partition(effective: &[EffectiveTask]) -> TaskBuckets {
    let mut buckets = TaskBuckets::default();
    for task in effective {
        match task.bucket() {
            Bucket::Upcoming => buckets.upcoming.push(task.clone()),
            Bucket::Locked => buckets.locked.push(task.clone()),
            Bucket::Completed => buckets.completed.push(task.clone()),
        }
    }
    buckets
}

/// Strict `YYYY-MM-DD` parse. Anything else, including real-looking but
/// impossible dates like `2023-02-30`, is rejected rather than defaulted.
pub fn parse_due_date(due_date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(due_date, "%Y-%m-%d").ok()
}

/// The upcoming task with the soonest parseable due date. Ties keep catalog
/// order; tasks whose due date fails to parse are never candidates.
pub fn next_deadline(effective: &[EffectiveTask]) -> Option<&EffectiveTask> {
    let mut best: Option<(NaiveDate, &EffectiveTask)> = None;
    for task in effective {
        if task.bucket() != Bucket::Upcoming {
            continue;
        }
        let Some(date) = task.due_date() else {
            continue;
        };
        match &best {
            Some((best_date, _)) if *best_date <= date => {}
            _ => best = Some((date, task)),
        }
    }
    best.map(|(_, task)| task)
}

/// Count of graded tasks, used for progress tracking.
pub fn completed_count(effective: &[EffectiveTask]) -> usize {
    effective
        .iter()
        .filter(|t| t.student_submission_status == Some(SubmissionStatus::Graded))
        .count()
}

/// Count of tasks with a submission still awaiting review.
pub fn in_progress_count(effective: &[EffectiveTask]) -> usize {
    effective
        .iter()
        .filter(|t| t.student_submission_status == Some(SubmissionStatus::Pending))
        .count()
}
