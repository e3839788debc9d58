//! Due-date helpers for the learning schedule page. Only strictly valid
//! `YYYY-MM-DD` dates are highlighted; anything unparseable is left off the
//! calendar instead of defaulting to today.

use chrono::NaiveDate;

use crate::models::Task;
use crate::reconcile::parse_due_date;

/// Dates to highlight, paired with the task titles due that day. Order
/// follows the catalog.
pub fn due_dates(tasks: &[Task]) -> Vec<(NaiveDate, String)> {
    tasks
        .iter()
        .filter_map(|task| parse_due_date(&task.due_date).map(|date| (date, task.title.clone())))
        .collect()
}

/// Tasks due on the selected day.
pub fn tasks_due_on<'a>(tasks: &'a [Task], day: NaiveDate) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| parse_due_date(&task.due_date) == Some(day))
        .collect()
}
