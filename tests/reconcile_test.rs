mod common;

use chrono::NaiveDate;
use studypath_client::models::SubmissionStatus;
use studypath_client::reconcile::{
    next_deadline, parse_due_date, partition, reconcile, Bucket,
};

use common::{submission, task};

#[test]
fn reconcile_attaches_submission_status_by_task_id() {
    let tasks = vec![
        task("1", "Intro", "2025-04-15", false),
        task("2", "CSS", "2025-04-18", false),
    ];
    let submissions = vec![submission("s1", "2", "alex@school.edu", SubmissionStatus::Pending)];

    let effective = reconcile(&tasks, &submissions);

    assert_eq!(effective.len(), 2);
    assert_eq!(effective[0].student_submission_status, None);
    assert_eq!(
        effective[1].student_submission_status,
        Some(SubmissionStatus::Pending)
    );
}

#[test]
fn submission_for_unknown_task_is_ignored() {
    let tasks = vec![task("1", "Intro", "2025-04-15", false)];
    let submissions = vec![submission("s1", "99", "alex@school.edu", SubmissionStatus::Graded)];

    let effective = reconcile(&tasks, &submissions);

    assert_eq!(effective.len(), 1);
    assert_eq!(effective[0].task.id, "1");
    assert_eq!(effective[0].student_submission_status, None);
}

#[test]
fn partition_is_total_and_non_overlapping() {
    let tasks = vec![
        task("1", "a", "2025-04-15", false),
        task("2", "b", "2025-04-16", true),
        task("3", "c", "2025-04-17", false),
        task("4", "d", "2025-04-18", true),
    ];
    let submissions = vec![
        submission("s1", "3", "alex@school.edu", SubmissionStatus::Graded),
        submission("s2", "4", "alex@school.edu", SubmissionStatus::Graded),
        submission("s3", "1", "alex@school.edu", SubmissionStatus::Pending),
    ];

    let effective = reconcile(&tasks, &submissions);
    let buckets = partition(&effective);

    let total = buckets.upcoming.len() + buckets.locked.len() + buckets.completed.len();
    assert_eq!(total, effective.len());
    // Pending submission on an unlocked task stays upcoming.
    assert_eq!(buckets.upcoming.len(), 1);
    assert_eq!(buckets.locked.len(), 1);
    assert_eq!(buckets.completed.len(), 2);
}

#[test]
fn graded_overrides_lock_state() {
    let tasks = vec![task("1", "Locked but done", "2025-04-15", true)];
    let submissions = vec![submission("s1", "1", "alex@school.edu", SubmissionStatus::Graded)];

    let effective = reconcile(&tasks, &submissions);

    assert_eq!(effective[0].bucket(), Bucket::Completed);
}

#[test]
fn next_deadline_picks_minimum_parseable_date() {
    let tasks = vec![
        task("1", "a", "2025-04-20", false),
        task("2", "b", "2025-04-15", false),
        task("3", "c", "invalid", false),
        task("4", "d", "2025-04-18", false),
    ];
    let effective = reconcile(&tasks, &[]);

    let next = next_deadline(&effective).expect("a deadline");
    assert_eq!(next.task.id, "2");
    assert_eq!(next.task.due_date, "2025-04-15");
}

#[test]
fn next_deadline_tie_keeps_catalog_order() {
    let tasks = vec![
        task("1", "first", "2025-04-15", false),
        task("2", "second", "2025-04-15", false),
    ];
    let effective = reconcile(&tasks, &[]);

    assert_eq!(next_deadline(&effective).expect("a deadline").task.id, "1");
}

#[test]
fn next_deadline_skips_locked_and_graded() {
    let tasks = vec![
        task("1", "locked soon", "2025-04-10", true),
        task("2", "graded soon", "2025-04-11", false),
        task("3", "open later", "2025-04-20", false),
    ];
    let submissions = vec![submission("s1", "2", "alex@school.edu", SubmissionStatus::Graded)];
    let effective = reconcile(&tasks, &submissions);

    assert_eq!(next_deadline(&effective).expect("a deadline").task.id, "3");
}

#[test]
fn next_deadline_is_none_when_nothing_parses() {
    let tasks = vec![
        task("1", "a", "April 15, 2025", false),
        task("2", "b", "", false),
    ];
    let effective = reconcile(&tasks, &[]);

    assert!(next_deadline(&effective).is_none());
}

#[test]
fn due_date_parsing_is_strict() {
    assert_eq!(
        parse_due_date("2025-04-15"),
        NaiveDate::from_ymd_opt(2025, 4, 15)
    );
    assert_eq!(parse_due_date("2023-02-30"), None);
    assert_eq!(parse_due_date("04/15/2025"), None);
    assert_eq!(parse_due_date("April 15, 2025"), None);
    assert_eq!(parse_due_date(""), None);
}
