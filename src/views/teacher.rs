//! Teacher-side view models: task management, submission review and the
//! teacher dashboard counters.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::api::{PlatformApi, SubmissionFilter};
use crate::forms::TaskForm;
use crate::models::{GradeRequest, Submission, SubmissionStatus, Task, UpdateTaskRequest};
use crate::views::{Generation, Notice, Notifier};

#[derive(Debug, Clone, Default)]
pub struct ManageTasksState {
    pub tasks: Vec<Task>,
    pub loaded: bool,
}

/// Create/edit/delete over the task catalog.
pub struct ManageTasksView {
    api: Arc<dyn PlatformApi>,
    notifier: Arc<dyn Notifier>,
    generation: Generation,
    state: Mutex<ManageTasksState>,
}

impl ManageTasksView {
    pub fn new(api: Arc<dyn PlatformApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            generation: Generation::new(),
            state: Mutex::new(ManageTasksState::default()),
        }
    }

    pub async fn refresh(&self) {
        let generation = self.generation.begin();

        let tasks = match self.api.list_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!("failed to load tasks: {}", e);
                self.notifier.notify(Notice::error("Could not load tasks."));
                Vec::new()
            }
        };

        if !self.generation.is_current(generation) {
            debug!("discarding stale task list refresh");
            return;
        }

        let mut state = self.state.lock().await;
        if !self.generation.is_current(generation) {
            debug!("discarding stale task list refresh");
            return;
        }
        *state = ManageTasksState {
            tasks,
            loaded: true,
        };
    }

    /// Validates the form and creates the task. Validation failures block
    /// the request entirely; no partial submission happens.
    pub async fn create_task(&self, form: &TaskForm) -> Option<Task> {
        let request = match form.validate() {
            Ok(request) => request,
            Err(errors) => {
                for error in &errors {
                    self.notifier
                        .notify(Notice::error(format!("{}: {}", error.field, error.message)));
                }
                return None;
            }
        };

        match self.api.create_task(&request).await {
            Ok(task) => {
                self.state.lock().await.tasks.push(task.clone());
                self.notifier
                    .notify(Notice::info("Task created", task.title.clone()));
                Some(task)
            }
            Err(e) => {
                tracing::warn!("failed to create task: {}", e);
                self.notifier
                    .notify(Notice::error("Could not create the task."));
                None
            }
        }
    }

    pub async fn update_task(&self, id: &str, request: &UpdateTaskRequest) -> Option<Task> {
        match self.api.update_task(id, request).await {
            Ok(task) => {
                let mut state = self.state.lock().await;
                if let Some(slot) = state.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = task.clone();
                }
                Some(task)
            }
            Err(e) => {
                tracing::warn!("failed to update task {}: {}", id, e);
                self.notifier
                    .notify(Notice::error("Could not update the task."));
                None
            }
        }
    }

    pub async fn delete_task(&self, id: &str) -> bool {
        match self.api.delete_task(id).await {
            Ok(()) => {
                self.state.lock().await.tasks.retain(|t| t.id != id);
                true
            }
            Err(e) => {
                tracing::warn!("failed to delete task {}: {}", id, e);
                self.notifier
                    .notify(Notice::error("Could not delete the task."));
                false
            }
        }
    }

    pub async fn snapshot(&self) -> ManageTasksState {
        self.state.lock().await.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionReviewState {
    pub submissions: Vec<Submission>,
    pub loaded: bool,
}

/// The grading page: all submissions, split into pending and graded.
pub struct SubmissionReviewView {
    api: Arc<dyn PlatformApi>,
    notifier: Arc<dyn Notifier>,
    generation: Generation,
    state: Mutex<SubmissionReviewState>,
}

impl SubmissionReviewView {
    pub fn new(api: Arc<dyn PlatformApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            generation: Generation::new(),
            state: Mutex::new(SubmissionReviewState::default()),
        }
    }

    /// Loads submissions, optionally narrowed to a single task.
    pub async fn refresh(&self, task_id: Option<&str>) {
        let generation = self.generation.begin();

        let filter = match task_id {
            Some(id) => SubmissionFilter::for_task(id),
            None => SubmissionFilter::default(),
        };
        let submissions = match self.api.list_submissions(&filter).await {
            Ok(submissions) => submissions,
            Err(e) => {
                tracing::warn!("failed to load submissions: {}", e);
                self.notifier
                    .notify(Notice::error("Could not load submissions."));
                Vec::new()
            }
        };

        if !self.generation.is_current(generation) {
            debug!("discarding stale submission review refresh");
            return;
        }

        let mut state = self.state.lock().await;
        if !self.generation.is_current(generation) {
            debug!("discarding stale submission review refresh");
            return;
        }
        *state = SubmissionReviewState {
            submissions,
            loaded: true,
        };
    }

    /// Grades a pending submission: transitions it to graded with the given
    /// grade and feedback, then swaps the updated record into local state.
    pub async fn grade(&self, submission_id: &str, grade: &str, feedback: &str) -> bool {
        let request = GradeRequest {
            feedback: feedback.to_string(),
            grade: grade.to_string(),
            status: SubmissionStatus::Graded,
        };

        match self.api.grade_submission(submission_id, &request).await {
            Ok(updated) => {
                let mut state = self.state.lock().await;
                if let Some(slot) = state
                    .submissions
                    .iter_mut()
                    .find(|s| s.id == submission_id)
                {
                    *slot = updated;
                }
                self.notifier
                    .notify(Notice::info("Submission graded", submission_id.to_string()));
                true
            }
            Err(e) => {
                tracing::warn!("failed to grade submission {}: {}", submission_id, e);
                self.notifier
                    .notify(Notice::error("Could not save the grade."));
                false
            }
        }
    }

    pub async fn pending(&self) -> Vec<Submission> {
        self.state
            .lock()
            .await
            .submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Pending)
            .cloned()
            .collect()
    }

    pub async fn graded(&self) -> Vec<Submission> {
        self.state
            .lock()
            .await
            .submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Graded)
            .cloned()
            .collect()
    }

    pub async fn snapshot(&self) -> SubmissionReviewState {
        self.state.lock().await.clone()
    }
}

/// Counters for the teacher dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherStats {
    pub total_tasks: usize,
    pub pending_submissions: usize,
    pub graded_submissions: usize,
}

pub fn teacher_stats(tasks: &[Task], submissions: &[Submission]) -> TeacherStats {
    TeacherStats {
        total_tasks: tasks.len(),
        pending_submissions: submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Pending)
            .count(),
        graded_submissions: submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Graded)
            .count(),
    }
}
