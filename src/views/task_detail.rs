use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::api::{PlatformApi, SubmissionFilter};
use crate::models::{Submission, Task, User};
use crate::views::{Generation, Notice, Notifier};

#[derive(Debug, Clone, Default)]
pub struct TaskDetailState {
    pub task: Option<Task>,
    /// The viewer's own submission for this task, when one exists.
    pub submission: Option<Submission>,
    pub loaded: bool,
}

/// The single-task page: lesson details plus the viewer's submission slot.
pub struct TaskDetailView {
    api: Arc<dyn PlatformApi>,
    notifier: Arc<dyn Notifier>,
    generation: Generation,
    state: Mutex<TaskDetailState>,
}

impl TaskDetailView {
    pub fn new(api: Arc<dyn PlatformApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            generation: Generation::new(),
            state: Mutex::new(TaskDetailState::default()),
        }
    }

    /// Loads the task and the viewer's submission for it concurrently. Both
    /// fetches settle before the state is replaced.
    pub async fn refresh(&self, task_id: &str, viewer: Option<&User>) {
        let generation = self.generation.begin();

        let task_fut = self.api.get_task(task_id);
        let submission_fut = async {
            match viewer {
                Some(user) => {
                    self.api
                        .list_submissions(&SubmissionFilter::for_student_task(&user.email, task_id))
                        .await
                }
                None => Ok(Vec::new()),
            }
        };
        let (task_result, submission_result) = tokio::join!(task_fut, submission_fut);

        let task = match task_result {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::warn!("failed to load task {}: {}", task_id, e);
                self.notifier
                    .notify(Notice::error("Could not load task details."));
                None
            }
        };

        let submission = match submission_result {
            Ok(mut submissions) => {
                if submissions.is_empty() {
                    None
                } else {
                    Some(submissions.remove(0))
                }
            }
            Err(e) => {
                tracing::warn!("failed to load submission for task {}: {}", task_id, e);
                self.notifier
                    .notify(Notice::error("Could not load your submission."));
                None
            }
        };

        if !self.generation.is_current(generation) {
            debug!("discarding stale task detail refresh");
            return;
        }

        let mut state = self.state.lock().await;
        if !self.generation.is_current(generation) {
            debug!("discarding stale task detail refresh");
            return;
        }
        *state = TaskDetailState {
            task,
            submission,
            loaded: true,
        };
    }

    /// Uploads the viewer's work. An existing submission for this task is
    /// replaced in place, never duplicated. Returns `false` when the upload
    /// was rejected or failed; the user retries manually.
    pub async fn submit_file(
        &self,
        viewer: &User,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> bool {
        if file_name.is_empty() || bytes.is_empty() {
            self.notifier.notify(Notice::info(
                "No file selected",
                "Please select a file to submit",
            ));
            return false;
        }

        let (task_id, task_title, existing) = {
            let state = self.state.lock().await;
            let Some(task) = &state.task else {
                self.notifier
                    .notify(Notice::error("Task is not loaded yet."));
                return false;
            };
            (
                task.id.clone(),
                task.title.clone(),
                state.submission.as_ref().map(|s| s.id.clone()),
            )
        };

        let upload = crate::models::SubmissionUpload {
            file_name: file_name.to_string(),
            bytes,
            student_id: viewer.email.clone(),
            student_name: viewer.name.clone(),
            student_image: viewer.profile_image.clone(),
            task_title,
        };

        let result = match &existing {
            Some(submission_id) => self.api.replace_submission(submission_id, &upload).await,
            None => self.api.submit_task(&task_id, &upload).await,
        };

        match result {
            Ok(submission) => {
                self.state.lock().await.submission = Some(submission);
                self.notifier.notify(Notice::info(
                    "Task submitted!",
                    "Your work has been submitted successfully.",
                ));
                true
            }
            Err(e) => {
                tracing::warn!("submission upload failed for task {}: {}", task_id, e);
                self.notifier
                    .notify(Notice::error("Could not submit your work."));
                false
            }
        }
    }

    /// Withdraws the viewer's submission for this task.
    pub async fn delete_submission(&self) -> bool {
        let submission_id = {
            let state = self.state.lock().await;
            match &state.submission {
                Some(submission) => submission.id.clone(),
                None => return true,
            }
        };

        match self.api.delete_submission(&submission_id).await {
            Ok(()) => {
                self.state.lock().await.submission = None;
                true
            }
            Err(e) => {
                tracing::warn!("failed to delete submission {}: {}", submission_id, e);
                self.notifier
                    .notify(Notice::error("Could not delete your submission."));
                false
            }
        }
    }

    pub async fn snapshot(&self) -> TaskDetailState {
        self.state.lock().await.clone()
    }
}
