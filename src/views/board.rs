use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::api::{PlatformApi, SubmissionFilter};
use crate::models::{Submission, Task, User};
use crate::reconcile::{self, EffectiveTask};
use crate::views::{Generation, Notice, Notifier};

/// Snapshot of a finished load. `loaded` stays false until both fetches of a
/// refresh have settled, so consumers never render a half-merged view.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    pub submissions: Vec<Submission>,
    pub effective: Vec<EffectiveTask>,
    pub loaded: bool,
}

/// Shared loader behind the Dashboard and Tasks pages. Owns its own copies
/// of the fetched collections; nothing else mutates them.
pub struct TaskBoard {
    api: Arc<dyn PlatformApi>,
    notifier: Arc<dyn Notifier>,
    generation: Generation,
    state: Mutex<BoardState>,
}

impl TaskBoard {
    pub fn new(api: Arc<dyn PlatformApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            generation: Generation::new(),
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Fetches the task catalog and the viewer's submissions concurrently,
    /// then reconciles once both have settled. Either fetch failing empties
    /// its collection and raises a notice; with no viewer the submission
    /// fetch is skipped and counts as complete with an empty result.
    pub async fn refresh(&self, viewer: Option<&User>) {
        let generation = self.generation.begin();

        let tasks_fut = self.api.list_tasks();
        let submissions_fut = async {
            match viewer {
                Some(user) => {
                    self.api
                        .list_submissions(&SubmissionFilter::for_student(&user.email))
                        .await
                }
                None => Ok(Vec::new()),
            }
        };
        let (tasks_result, submissions_result) = tokio::join!(tasks_fut, submissions_fut);

        let tasks = match tasks_result {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!("failed to load tasks: {}", e);
                self.notifier.notify(Notice::error("Could not load tasks."));
                Vec::new()
            }
        };

        let submissions = match submissions_result {
            Ok(submissions) => submissions,
            Err(e) => {
                tracing::warn!("failed to load submissions: {}", e);
                self.notifier
                    .notify(Notice::error("Could not load your submission data."));
                Vec::new()
            }
        };

        if !self.generation.is_current(generation) {
            debug!("discarding stale board refresh (generation {})", generation);
            return;
        }

        let effective = reconcile::reconcile(&tasks, &submissions);
        let mut state = self.state.lock().await;
        // Re-check under the lock: a newer refresh may have landed while
        // this one waited.
        if !self.generation.is_current(generation) {
            debug!("discarding stale board refresh (generation {})", generation);
            return;
        }
        *state = BoardState {
            tasks,
            submissions,
            effective,
            loaded: true,
        };
    }

    pub async fn snapshot(&self) -> BoardState {
        self.state.lock().await.clone()
    }
}
