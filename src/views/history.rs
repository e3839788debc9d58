use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::api::{PlatformApi, SubmissionFilter};
use crate::models::{Submission, User};
use crate::views::{Generation, Notice, Notifier};

#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    pub submissions: Vec<Submission>,
    pub loaded: bool,
}

/// The submission-history page: everything the viewer has handed in, with
/// grading feedback and file download.
pub struct HistoryView {
    api: Arc<dyn PlatformApi>,
    notifier: Arc<dyn Notifier>,
    generation: Generation,
    state: Mutex<HistoryState>,
}

impl HistoryView {
    pub fn new(api: Arc<dyn PlatformApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            generation: Generation::new(),
            state: Mutex::new(HistoryState::default()),
        }
    }

    pub async fn refresh(&self, viewer: Option<&User>) {
        let generation = self.generation.begin();

        let submissions = match viewer {
            Some(user) => {
                match self
                    .api
                    .list_submissions(&SubmissionFilter::for_student(&user.email))
                    .await
                {
                    Ok(submissions) => submissions,
                    Err(e) => {
                        tracing::warn!("failed to load submission history: {}", e);
                        self.notifier
                            .notify(Notice::error("Could not load submission history."));
                        Vec::new()
                    }
                }
            }
            None => {
                self.notifier.notify(Notice::error(
                    "Student identifier not found. Please log in again.",
                ));
                Vec::new()
            }
        };

        if !self.generation.is_current(generation) {
            debug!("discarding stale history refresh");
            return;
        }

        let mut state = self.state.lock().await;
        if !self.generation.is_current(generation) {
            debug!("discarding stale history refresh");
            return;
        }
        *state = HistoryState {
            submissions,
            loaded: true,
        };
    }

    /// Downloads a submission's file. Returns the file name alongside the
    /// bytes so the caller can save it under its original name.
    pub async fn download(&self, submission: &Submission) -> Option<(String, Vec<u8>)> {
        match self.api.download_submission_file(&submission.id).await {
            Ok(bytes) => {
                self.notifier.notify(Notice::info(
                    "Download started",
                    format!("Downloading {}", submission.file_name),
                ));
                Some((submission.file_name.clone(), bytes))
            }
            Err(e) => {
                tracing::warn!("download failed for {}: {}", submission.id, e);
                self.notifier.notify(Notice::error(format!(
                    "Could not download {}. Please try again.",
                    submission.file_name
                )));
                None
            }
        }
    }

    pub async fn snapshot(&self) -> HistoryState {
        self.state.lock().await.clone()
    }
}

/// Human-readable size for the history table, mirroring how grading views
/// show it.
pub fn format_file_size(size_in_bytes: u64) -> String {
    if size_in_bytes == 0 {
        return "N/A".to_string();
    }
    format!("{:.2} MB", size_in_bytes as f64 / (1024.0 * 1024.0))
}
