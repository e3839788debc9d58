pub mod board;
pub mod calendar;
pub mod dashboard;
pub mod history;
pub mod task_detail;
pub mod tasks;
pub mod teacher;

use std::sync::atomic::{AtomicU64, Ordering};

pub use board::{BoardState, TaskBoard};

/// A user-visible notification, the toast equivalent. Views push one for
/// every backend failure instead of propagating the error.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default sink: notices go to the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!("{}: {}", notice.title, notice.message);
    }
}

/// Monotonically increasing request generation per fetch target. A refresh
/// records the generation it started under and only merges its results if no
/// newer refresh began in the meantime, so a slow stale response can never
/// overwrite fresher state.
#[derive(Default)]
pub struct Generation(AtomicU64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}
