use crate::reconcile::{self, EffectiveTask, TaskBuckets};
use crate::views::BoardState;

/// The all-tasks page: the full catalog plus the three filtered tabs.
#[derive(Debug)]
pub struct TaskListing {
    pub all: Vec<EffectiveTask>,
    pub buckets: TaskBuckets,
    pub loaded: bool,
}

pub fn listing(state: &BoardState) -> TaskListing {
    TaskListing {
        all: state.effective.clone(),
        buckets: reconcile::partition(&state.effective),
        loaded: state.loaded,
    }
}
