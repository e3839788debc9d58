pub mod submission;
pub mod task;
pub mod user;

pub use submission::{GradeRequest, Submission, SubmissionStatus, SubmissionUpload};
pub use task::{NewTaskRequest, Task, UpdateTaskRequest};
pub use user::{User, UserRole};
