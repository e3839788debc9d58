use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Graded,
}

/// A student's uploaded artifact for a task. The UI assumes at most one
/// active submission per (task_id, student_id) pair; resubmission replaces
/// the record in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub task_id: String,
    pub task_title: String,
    /// Student identity, the account email.
    pub student_id: String,
    pub student_name: String,
    #[serde(default)]
    pub student_image: Option<String>,
    pub submission_date: String,
    pub file_name: String,
    pub file_size: u64,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Multipart payload for submit and replace.
#[derive(Debug, Clone)]
pub struct SubmissionUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub student_id: String,
    pub student_name: String,
    pub student_image: Option<String>,
    pub task_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub feedback: String,
    pub grade: String,
    pub status: SubmissionStatus,
}
