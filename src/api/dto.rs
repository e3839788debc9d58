use serde::{Deserialize, Serialize};

use crate::models::UserRole;

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
    pub role: UserRole,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// Data-URL encoded image, when the user picked one at registration.
    #[serde(rename = "profileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Query parameters for `GET /submissions`. Both filters are optional and
/// combine as a conjunction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionFilter {
    #[serde(rename = "studentId", skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(rename = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl SubmissionFilter {
    pub fn for_student(student_id: &str) -> Self {
        Self {
            student_id: Some(student_id.to_string()),
            task_id: None,
        }
    }

    pub fn for_task(task_id: &str) -> Self {
        Self {
            student_id: None,
            task_id: Some(task_id.to_string()),
        }
    }

    pub fn for_student_task(student_id: &str, task_id: &str) -> Self {
        Self {
            student_id: Some(student_id.to_string()),
            task_id: Some(task_id.to_string()),
        }
    }
}
