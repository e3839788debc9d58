pub mod dto;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::{
    GradeRequest, NewTaskRequest, Submission, SubmissionUpload, Task, UpdateTaskRequest,
};

pub use dto::SubmissionFilter;

#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn login(&self, req: &dto::LoginRequest) -> Result<dto::LoginResponse, AppError>;
    async fn signup(&self, req: &dto::SignupRequest) -> Result<dto::SignupResponse, AppError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError>;
    async fn get_task(&self, id: &str) -> Result<Task, AppError>;
    async fn create_task(&self, req: &NewTaskRequest) -> Result<Task, AppError>;
    async fn update_task(&self, id: &str, req: &UpdateTaskRequest) -> Result<Task, AppError>;
    async fn delete_task(&self, id: &str) -> Result<(), AppError>;

    async fn list_submissions(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<Submission>, AppError>;
    async fn submit_task(
        &self,
        task_id: &str,
        upload: &SubmissionUpload,
    ) -> Result<Submission, AppError>;
    async fn replace_submission(
        &self,
        submission_id: &str,
        upload: &SubmissionUpload,
    ) -> Result<Submission, AppError>;
    async fn delete_submission(&self, submission_id: &str) -> Result<(), AppError>;
    async fn grade_submission(
        &self,
        submission_id: &str,
        req: &GradeRequest,
    ) -> Result<Submission, AppError>;
    async fn download_submission_file(&self, submission_id: &str) -> Result<Vec<u8>, AppError>;
}

pub struct HttpPlatformApi {
    client: Client,
    base_url: String,
}

impl HttpPlatformApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Maps a non-2xx response to `AppError::Api`, preferring the backend's
    /// structured `detail` field over the raw body text.
    async fn check_status(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<dto::ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .unwrap_or(body);
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("failed to parse response body: {}", e);
            AppError::MalformedResponse(e.to_string())
        })
    }

    fn upload_form(upload: &SubmissionUpload) -> multipart::Form {
        let file_part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone());

        let mut form = multipart::Form::new()
            .part("file", file_part)
            .text("student_id", upload.student_id.clone())
            .text("student_name", upload.student_name.clone())
            .text("task_title", upload.task_title.clone());

        if let Some(image) = &upload.student_image {
            form = form.text("student_image", image.clone());
        }

        form
    }
}

#[async_trait]
impl PlatformApi for HttpPlatformApi {
    async fn login(&self, req: &dto::LoginRequest) -> Result<dto::LoginResponse, AppError> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(req)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn signup(&self, req: &dto::SignupRequest) -> Result<dto::SignupResponse, AppError> {
        let response = self
            .client
            .post(self.url("/signup"))
            .json(req)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let response = self.client.get(self.url("/tasks")).send().await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn get_task(&self, id: &str) -> Result<Task, AppError> {
        let response = self
            .client
            .get(self.url(&format!("/tasks/{}", id)))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn create_task(&self, req: &NewTaskRequest) -> Result<Task, AppError> {
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(req)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn update_task(&self, id: &str, req: &UpdateTaskRequest) -> Result<Task, AppError> {
        let response = self
            .client
            .put(self.url(&format!("/tasks/{}", id)))
            .json(req)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.url(&format!("/tasks/{}", id)))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn list_submissions(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<Submission>, AppError> {
        let response = self
            .client
            .get(self.url("/submissions"))
            .query(filter)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn submit_task(
        &self,
        task_id: &str,
        upload: &SubmissionUpload,
    ) -> Result<Submission, AppError> {
        let response = self
            .client
            .post(self.url(&format!("/tasks/{}/submit", task_id)))
            .multipart(Self::upload_form(upload))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn replace_submission(
        &self,
        submission_id: &str,
        upload: &SubmissionUpload,
    ) -> Result<Submission, AppError> {
        let response = self
            .client
            .put(self.url(&format!("/submissions/{}/replace", submission_id)))
            .multipart(Self::upload_form(upload))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn delete_submission(&self, submission_id: &str) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.url(&format!("/submissions/{}", submission_id)))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn grade_submission(
        &self,
        submission_id: &str,
        req: &GradeRequest,
    ) -> Result<Submission, AppError> {
        let response = self
            .client
            .put(self.url(&format!("/submissions/{}/grade", submission_id)))
            .json(req)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Self::parse_json(response).await
    }

    async fn download_submission_file(&self, submission_id: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .client
            .get(self.url(&format!("/submissions/file/{}", submission_id)))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Inert implementation used in tests and offline flows.
pub struct NoopPlatformApi;

#[async_trait]
impl PlatformApi for NoopPlatformApi {
    async fn login(&self, _req: &dto::LoginRequest) -> Result<dto::LoginResponse, AppError> {
        Err(AppError::Api {
            status: 401,
            message: "login is not available".to_string(),
        })
    }

    async fn signup(&self, _req: &dto::SignupRequest) -> Result<dto::SignupResponse, AppError> {
        Ok(dto::SignupResponse {
            message: "Signup successful".to_string(),
        })
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        Ok(Vec::new())
    }

    async fn get_task(&self, _id: &str) -> Result<Task, AppError> {
        Err(AppError::Api {
            status: 404,
            message: "task not found".to_string(),
        })
    }

    async fn create_task(&self, _req: &NewTaskRequest) -> Result<Task, AppError> {
        Err(AppError::Api {
            status: 501,
            message: "not implemented".to_string(),
        })
    }

    async fn update_task(&self, _id: &str, _req: &UpdateTaskRequest) -> Result<Task, AppError> {
        Err(AppError::Api {
            status: 501,
            message: "not implemented".to_string(),
        })
    }

    async fn delete_task(&self, _id: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_submissions(
        &self,
        _filter: &SubmissionFilter,
    ) -> Result<Vec<Submission>, AppError> {
        Ok(Vec::new())
    }

    async fn submit_task(
        &self,
        _task_id: &str,
        _upload: &SubmissionUpload,
    ) -> Result<Submission, AppError> {
        Err(AppError::Api {
            status: 501,
            message: "not implemented".to_string(),
        })
    }

    async fn replace_submission(
        &self,
        _submission_id: &str,
        _upload: &SubmissionUpload,
    ) -> Result<Submission, AppError> {
        Err(AppError::Api {
            status: 501,
            message: "not implemented".to_string(),
        })
    }

    async fn delete_submission(&self, _submission_id: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn grade_submission(
        &self,
        _submission_id: &str,
        _req: &GradeRequest,
    ) -> Result<Submission, AppError> {
        Err(AppError::Api {
            status: 501,
            message: "not implemented".to_string(),
        })
    }

    async fn download_submission_file(&self, _submission_id: &str) -> Result<Vec<u8>, AppError> {
        Ok(Vec::new())
    }
}
