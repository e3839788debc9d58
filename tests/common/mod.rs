#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use studypath_client::api::dto::{
    LoginRequest, LoginResponse, SignupRequest, SignupResponse, SubmissionFilter,
};
use studypath_client::api::PlatformApi;
use studypath_client::error::AppError;
use studypath_client::models::{
    GradeRequest, NewTaskRequest, Submission, SubmissionStatus, SubmissionUpload, Task,
    UpdateTaskRequest, User, UserRole,
};
use studypath_client::views::{Notice, Notifier};

pub fn task(id: &str, title: &str, due_date: &str, is_locked: bool) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        video_url: None,
        due_date: due_date.to_string(),
        estimated_time: None,
        instructions: None,
        is_locked,
        is_completed: false,
    }
}

pub fn submission(id: &str, task_id: &str, student_id: &str, status: SubmissionStatus) -> Submission {
    Submission {
        id: id.to_string(),
        task_id: task_id.to_string(),
        task_title: format!("task {}", task_id),
        student_id: student_id.to_string(),
        student_name: "Alex Doe".to_string(),
        student_image: None,
        submission_date: "2025-04-01T10:00:00Z".to_string(),
        file_name: "work.zip".to_string(),
        file_size: 2048,
        status,
        grade: None,
        feedback: None,
    }
}

pub fn student(email: &str) -> User {
    User {
        id: None,
        name: "Alex Doe".to_string(),
        email: email.to_string(),
        profile_image: None,
        role: UserRole::Student,
    }
}

/// Collects notices so tests can assert on the toasts a view raised.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notices lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notices lock").push(notice);
    }
}

/// Programmable backend double. Collections are plain vectors; failure
/// switches and per-call task plans drive the error and race tests.
#[derive(Default)]
pub struct MockApi {
    pub tasks: Mutex<Vec<Task>>,
    pub submissions: Mutex<Vec<Submission>>,
    pub fail_tasks: AtomicBool,
    pub fail_submissions: AtomicBool,
    pub reject_login: AtomicBool,
    /// Per-call (delay_ms, result) plan for `list_tasks`; falls back to
    /// `tasks` when exhausted.
    pub task_plan: Mutex<VecDeque<(u64, Vec<Task>)>>,
    pub task_calls: AtomicUsize,
    pub submission_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
    pub replace_calls: AtomicUsize,
    next_submission_id: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let api = Self::new();
        *api.tasks.lock().expect("tasks lock") = tasks;
        api
    }

    pub fn push_task_plan(&self, delay_ms: u64, tasks: Vec<Task>) {
        self.task_plan
            .lock()
            .expect("plan lock")
            .push_back((delay_ms, tasks));
    }

    fn record_from_upload(&self, task_id: &str, upload: &SubmissionUpload, id: String) -> Submission {
        Submission {
            id,
            task_id: task_id.to_string(),
            task_title: upload.task_title.clone(),
            student_id: upload.student_id.clone(),
            student_name: upload.student_name.clone(),
            student_image: upload.student_image.clone(),
            submission_date: "2025-04-02T12:00:00Z".to_string(),
            file_name: upload.file_name.clone(),
            file_size: upload.bytes.len() as u64,
            status: SubmissionStatus::Pending,
            grade: None,
            feedback: None,
        }
    }
}

#[async_trait]
impl PlatformApi for MockApi {
    async fn login(&self, _req: &LoginRequest) -> Result<LoginResponse, AppError> {
        if self.reject_login.load(Ordering::SeqCst) {
            return Err(AppError::Api {
                status: 401,
                message: "Invalid credentials".to_string(),
            });
        }
        Ok(LoginResponse {
            token: "test-token".to_string(),
            name: "Alex Doe".to_string(),
            role: UserRole::Student,
            profile_image: None,
        })
    }

    async fn signup(&self, _req: &SignupRequest) -> Result<SignupResponse, AppError> {
        Ok(SignupResponse {
            message: "Signup successful".to_string(),
        })
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        self.task_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_tasks.load(Ordering::SeqCst) {
            return Err(AppError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        let planned = self.task_plan.lock().expect("plan lock").pop_front();
        if let Some((delay_ms, tasks)) = planned {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            return Ok(tasks);
        }
        Ok(self.tasks.lock().expect("tasks lock").clone())
    }

    async fn get_task(&self, id: &str) -> Result<Task, AppError> {
        self.tasks
            .lock()
            .expect("tasks lock")
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(AppError::Api {
                status: 404,
                message: "task not found".to_string(),
            })
    }

    async fn create_task(&self, req: &NewTaskRequest) -> Result<Task, AppError> {
        let mut tasks = self.tasks.lock().expect("tasks lock");
        let task = Task {
            id: format!("task-{}", tasks.len() + 1),
            title: req.title.clone(),
            description: req.description.clone(),
            video_url: req.video_url.clone(),
            due_date: req.due_date.clone(),
            estimated_time: req.estimated_time.clone(),
            instructions: req.instructions.clone(),
            is_locked: req.is_locked,
            is_completed: false,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &str, req: &UpdateTaskRequest) -> Result<Task, AppError> {
        let mut tasks = self.tasks.lock().expect("tasks lock");
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(AppError::Api {
                status: 404,
                message: "task not found".to_string(),
            })?;
        if let Some(title) = &req.title {
            task.title = title.clone();
        }
        if let Some(due_date) = &req.due_date {
            task.due_date = due_date.clone();
        }
        if let Some(is_locked) = req.is_locked {
            task.is_locked = is_locked;
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &str) -> Result<(), AppError> {
        self.tasks.lock().expect("tasks lock").retain(|t| t.id != id);
        Ok(())
    }

    async fn list_submissions(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<Submission>, AppError> {
        self.submission_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_submissions.load(Ordering::SeqCst) {
            return Err(AppError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        let submissions = self.submissions.lock().expect("submissions lock");
        Ok(submissions
            .iter()
            .filter(|s| {
                filter
                    .student_id
                    .as_ref()
                    .map(|id| &s.student_id == id)
                    .unwrap_or(true)
                    && filter
                        .task_id
                        .as_ref()
                        .map(|id| &s.task_id == id)
                        .unwrap_or(true)
            })
            .cloned()
            .collect())
    }

    async fn submit_task(
        &self,
        task_id: &str,
        upload: &SubmissionUpload,
    ) -> Result<Submission, AppError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        let id = format!(
            "sub-{}",
            self.next_submission_id.fetch_add(1, Ordering::SeqCst) + 1
        );
        let record = self.record_from_upload(task_id, upload, id);
        self.submissions
            .lock()
            .expect("submissions lock")
            .push(record.clone());
        Ok(record)
    }

    async fn replace_submission(
        &self,
        submission_id: &str,
        upload: &SubmissionUpload,
    ) -> Result<Submission, AppError> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        let mut submissions = self.submissions.lock().expect("submissions lock");
        let slot = submissions
            .iter_mut()
            .find(|s| s.id == submission_id)
            .ok_or(AppError::Api {
                status: 404,
                message: "submission not found".to_string(),
            })?;
        let task_id = slot.task_id.clone();
        *slot = self.record_from_upload(&task_id, upload, submission_id.to_string());
        Ok(slot.clone())
    }

    async fn delete_submission(&self, submission_id: &str) -> Result<(), AppError> {
        self.submissions
            .lock()
            .expect("submissions lock")
            .retain(|s| s.id != submission_id);
        Ok(())
    }

    async fn grade_submission(
        &self,
        submission_id: &str,
        req: &GradeRequest,
    ) -> Result<Submission, AppError> {
        let mut submissions = self.submissions.lock().expect("submissions lock");
        let slot = submissions
            .iter_mut()
            .find(|s| s.id == submission_id)
            .ok_or(AppError::Api {
                status: 404,
                message: "submission not found".to_string(),
            })?;
        slot.status = req.status;
        slot.grade = Some(req.grade.clone());
        slot.feedback = Some(req.feedback.clone());
        Ok(slot.clone())
    }

    async fn download_submission_file(&self, _submission_id: &str) -> Result<Vec<u8>, AppError> {
        Ok(b"file contents".to_vec())
    }
}
