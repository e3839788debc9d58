//! Synchronous form validation. Every form is checked in full before any
//! request goes out; a failing form blocks submission and reports per-field
//! errors for inline display.

use crate::models::{NewTaskRequest, UserRole};
use crate::reconcile::parse_due_date;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// Data-URL encoded image, when one was picked.
    pub profile_image: Option<String>,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        validate_email(&self.email, &mut errors);
        if self.password.len() < 6 {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        if let Some(image) = &self.profile_image {
            if !image.starts_with("data:") {
                errors.push(FieldError::new(
                    "profileImage",
                    "Profile image must be a data URL",
                ));
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub video_url: Option<String>,
    pub due_date: String,
    pub estimated_time: Option<String>,
    pub instructions: Option<String>,
    pub is_locked: bool,
}

impl TaskForm {
    /// Produces the create-task payload, or the full list of field errors.
    pub fn validate(&self) -> Result<NewTaskRequest, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if self.description.trim().is_empty() {
            errors.push(FieldError::new("description", "Description is required"));
        }
        if parse_due_date(&self.due_date).is_none() {
            errors.push(FieldError::new(
                "dueDate",
                "Due date must be a valid YYYY-MM-DD date",
            ));
        }
        if let Some(url) = &self.video_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(FieldError::new("videoUrl", "Video URL must be http(s)"));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewTaskRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            video_url: self.video_url.clone(),
            due_date: self.due_date.clone(),
            estimated_time: self.estimated_time.clone(),
            instructions: self.instructions.clone(),
            is_locked: self.is_locked,
        })
    }
}

fn validate_email(email: &str, errors: &mut Vec<FieldError>) {
    if email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        errors.push(FieldError::new("email", "Email address is invalid"));
    }
}
