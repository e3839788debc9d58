pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod reconcile;
pub mod session;
pub mod views;

pub use config::ClientConfig;
pub use error::AppError;
