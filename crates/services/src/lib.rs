#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod installation;
pub mod progress_service;
pub mod quiz_flow;

pub use app_services::AppServices;
pub use error::AppServicesError;
pub use installation::{AllCompletedCallback, InstallationHandle, InstallationTracker};
pub use progress_service::ProgressService;
pub use quiz_flow::QuizFlow;
