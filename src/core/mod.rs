//! Core utilities, configuration, and common functionality

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

// Re-exports for convenience
pub use auth::AdminList;
pub use config::Settings;
pub use error::{AppError, AppResult, ConfigError};
pub use logging::init_logger;
