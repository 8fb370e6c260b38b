use thiserror::Error;

/// Configuration errors raised while reading the environment.
///
/// These are fatal at startup: the bot refuses to run with a broken config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    /// A port variable is not a valid `u16`
    #[error("{name} must be an integer port number, got {value:?}")]
    InvalidPort { name: &'static str, value: String },

    /// Webhook mode was requested without a public URL
    #[error("WEBHOOK_URL is required in webhook mode")]
    MissingWebhookUrl,
}

/// Centralized error types for the application
///
/// Startup and persistence failures are converted to this enum for consistent
/// error handling. Uses `thiserror` for automatic conversion and formatting.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration errors
    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A Telegram user ID that does not fit the `BIGINT` column
    #[error("User ID {0} is out of range")]
    UserIdOutOfRange(u64),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
