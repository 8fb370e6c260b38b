//! Bot configuration loaded from the process environment.
//!
//! Everything is read from environment variables (optionally seeded from a
//! `.env` file by `main`). Required values fail fast with [`ConfigError`];
//! malformed optional values are logged and replaced by their defaults.

use std::env;
use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;

use crate::core::error::ConfigError;

/// Default bind address for the webhook listener
pub const DEFAULT_WEBHOOK_HOST: &str = "0.0.0.0";
/// Default port for the webhook listener
pub const DEFAULT_WEBHOOK_PORT: u16 = 8080;
/// Default URL path Telegram posts updates to
pub const DEFAULT_WEBHOOK_PATH: &str = "/telegram-bot/webhook";

/// Log levels accepted in `LOG_LEVEL`
pub const VALID_LOG_LEVELS: [&str; 7] = ["CRITICAL", "ERROR", "WARNING", "WARN", "INFO", "DEBUG", "TRACE"];

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Startup retry configuration
pub mod retry {
    use super::Duration;

    /// How many times `get_me` is retried while the Bot API is unreachable
    pub const STARTUP_MAX_RETRIES: u32 = 60;

    /// Delay between startup attempts (in seconds)
    pub const STARTUP_RETRY_DELAY_SECS: u64 = 5;

    /// Startup retry delay duration
    pub fn startup_delay() -> Duration {
        Duration::from_secs(STARTUP_RETRY_DELAY_SECS)
    }
}

/// Database pool configuration
pub mod database {
    /// Maximum number of pooled PostgreSQL connections
    pub const MAX_CONNECTIONS: u32 = 5;
}

/// Telegram webhook configuration
pub struct WebhookConfig {
    /// Public URL registered with Telegram. Only required in webhook mode.
    pub url: Option<String>,
    /// Bind host: an IP literal or a resolvable host name
    pub host: String,
    pub port: u16,
    /// Always starts with `/`
    pub path: String,
    pub secret: Option<SecretString>,
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("url", &self.url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// PostgreSQL connection settings
pub struct DbConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: SecretString,
}

impl DbConfig {
    /// Builds the `sqlx` connection options.
    ///
    /// Credentials are passed as separate fields, so characters such as `@`,
    /// `/` or `#` in the password need no URL escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.name)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Complete bot configuration
pub struct Settings {
    pub bot_token: SecretString,
    /// Normalized, upper-case level name
    pub log_level: String,
    /// Custom Bot API server, if any
    pub bot_api_url: Option<String>,
    pub webhook: WebhookConfig,
    pub db: DbConfig,
    pub admin_ids: Vec<i64>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("log_level", &self.log_level)
            .field("bot_api_url", &self.bot_api_url)
            .field("webhook", &self.webhook)
            .field("db", &self.db)
            .field("admin_ids", &self.admin_ids)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `BOT_TOKEN` is missing or a port is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// `from_env` is a thin wrapper; tests feed a map instead of mutating the
    /// real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        // --- BOT TOKEN ---
        let bot_token = lookup("BOT_TOKEN")
            .or_else(|| lookup("TELOXIDE_TOKEN"))
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        if bot_token.is_empty() {
            return Err(ConfigError::Missing("BOT_TOKEN"));
        }
        if !bot_token.contains(':') {
            log::warn!("BOT_TOKEN does not look like the usual '<id>:<hash>' format");
        }

        // --- LOG LEVEL ---
        let log_level = normalize_log_level(&get("LOG_LEVEL", "INFO"));

        // --- WEBHOOK ---
        let webhook_url = lookup("WEBHOOK_URL")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        if let Some(url) = &webhook_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                log::warn!("WEBHOOK_URL {:?} does not start with 'http://' or 'https://'", url);
            }
        }

        let webhook_host = match get("WEBHOOK_HOST", DEFAULT_WEBHOOK_HOST).trim() {
            "" => DEFAULT_WEBHOOK_HOST.to_string(),
            host => host.to_string(),
        };
        let webhook_port = parse_port("WEBHOOK_PORT", lookup("WEBHOOK_PORT"), DEFAULT_WEBHOOK_PORT)?;
        let webhook_path = normalize_webhook_path(&get("WEBHOOK_PATH", DEFAULT_WEBHOOK_PATH));
        let webhook_secret = lookup("WEBHOOK_SECRET")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(SecretString::from);

        // --- DB ---
        let db = DbConfig {
            enabled: parse_bool(lookup("DB_ENABLED").as_deref(), true),
            host: get("DB_HOST", "postgre-sql"),
            port: parse_port("DB_PORT", lookup("DB_PORT"), 5432)?,
            name: get("DB_NAME", "telegram_bot_db"),
            user: get("DB_USER", "telegram_bot_user"),
            password: SecretString::from(get("DB_PASSWORD", "telegram_bot_password")),
        };

        // --- ADMIN IDS ---
        let admin_ids = parse_admin_ids(&get("ADMIN_IDS", ""));

        let bot_api_url = lookup("BOT_API_URL").filter(|u| !u.trim().is_empty());

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            log_level,
            bot_api_url,
            webhook: WebhookConfig {
                url: webhook_url,
                host: webhook_host,
                port: webhook_port,
                path: webhook_path,
                secret: webhook_secret,
            },
            db,
            admin_ids,
        })
    }

    /// One-line startup summary, free of secrets
    pub fn summary(&self) -> String {
        format!(
            "db_enabled={} db_host={} db_name={} webhook_url={} log_level={} admin_count={}",
            self.db.enabled,
            self.db.host,
            self.db.name,
            self.webhook.url.as_deref().unwrap_or("<unset>"),
            self.log_level,
            self.admin_ids.len()
        )
    }
}

/// Parses `ADMIN_IDS` into a list of Telegram user IDs.
///
/// Example: `"123,456,789"` -> `[123, 456, 789]`. Invalid entries are logged and skipped.
pub fn parse_admin_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                log::warn!("ADMIN_IDS contains an invalid value: {:?}", part);
                None
            }
        })
        .collect()
}

fn normalize_log_level(raw: &str) -> String {
    let level = raw.trim().to_uppercase();
    if VALID_LOG_LEVELS.contains(&level.as_str()) {
        level
    } else {
        log::warn!("LOG_LEVEL {:?} is not valid, falling back to 'INFO'", level);
        "INFO".to_string()
    }
}

fn normalize_webhook_path(raw: &str) -> String {
    let path = raw.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn parse_port(name: &'static str, raw: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidPort { name, value }),
    }
}

fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
