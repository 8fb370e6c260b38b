use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::core::config::database::MAX_CONNECTIONS;
use crate::core::error::{AppError, AppResult};
use crate::storage::migrations::run_migrations;

pub type DbPool = sqlx::PgPool;

/// A Telegram user who has talked to the bot.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    /// Telegram user ID
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Telegram username (without `@`), if the user has one
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile fields taken from an incoming update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl NewUser {
    /// Builds the row from a teloxide user; empty strings are stored as NULL.
    pub fn from_telegram(user: &teloxide::types::User) -> AppResult<Self> {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let id = i64::try_from(user.id.0).map_err(|_| AppError::UserIdOutOfRange(user.id.0))?;
        Ok(Self {
            id,
            first_name: non_empty(&user.first_name),
            last_name: user.last_name.as_deref().and_then(non_empty),
            username: user.username.as_deref().and_then(non_empty),
        })
    }
}

/// Create a new connection pool and bring the schema up to date.
///
/// # Errors
/// Returns an error if the database is unreachable or a migration fails.
pub async fn init_pool(options: PgConnectOptions) -> AppResult<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Inserts the user or refreshes their profile fields.
///
/// `created_at` is kept from the first insert. Returns `true` when the row is new.
pub async fn upsert_user(pool: &DbPool, user: &NewUser) -> AppResult<bool> {
    // `xmax = 0` only holds for a freshly inserted tuple
    let inserted: bool = sqlx::query_scalar(
        "INSERT INTO users (id, first_name, last_name, username)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (id) DO UPDATE
         SET first_name = EXCLUDED.first_name,
             last_name = EXCLUDED.last_name,
             username = EXCLUDED.username
         RETURNING (xmax = 0)",
    )
    .bind(user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.username)
    .fetch_one(pool)
    .await?;

    Ok(inserted)
}

/// Fetches a user by Telegram ID.
pub async fn get_user(pool: &DbPool, id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, username, created_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
