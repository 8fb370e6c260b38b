//! Handler types, dependencies, and user management helpers

use std::sync::Arc;

use teloxide::types::User;

use crate::core::auth::AdminList;
use crate::core::error::AppResult;
use crate::storage::db::{self, DbPool, NewUser};
use crate::telegram::dashboard::{Dashboard, ViewStore};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub dashboard: Dashboard,
    pub admins: Arc<AdminList>,
    /// `None` when persistence is disabled (`DB_ENABLED=false`)
    pub db_pool: Option<DbPool>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(view_store: ViewStore, admins: AdminList, db_pool: Option<DbPool>) -> Self {
        Self {
            dashboard: Dashboard::new(view_store),
            admins: Arc::new(admins),
            db_pool,
        }
    }
}

/// Stores or refreshes the sender's `users` row.
///
/// No-op when persistence is disabled. Returns whether the user is new.
pub async fn persist_user(db_pool: Option<&DbPool>, user: &User) -> AppResult<bool> {
    let Some(pool) = db_pool else {
        return Ok(false);
    };

    let created = db::upsert_user(pool, &NewUser::from_telegram(user)?).await?;
    if created {
        log::info!("New user registered: id={} username={:?}", user.id, user.username);
    }
    Ok(created)
}
