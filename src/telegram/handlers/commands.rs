//! Command handler implementations (/start, /myid, /admin)
//!
//! Every command ends in a single dashboard render; handlers only decide the
//! label and body.

use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError, persist_user};
use crate::core::auth::AdminList;

pub const START_BODY: &str = "✅ Bot is running correctly.";
pub const ADMIN_GRANTED_BODY: &str = "🛠 You have admin privileges.";
pub const ACCESS_DENIED_BODY: &str = "❌ Access denied.";
pub const ERROR_LABEL: &str = "ERROR";
pub const ERROR_BODY: &str = "An unexpected error occurred. Please try again later.";

/// Body shown for `/admin`
pub fn admin_body(admins: &AdminList, user_id: i64) -> &'static str {
    if admins.is_admin(user_id) {
        ADMIN_GRANTED_BODY
    } else {
        ACCESS_DENIED_BODY
    }
}

/// Handle /start command
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    persist_user(deps.db_pool.as_ref(), user).await?;

    deps.dashboard
        .render(bot, msg.chat.id, Some(msg.id), "/start", START_BODY)
        .await;
    Ok(())
}

/// Handle /myid command: shows only the sender's numeric ID
pub(super) async fn handle_myid_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    deps.dashboard
        .render(bot, msg.chat.id, Some(msg.id), "/myid", &user.id.0.to_string())
        .await;
    Ok(())
}

/// Handle /admin command: only users listed in `ADMIN_IDS` are granted
pub(super) async fn handle_admin_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(user_id) = msg.from.as_ref().and_then(|u| i64::try_from(u.id.0).ok()) else {
        return Ok(());
    };

    let body = admin_body(&deps.admins, user_id);
    if body == ACCESS_DENIED_BODY {
        log::info!("/admin denied for user {}", user_id);
    }

    deps.dashboard
        .render(bot, msg.chat.id, Some(msg.id), "/admin", body)
        .await;
    Ok(())
}

/// Shows the generic error body in the chat's dashboard.
///
/// Used when a command handler fails; the render itself never fails, it only logs.
pub async fn render_error(bot: &Bot, msg: &Message, deps: &HandlerDeps) {
    deps.dashboard
        .render(bot, msg.chat.id, Some(msg.id), ERROR_LABEL, ERROR_BODY)
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_body() {
        let admins = AdminList::new([42]);

        assert_eq!(admin_body(&admins, 42), ADMIN_GRANTED_BODY);
        assert_eq!(admin_body(&admins, 7), ACCESS_DENIED_BODY);
        assert_eq!(admin_body(&AdminList::default(), 42), ACCESS_DENIED_BODY);
    }
}
