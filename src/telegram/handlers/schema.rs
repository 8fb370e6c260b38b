//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_admin_command, handle_myid_command, handle_start_command, render_error};
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::dashboard::delete_user_message;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// This function returns a handler tree that can be used with teloxide's Dispatcher.
/// The same schema is used in production and in integration tests.
///
/// # Arguments
/// * `deps` - Handler dependencies (dashboard, admin list, optional database pool)
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        // Known commands update the dashboard
        .branch(command_handler(deps))
        // Anything else the user sends is just removed
        .branch(cleanup_handler())
}

/// Handler for bot commands (/start, /myid, /admin)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                if msg.from.is_none() {
                    log::debug!("Ignoring {:?} without a sender in chat {}", cmd, msg.chat.id);
                    return Ok(());
                }

                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);

                let result = match cmd {
                    Command::Start => handle_start_command(&bot, &msg, &deps).await,
                    Command::Myid => handle_myid_command(&bot, &msg, &deps).await,
                    Command::Admin => handle_admin_command(&bot, &msg, &deps).await,
                };

                if let Err(e) = result {
                    log::error!("Exception while handling {:?} in chat {}: {}", cmd, msg.chat.id, e);
                    render_error(&bot, &msg, &deps).await;
                }
                Ok(())
            }
        },
    ))
}

/// Handler for any other message (text, media, stickers, unknown commands).
///
/// The message is deleted; the dashboard keeps showing the last valid output.
fn cleanup_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(|bot: Bot, msg: Message| async move {
        delete_user_message(&bot, msg.chat.id, msg.id).await;
        Ok(())
    })
}
