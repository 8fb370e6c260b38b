//! Telegram bot integration and handlers

pub mod bot;
pub mod dashboard;
pub mod handlers;
pub mod transport;
pub mod webhook;

// Re-exports for convenience
pub use bot::{Command, create_bot, setup_bot_commands, wait_for_bot_api};
pub use dashboard::{ChatViewState, Dashboard, RenderOutcome, ViewStore};
pub use handlers::{HandlerDeps, HandlerError, schema};
pub use teloxide::Bot;
pub use transport::{ChatMessageSink, TransportError};
