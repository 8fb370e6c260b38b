//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! The handlers are organized in a testable way, allowing integration tests
//! to use the same handler tree as production code.

mod commands;
mod schema;
mod types;

pub use commands::{
    ACCESS_DENIED_BODY, ADMIN_GRANTED_BODY, ERROR_BODY, ERROR_LABEL, START_BODY, admin_body, render_error,
};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError, persist_user};
