//! dashbot - minimal Telegram bot that keeps a single dashboard message per chat
//!
//! Each command (`/start`, `/myid`, `/admin`) deletes the user's message and
//! edits one bot-owned message in place instead of sending a new one.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, admin lookup
//! - `storage`: optional PostgreSQL persistence of users
//! - `telegram`: bot creation, dashboard reconciler, handler schema
//! - `cli`: command-line interface

pub mod cli;
pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{AdminList, AppError, Settings};
pub use telegram::{Dashboard, HandlerDeps, ViewStore, schema};
