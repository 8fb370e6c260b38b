//! User persistence backed by PostgreSQL

pub mod db;
pub mod migrations;

// Re-exports for convenience
pub use db::{DbPool, NewUser, User, get_user, init_pool, upsert_user};
