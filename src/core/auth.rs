//! Role lookup for privileged commands

use std::collections::HashSet;

/// Set of Telegram user IDs allowed to use admin commands.
///
/// Built once from `ADMIN_IDS` at startup and shared read-only by handlers.
#[derive(Debug, Clone, Default)]
pub struct AdminList {
    ids: HashSet<i64>,
}

impl AdminList {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// True if the user is configured as an admin
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.ids.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
