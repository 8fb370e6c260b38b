//! Single-message dashboard per chat
//!
//! Rules:
//! - the user's triggering message is always deleted (best effort);
//! - each chat has at most ONE bot message, the dashboard;
//! - a new command edits the dashboard in place to show only its output;
//! - if both the command label and the output match the last render, nothing
//!   is sent or edited.
//!
//! State lives in a [`ViewStore`] owned by the handler dependencies. teloxide
//! dispatches updates of one chat sequentially, so the store is read before
//! the transport calls and written back afterwards without holding any map
//! guard across an `.await`.

use std::sync::Arc;

use dashmap::DashMap;
use teloxide::types::{ChatId, MessageId};

use crate::core::utils::escape_markdown_v2;
use crate::telegram::transport::{ChatMessageSink, TransportError};

/// Per-chat view state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatViewState {
    /// The bot-owned message currently shown, if one was sent
    pub dashboard_message_id: Option<MessageId>,
    pub last_command_label: Option<String>,
    pub last_body_text: Option<String>,
}

impl ChatViewState {
    /// True if rendering `(label, body)` would not change what the chat shows
    pub fn shows(&self, label: &str, body: &str) -> bool {
        self.last_command_label.as_deref() == Some(label) && self.last_body_text.as_deref() == Some(body)
    }
}

/// Process-wide map of chat ID to view state. Lost on restart.
#[derive(Debug, Clone, Default)]
pub struct ViewStore {
    chats: Arc<DashMap<ChatId, ChatViewState>>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the chat's state (empty when the chat was never rendered)
    pub fn get(&self, chat_id: ChatId) -> ChatViewState {
        self.chats.get(&chat_id).map(|s| s.value().clone()).unwrap_or_default()
    }

    pub fn set(&self, chat_id: ChatId, state: ChatViewState) {
        self.chats.insert(chat_id, state);
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }
}

/// What a call to [`Dashboard::render`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Same label and body as last time, nothing touched
    Unchanged,
    /// First render in the chat, a new dashboard was sent
    Created(MessageId),
    /// The existing dashboard was edited in place
    Edited(MessageId),
    /// The edit failed, so a replacement dashboard was sent
    Replaced { old: MessageId, new: MessageId },
    /// Even the send failed; state was left untouched so the next render retries
    Failed,
}

/// Composes the text shown in the dashboard.
///
/// Only the body is displayed; the label is tracked for the idempotence check.
pub fn compose_text(_command_label: &str, body_text: &str) -> String {
    escape_markdown_v2(body_text)
}

/// Dashboard view reconciler
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    store: ViewStore,
}

impl Dashboard {
    pub fn new(store: ViewStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ViewStore {
        &self.store
    }

    /// Updates (or creates) the dashboard of `chat_id`.
    ///
    /// `trigger` is the user's message that caused the render; it is deleted
    /// first. Never fails: transport errors are logged and compensated.
    pub async fn render<S>(
        &self,
        sink: &S,
        chat_id: ChatId,
        trigger: Option<MessageId>,
        command_label: &str,
        body_text: &str,
    ) -> RenderOutcome
    where
        S: ChatMessageSink + ?Sized,
    {
        if let Some(message_id) = trigger {
            delete_user_message(sink, chat_id, message_id).await;
        }

        let mut state = self.store.get(chat_id);

        if state.shows(command_label, body_text) {
            log::debug!(
                "Same command ({}) and body as last time in chat {}; not updating dashboard",
                command_label,
                chat_id
            );
            return RenderOutcome::Unchanged;
        }

        let text = compose_text(command_label, body_text);

        let outcome = match state.dashboard_message_id {
            None => match sink.send_message(chat_id, &text).await {
                Ok(new) => RenderOutcome::Created(new),
                Err(e) => {
                    log::error!("Failed to send dashboard to chat {}: {}", chat_id, e);
                    RenderOutcome::Failed
                }
            },
            Some(old) => match sink.edit_message_text(chat_id, old, &text).await {
                // Telegram already shows this text; resending would duplicate the dashboard
                Ok(()) | Err(TransportError::NotModified) => RenderOutcome::Edited(old),
                Err(e) => {
                    log::debug!(
                        "Failed to edit dashboard {} in chat {}, sending a new one: {}",
                        old.0,
                        chat_id,
                        e
                    );
                    match sink.send_message(chat_id, &text).await {
                        Ok(new) => RenderOutcome::Replaced { old, new },
                        Err(e) => {
                            log::error!("Failed to resend dashboard to chat {}: {}", chat_id, e);
                            RenderOutcome::Failed
                        }
                    }
                }
            },
        };

        match outcome {
            RenderOutcome::Created(id) | RenderOutcome::Edited(id) | RenderOutcome::Replaced { new: id, .. } => {
                state.dashboard_message_id = Some(id);
                state.last_command_label = Some(command_label.to_string());
                state.last_body_text = Some(body_text.to_string());
                self.store.set(chat_id, state);
            }
            RenderOutcome::Unchanged | RenderOutcome::Failed => {}
        }

        outcome
    }
}

/// Deletes a user message, logging instead of failing.
pub async fn delete_user_message<S>(sink: &S, chat_id: ChatId, message_id: MessageId)
where
    S: ChatMessageSink + ?Sized,
{
    if let Err(e) = sink.delete_message(chat_id, message_id).await {
        log::debug!("Failed to delete user message {} in chat {}: {}", message_id.0, chat_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shows_requires_both_fields() {
        let state = ChatViewState {
            dashboard_message_id: Some(MessageId(1)),
            last_command_label: Some("/start".to_string()),
            last_body_text: Some("ok".to_string()),
        };

        assert!(state.shows("/start", "ok"));
        assert!(!state.shows("/start", "other"));
        assert!(!state.shows("/myid", "ok"));
        assert!(!ChatViewState::default().shows("", ""));
    }

    #[test]
    fn test_store_is_lazy_and_shared_between_clones() {
        let store = ViewStore::new();
        assert_eq!(store.get(ChatId(1)), ChatViewState::default());
        assert!(store.is_empty());

        let clone = store.clone();
        clone.set(
            ChatId(1),
            ChatViewState {
                dashboard_message_id: Some(MessageId(7)),
                ..Default::default()
            },
        );

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(ChatId(1)).dashboard_message_id, Some(MessageId(7)));
        assert_eq!(store.get(ChatId(2)), ChatViewState::default());
    }

    #[test]
    fn test_compose_text_shows_escaped_body_only() {
        assert_eq!(compose_text("/admin", "❌ Access denied."), "❌ Access denied\\.");
    }
}
