//! Chat message sink used by the dashboard
//!
//! The dashboard only needs three Bot API calls. They sit behind
//! [`ChatMessageSink`] so the reconciliation logic can run against an
//! in-memory recorder in tests and against `teloxide::Bot` in production.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode};
use teloxide::{ApiError, RequestError};
use thiserror::Error;

/// Failure of a single transport call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Telegram refused an edit because the text is already what it shows
    #[error("message is not modified")]
    NotModified,

    /// The target message no longer exists (deleted, too old, never sent)
    #[error("message not found")]
    MessageNotFound,

    /// Any other API or network failure
    #[error("request failed: {0}")]
    Request(String),
}

impl From<RequestError> for TransportError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Api(ApiError::MessageNotModified) => TransportError::NotModified,
            RequestError::Api(ApiError::MessageToEditNotFound | ApiError::MessageToDeleteNotFound) => {
                TransportError::MessageNotFound
            }
            other => TransportError::Request(other.to_string()),
        }
    }
}

/// Send/edit/delete operations against a chat.
///
/// Text passed to `send_message` and `edit_message_text` is already
/// formatted as MarkdownV2.
#[async_trait]
pub trait ChatMessageSink: Send + Sync {
    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError>;

    /// Sends a new message and returns its ID
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<MessageId, TransportError>;

    async fn edit_message_text(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> Result<(), TransportError>;
}

#[async_trait]
impl ChatMessageSink for Bot {
    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError> {
        Requester::delete_message(self, chat_id, message_id).await?;
        Ok(())
    }

    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<MessageId, TransportError> {
        let sent = Requester::send_message(self, chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
        Ok(sent.id)
    }

    async fn edit_message_text(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> Result<(), TransportError> {
        Requester::edit_message_text(self, chat_id, message_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_mapping() {
        assert_eq!(
            TransportError::from(RequestError::Api(ApiError::MessageNotModified)),
            TransportError::NotModified
        );
        assert_eq!(
            TransportError::from(RequestError::Api(ApiError::MessageToEditNotFound)),
            TransportError::MessageNotFound
        );
        assert!(matches!(
            TransportError::from(RequestError::Api(ApiError::BotBlocked)),
            TransportError::Request(_)
        ));
    }
}
