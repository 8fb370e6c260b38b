//! In-memory chat that records every transport call

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use dashbot::telegram::{ChatMessageSink, TransportError};
use teloxide::types::{ChatId, MessageId};

/// One call made against the sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Delete(ChatId, MessageId),
    Send(ChatId, String),
    Edit(ChatId, MessageId, String),
}

#[derive(Debug, Default)]
struct Failures {
    delete: Option<TransportError>,
    send: Option<TransportError>,
    edit: Option<TransportError>,
}

/// Sink handing out increasing message IDs, with switchable failures
pub struct RecordingSink {
    calls: Mutex<Vec<RecordedCall>>,
    next_id: Mutex<i32>,
    failures: Mutex<Failures>,
}

impl RecordingSink {
    /// New sink whose first sent message gets `first_id`
    pub fn starting_at(first_id: i32) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: Mutex::new(first_id),
            failures: Mutex::new(Failures::default()),
        }
    }

    pub fn new() -> Self {
        Self::starting_at(100)
    }

    pub fn fail_deletes(&self, err: TransportError) {
        self.failures.lock().unwrap().delete = Some(err);
    }

    pub fn fail_sends(&self, err: TransportError) {
        self.failures.lock().unwrap().send = Some(err);
    }

    pub fn fail_edits(&self, err: TransportError) {
        self.failures.lock().unwrap().edit = Some(err);
    }

    pub fn clear_failures(&self) {
        *self.failures.lock().unwrap() = Failures::default();
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn sends(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RecordedCall::Send(..)))
            .count()
    }

    pub fn edits(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RecordedCall::Edit(..)))
            .count()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatMessageSink for RecordingSink {
    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError> {
        self.record(RecordedCall::Delete(chat_id, message_id));
        match self.failures.lock().unwrap().delete.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<MessageId, TransportError> {
        self.record(RecordedCall::Send(chat_id, text.to_string()));
        if let Some(err) = self.failures.lock().unwrap().send.clone() {
            return Err(err);
        }
        let mut next = self.next_id.lock().unwrap();
        let id = MessageId(*next);
        *next += 1;
        Ok(id)
    }

    async fn edit_message_text(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> Result<(), TransportError> {
        self.record(RecordedCall::Edit(chat_id, message_id, text.to_string()));
        match self.failures.lock().unwrap().edit.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
