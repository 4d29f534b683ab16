// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat with one peer, persisted per peer email.

use std::sync::Arc;

use chrono::Utc;
use padlink_core::PadlinkError;
use padlink_core::traits::{CommandChannel, StorageAdapter};
use padlink_core::types::{Message, MessageKind, timestamp};
use tracing::{debug, error};

use crate::state::StateHolder;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub last_error: Option<String>,
}

/// Conversation with `peer_email`.
///
/// Outgoing text goes over the command channel before it is stored, so a
/// transport failure leaves no local row.
pub struct ChatRoom {
    peer_email: String,
    sender_name: String,
    storage: Arc<dyn StorageAdapter>,
    channel: Arc<dyn CommandChannel>,
    state: StateHolder<ChatState>,
}

impl ChatRoom {
    pub fn new(
        peer_email: impl Into<String>,
        sender_name: impl Into<String>,
        storage: Arc<dyn StorageAdapter>,
        channel: Arc<dyn CommandChannel>,
    ) -> Self {
        Self {
            peer_email: peer_email.into(),
            sender_name: sender_name.into(),
            storage,
            channel,
            state: StateHolder::default(),
        }
    }

    pub fn state(&self) -> &StateHolder<ChatState> {
        &self.state
    }

    pub async fn refresh(&self) {
        match self.storage.list_messages(&self.peer_email).await {
            Ok(messages) => self.state.publish(ChatState {
                messages,
                last_error: None,
            }),
            Err(e) => {
                error!(peer = %self.peer_email, error = %e, "failed to load messages");
                self.state.publish(ChatState {
                    messages: Vec::new(),
                    last_error: Some(e.to_string()),
                });
            }
        }
    }

    /// Send a text line to the device and store it as ours.
    pub async fn send_text(&self, text: &str) -> Result<Message, PadlinkError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PadlinkError::Validation(
                "message text must not be blank".into(),
            ));
        }
        self.channel.send_message(text).await?;
        let message = self.build(MessageKind::Text, text, None, true, &self.sender_name);
        self.store(message).await
    }

    /// Store a voice note recorded locally.
    pub async fn send_voice(&self, recording: Vec<u8>) -> Result<Message, PadlinkError> {
        if recording.is_empty() {
            return Err(PadlinkError::Validation("voice recording is empty".into()));
        }
        let message = self.build(
            MessageKind::Voice,
            "",
            Some(recording),
            true,
            &self.sender_name,
        );
        self.store(message).await
    }

    /// Store a text message received from the peer.
    pub async fn receive_text(&self, text: &str, from_name: &str) -> Result<Message, PadlinkError> {
        let message = self.build(MessageKind::Text, text, None, false, from_name);
        self.store(message).await
    }

    /// Delete this conversation's messages.
    pub async fn clear(&self) -> Result<u64, PadlinkError> {
        let removed = self.storage.delete_messages(Some(&self.peer_email)).await?;
        self.refresh().await;
        Ok(removed)
    }

    fn build(
        &self,
        kind: MessageKind,
        text: &str,
        record_blob: Option<Vec<u8>>,
        is_current_user: bool,
        sender_name: &str,
    ) -> Message {
        Message {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            email: self.peer_email.clone(),
            created_at: timestamp(Utc::now()),
            is_current_user,
            kind,
            record_blob,
            sender_name: sender_name.to_string(),
        }
    }

    async fn store(&self, message: Message) -> Result<Message, PadlinkError> {
        self.storage.insert_message(&message).await?;
        debug!(peer = %self.peer_email, kind = %message.kind, "message stored");
        self.refresh().await;
        Ok(message)
    }
}
