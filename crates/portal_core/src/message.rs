//! Message - entries of the conversation log
//!
//! Messages are immutable once appended; ids are allocated by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque, strictly increasing message token.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The id allocated after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Who authored a message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// A single entry of the conversation log.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(id: MessageId, text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
