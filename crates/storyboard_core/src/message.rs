//! Chat message types.

use crate::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a chat message.
///
/// Allocated before any network call so streamed updates can target the
/// message unambiguously.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Allocates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single entry in the conversation log.
///
/// User messages never change after they are sent. Assistant messages grow
/// as fragments stream in.
///
/// # Examples
///
/// ```
/// use storyboard_core::{ChatMessage, Role};
///
/// let mut reply = ChatMessage::assistant("");
/// reply.append("Try a ");
/// reply.append("low angle.");
/// assert_eq!(reply.text(), "Try a low angle.");
/// assert_eq!(*reply.role(), Role::Assistant);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ChatMessage {
    /// Unique identifier
    #[getter(copy)]
    id: MessageId,
    /// Author
    role: Role,
    /// Message body
    text: String,
    /// Creation time
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message with a fresh id and the current time.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self::with_id(MessageId::new(), role, text)
    }

    /// Creates a message with a preallocated id.
    pub fn with_id(id: MessageId, role: Role, text: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Creates an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Appends a streamed fragment.
    pub fn append(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    /// Replaces the whole body.
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
