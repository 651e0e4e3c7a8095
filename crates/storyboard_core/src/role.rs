//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a chat message.
///
/// # Examples
///
/// ```
/// use storyboard_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::Assistant), "Assistant");
/// assert_eq!(Role::Assistant.wire_name(), "model");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// Messages typed by the human
    User,
    /// Messages produced by the assistant
    Assistant,
}

impl Role {
    /// Role name used on the provider wire ("user" / "model").
    pub fn wire_name(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}
