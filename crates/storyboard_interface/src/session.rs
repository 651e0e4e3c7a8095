//! Provider-side conversation state.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use storyboard_core::Role;

/// One committed exchange entry in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ChatTurn {
    /// Author of the turn
    role: Role,
    /// Full text of the turn
    text: String,
}

impl ChatTurn {
    /// Creates a turn.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Handle to one conversation: its system instruction and committed history.
///
/// Clones share the same history, so a stream can commit the finished exchange
/// back into the handle its caller holds. A turn is only committed once its
/// reply has streamed completely; failed turns leave no trace.
///
/// # Examples
///
/// ```
/// use storyboard_interface::ChatSession;
///
/// let session = ChatSession::new("You are a helpful assistant.");
/// let shared = session.clone();
/// shared.commit("Hi", "Hello!");
///
/// assert_eq!(session.history().len(), 2);
/// assert_eq!(session.history()[1].text(), "Hello!");
/// ```
#[derive(Debug, Clone)]
pub struct ChatSession {
    system_instruction: Arc<str>,
    history: Arc<Mutex<Vec<ChatTurn>>>,
}

impl ChatSession {
    /// Creates an empty conversation.
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: Arc::from(system_instruction.into()),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// System instruction fixed at creation.
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Snapshot of the committed history.
    pub fn history(&self) -> Vec<ChatTurn> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records a completed exchange.
    pub fn commit(&self, user_text: impl Into<String>, reply: impl Into<String>) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.push(ChatTurn::new(Role::User, user_text));
        history.push(ChatTurn::new(Role::Assistant, reply));
    }

    /// Whether two handles refer to the same conversation.
    pub fn same_session(&self, other: &ChatSession) -> bool {
        Arc::ptr_eq(&self.history, &other.history)
    }
}
