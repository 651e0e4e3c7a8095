//! Trait definitions for the storyboard studio.
//!
//! This crate defines the seams between the orchestrators and the outside world:
//! the AI gateway capabilities a provider must implement, and the host
//! credential capability.

mod credential;
mod session;
mod traits;

pub use credential::CredentialProvider;
pub use session::{ChatSession, ChatTurn};
pub use traits::{Conversation, ImageSynthesis, ScriptAnalysis, StoryboardDriver, TextStream};
