//! AI gateway traits.

use crate::ChatSession;
use async_trait::async_trait;
use futures_util::stream::Stream;
use std::pin::Pin;
use storyboard_core::{GenerationParameters, ImageRef, Storyboard};
use storyboard_error::StoryboardResult;

/// Lazily produced assistant text fragments, in arrival order.
///
/// Finite and non-restartable: it ends when the provider signals completion.
pub type TextStream = Pin<Box<dyn Stream<Item = StoryboardResult<String>> + Send>>;

/// Core trait every AI provider implements.
pub trait StoryboardDriver: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}

/// Converts raw script text into a typed list of scenes.
#[async_trait]
pub trait ScriptAnalysis: StoryboardDriver {
    /// Analyze a script into an ordered storyboard.
    ///
    /// Scenes come back in the order the provider emitted them, each without an
    /// image and not in flight. Exactly one provider call; no retry.
    ///
    /// # Errors
    ///
    /// `AnalysisError` when the payload is missing or does not match the scene
    /// schema; provider errors otherwise.
    async fn analyze_script(&self, raw_text: &str) -> StoryboardResult<Storyboard>;
}

/// Synthesizes one image from a prompt.
#[async_trait]
pub trait ImageSynthesis: StoryboardDriver {
    /// Render `visual_prompt` with the given resolution and style.
    ///
    /// The style directive is prefixed to the prompt and a 16:9 image is
    /// requested. Exactly one provider call; no retry.
    ///
    /// # Errors
    ///
    /// `SynthesisError::NoImage` when the response holds no inline image.
    async fn synthesize_image(
        &self,
        visual_prompt: &str,
        params: &GenerationParameters,
    ) -> StoryboardResult<ImageRef>;
}

/// Stateful conversations with incremental replies.
#[async_trait]
pub trait Conversation: StoryboardDriver {
    /// Create a fresh conversation with a fixed system instruction.
    fn open_chat_session(&self, system_prompt: &str) -> StoryboardResult<ChatSession>;

    /// Send one user turn and stream the assistant reply.
    ///
    /// When the stream runs to completion the user turn and the full reply
    /// are committed to the session history.
    async fn stream_chat(
        &self,
        session: &ChatSession,
        user_text: &str,
    ) -> StoryboardResult<TextStream>;
}
