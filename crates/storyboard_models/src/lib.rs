//! AI provider integration for the storyboard studio.
//!
//! This crate provides the Gemini implementation of the gateway traits in
//! `storyboard_interface`, together with the layered configuration shared by
//! every crate in the workspace.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # {
//! use storyboard_core::GenerationParameters;
//! use storyboard_interface::ImageSynthesis;
//! use storyboard_models::{GeminiClient, StoryboardConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryboardConfig::load()?;
//! let client = GeminiClient::from_config(&config)?;
//! let image = client
//!     .synthesize_image("A lighthouse in a storm.", &config.studio.default_parameters())
//!     .await?;
//! println!("{} bytes of {}", image.data().len(), image.mime_type());
//! # Ok(())
//! # }
//! # }
//! ```

mod config;

pub use config::{GeminiConfig, PromptConfig, StoryboardConfig, StudioConfig};

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{
    AnalysisPayload, Candidate, Content, GeminiClient, GenerateContentRequest,
    GenerateContentRequestBuilder, GenerateContentResponse, GenerationConfig, ImageConfig,
    InlineData, Part, Schema, SchemaType, SseDecoder,
};
