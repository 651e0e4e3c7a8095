//! # Storyboard
//!
//! Turn a written script into a sequence of illustrated storyboard panels,
//! with a conversational assistant on the side.
//!
//! ## Overview
//!
//! A script is sent to a multimodal model that breaks it into scenes, each
//! with a narrative description and a detailed visual prompt. Panels are then
//! rendered one at a time or as a sequential batch, in a chosen resolution
//! tier and art style. The assistant streams its replies fragment by
//! fragment.
//!
//! ## Architecture
//!
//! Storyboard is organized as a workspace with focused crates:
//!
//! - **`storyboard_error`** - Error types
//! - **`storyboard_core`** - Scenes, storyboards, chat messages, generation parameters
//! - **`storyboard_interface`** - Gateway traits and chat sessions
//! - **`storyboard_models`** - Gemini client and layered configuration
//! - **`storyboard_studio`** - Orchestrators driven by a host shell
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # {
//! use std::sync::Arc;
//! use storyboard::{
//!     EnvCredentialHost, GeminiClient, PresentationController, StoryboardConfig, StudioOptions,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryboardConfig::load()?;
//! let gateway = Arc::new(GeminiClient::from_config(&config)?);
//! let host = Arc::new(EnvCredentialHost::new(config.gemini.api_key_env.clone()));
//! let options = StudioOptions::new(config.prompts.chat_system.clone())
//!     .with_parameters(config.studio.default_parameters());
//!
//! let studio = PresentationController::new(gateway, Some(host), options);
//! studio.check_credential().await;
//!
//! studio.analyzer().set_script("EXT. HARBOR - DAWN\nFishing boats drift out into the fog.");
//! if let Some(generator) = studio.analyze().await? {
//!     let report = generator.generate_all().await;
//!     println!("{:?}", report);
//! }
//! # Ok(())
//! # }
//! # }
//! ```
//!
//! ## Features
//!
//! - `gemini` (default): the Gemini gateway and the `storyboard` binary
//! - `observability`: OpenTelemetry span export through [`observability`]
//! - `api`: enables tests that call the real API
//!
//! ## Configuration
//!
//! Settings are read from the bundled `storyboard.toml`, then
//! `~/.config/storyboard/storyboard.toml`, then `./storyboard.toml`. The API
//! key comes from the variable named by `gemini.api_key_env`, or from a
//! `.env` file when the credential is selected.

pub mod telemetry;

#[cfg(feature = "observability")]
pub mod observability;

// Re-export core crates (always available)
pub use storyboard_core::*;
pub use storyboard_error::*;
pub use storyboard_interface::*;
pub use storyboard_studio::*;

// Re-export optional crates based on features
#[cfg(feature = "gemini")]
pub use storyboard_models::*;
