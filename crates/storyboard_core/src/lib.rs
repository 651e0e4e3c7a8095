//! Core data types for the storyboard studio.
//!
//! This crate provides the data model shared by the AI gateway, the orchestrators
//! and the terminal host: scenes and storyboards, chat messages, and the
//! parameters that steer image synthesis.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generation;
mod image;
mod message;
mod role;
mod scene;
mod storyboard;

pub use generation::{ArtStyle, GenerationParameters, GenerationParametersBuilder, Resolution};
pub use image::ImageRef;
pub use message::{ChatMessage, MessageId};
pub use role::Role;
pub use scene::{Scene, SceneBuilder, SceneBuilderError};
pub use storyboard::Storyboard;
