//! Error types for the storyboard studio.
//!
//! This crate provides the error taxonomy used throughout the storyboard workspace.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! The domain errors mirror how failures surface to the user:
//! - [`CredentialError`] blocks the whole studio until a key is selected
//! - [`AnalysisError`] is shown inline next to the preserved script
//! - [`SynthesisError`] leaves a single panel empty
//! - [`ChatError`] becomes an apology inside the conversation
//!
//! # Examples
//!
//! ```
//! use storyboard_error::{StoryboardResult, HttpError};
//!
//! fn fetch_data() -> StoryboardResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod chat;
mod credential;
mod error;
mod gemini;
mod message;
mod synthesis;

pub use analysis::{AnalysisError, AnalysisErrorKind};
pub use chat::{ChatError, ChatErrorKind};
pub use credential::{CredentialError, CredentialErrorKind};
pub use error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use message::{ConfigError, HttpError, IoError, JsonError};
pub use synthesis::{SynthesisError, SynthesisErrorKind};
