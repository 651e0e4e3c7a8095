//! Orchestration for the storyboard studio.
//!
//! The studio is a set of small state machines driven by a host shell:
//!
//! - [`PresentationController`] gates everything on a host credential and
//!   toggles between script input and the storyboard view
//! - [`ScriptAnalyzer`] holds the script text and runs analysis
//! - [`SceneGenerator`] renders panels one at a time or as a sequential batch
//! - [`ChatOrchestrator`] streams assistant replies into a message log
//!
//! Provider failures never escape an orchestrator: they become state
//! (an empty panel, an inline error, an apology in the conversation).
//! Observers follow state through `tokio::sync::watch` receivers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod chat;
mod credential;
mod generation;
mod presentation;

pub use analyzer::{ANALYSIS_FAILED_MESSAGE, ScriptAnalyzer, ScriptInput};
pub use chat::{APOLOGY, ChatOrchestrator, TurnStream};
pub use credential::EnvCredentialHost;
pub use generation::{BatchReport, SceneGenerator, SceneOutcome};
pub use presentation::{Mode, PresentationController, StudioOptions, View};
