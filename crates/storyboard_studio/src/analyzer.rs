//! Script input screen state.

use std::path::Path;
use std::sync::Arc;
use storyboard_core::Storyboard;
use storyboard_error::{IoError, StoryboardResult};
use storyboard_interface::ScriptAnalysis;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Inline message shown when analysis fails.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze script. Please try again.";

/// Observable state of the script input screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct ScriptInput {
    /// Current script text
    script: String,
    /// Whether an analysis request is outstanding
    #[getter(copy)]
    is_analyzing: bool,
    /// Inline error from the last failed analysis
    error: Option<String>,
}

/// Holds the script text and turns it into a storyboard.
pub struct ScriptAnalyzer<G> {
    gateway: Arc<G>,
    state: watch::Sender<ScriptInput>,
}

impl<G: ScriptAnalysis> ScriptAnalyzer<G> {
    /// Creates an analyzer with an empty script.
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: watch::Sender::new(ScriptInput::default()),
        }
    }

    /// Snapshot of the screen state.
    pub fn state(&self) -> ScriptInput {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ScriptInput> {
        self.state.subscribe()
    }

    /// Current script text.
    pub fn script(&self) -> String {
        self.state.borrow().script.clone()
    }

    /// Whether an analysis request is outstanding.
    pub fn is_analyzing(&self) -> bool {
        self.state.borrow().is_analyzing
    }

    /// Inline error from the last failed analysis.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Replaces the script text.
    pub fn set_script(&self, script: impl Into<String>) {
        let script = script.into();
        self.state.send_modify(|state| state.script = script);
    }

    /// Loads a text file as the script.
    ///
    /// # Errors
    ///
    /// `IoError` if the file cannot be read as UTF-8 text; the current script
    /// is kept.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn load_script_file(&self, path: impl AsRef<Path>) -> StoryboardResult<()> {
        let path = path.as_ref();
        let script = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| IoError::new(format!("{}: {}", path.display(), e)))?;
        debug!(chars = script.len(), "Script file loaded");
        self.set_script(script);
        Ok(())
    }

    /// Analyzes the current script.
    ///
    /// Blank scripts and calls made while a request is outstanding are
    /// ignored. On failure the script is kept and
    /// [`ANALYSIS_FAILED_MESSAGE`] is recorded as the inline error.
    #[instrument(skip(self))]
    pub async fn analyze(&self) -> Option<Storyboard> {
        let mut script = None;
        self.state.send_if_modified(|state| {
            if state.script.trim().is_empty() || state.is_analyzing {
                return false;
            }
            state.is_analyzing = true;
            state.error = None;
            script = Some(state.script.clone());
            true
        });
        let script = script?;

        let result = self.gateway.analyze_script(&script).await;

        self.state.send_modify(|state| {
            state.is_analyzing = false;
            if result.is_err() {
                state.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
            }
        });

        match result {
            Ok(storyboard) => {
                info!(scenes = storyboard.len(), "Storyboard ready");
                Some(storyboard)
            }
            Err(e) => {
                warn!(error = %e, "Script analysis failed");
                None
            }
        }
    }
}

impl<G> std::fmt::Debug for ScriptAnalyzer<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptAnalyzer")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
