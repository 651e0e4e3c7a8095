//! Top-level presentation state.

use crate::{ChatOrchestrator, SceneGenerator, ScriptAnalyzer};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use storyboard_core::GenerationParameters;
use storyboard_error::{CredentialError, CredentialErrorKind, StoryboardResult};
use storyboard_interface::{Conversation, CredentialProvider, ImageSynthesis, ScriptAnalysis};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Screen shown once a credential is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum View {
    /// Script entry and analysis
    ScriptInput,
    /// Panels of the current storyboard
    StoryboardView,
}

/// What the studio is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Mode {
    /// Asking the host whether a credential is selected
    CheckingCredential,
    /// Blocked until the user selects a credential
    NeedCredential,
    /// Usable, showing the nested view
    #[display("Ready({})", _0)]
    Ready(View),
}

impl Mode {
    /// Whether provider calls are allowed.
    pub fn is_ready(&self) -> bool {
        matches!(self, Mode::Ready(_))
    }
}

/// Settings applied when the controller builds its orchestrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioOptions {
    /// System instruction for the chat assistant
    pub chat_system_prompt: String,
    /// Greeting seeded into the conversation log
    pub welcome_message: Option<String>,
    /// Parameters every new storyboard starts with
    pub parameters: GenerationParameters,
}

impl StudioOptions {
    /// Options with the given chat persona, no greeting and default parameters.
    pub fn new(chat_system_prompt: impl Into<String>) -> Self {
        Self {
            chat_system_prompt: chat_system_prompt.into(),
            welcome_message: None,
            parameters: GenerationParameters::default(),
        }
    }

    /// Sets the greeting.
    pub fn with_welcome_message(mut self, welcome_message: impl Into<String>) -> Self {
        self.welcome_message = Some(welcome_message.into());
        self
    }

    /// Sets the starting parameters.
    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Drives the studio's screens.
///
/// Starts in [`Mode::CheckingCredential`]. [`PresentationController::check_credential`]
/// moves to [`Mode::NeedCredential`] or [`Mode::Ready`]. A successful
/// [`PresentationController::select_credential`] moves to `Ready` without
/// asking the host again. Inside `Ready` the view follows the storyboard:
/// analysis installs one, [`PresentationController::back_to_script`]
/// discards it.
pub struct PresentationController<G, H> {
    gateway: Arc<G>,
    host: Option<Arc<H>>,
    options: StudioOptions,
    mode: watch::Sender<Mode>,
    analyzer: ScriptAnalyzer<G>,
    chat: ChatOrchestrator<G>,
    generator: Mutex<Option<Arc<SceneGenerator<G>>>>,
}

impl<G, H> PresentationController<G, H>
where
    G: ScriptAnalysis + ImageSynthesis + Conversation,
    H: CredentialProvider,
{
    /// Creates a controller. `host` is `None` when the environment offers no
    /// credential capability; the studio then never becomes ready.
    pub fn new(gateway: Arc<G>, host: Option<Arc<H>>, options: StudioOptions) -> Self {
        let chat = ChatOrchestrator::new(
            Arc::clone(&gateway),
            options.chat_system_prompt.clone(),
            options.welcome_message.clone(),
        );

        Self {
            analyzer: ScriptAnalyzer::new(Arc::clone(&gateway)),
            chat,
            gateway,
            host,
            options,
            mode: watch::Sender::new(Mode::CheckingCredential),
            generator: Mutex::new(None),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        *self.mode.borrow()
    }

    /// Receiver notified on every mode change.
    pub fn subscribe(&self) -> watch::Receiver<Mode> {
        self.mode.subscribe()
    }

    /// Script input screen.
    pub fn analyzer(&self) -> &ScriptAnalyzer<G> {
        &self.analyzer
    }

    /// Conversational assistant.
    pub fn chat(&self) -> &ChatOrchestrator<G> {
        &self.chat
    }

    /// Generator for the current storyboard, if one is shown.
    pub fn storyboard(&self) -> Option<Arc<SceneGenerator<G>>> {
        self.lock_generator().clone()
    }

    /// Asks the host whether a credential is selected.
    ///
    /// A missing host or a failing check counts as no credential.
    #[instrument(skip(self))]
    pub async fn check_credential(&self) -> Mode {
        self.set_mode(Mode::CheckingCredential);

        let has_credential = match &self.host {
            Some(host) => match host.has_credential().await {
                Ok(has_credential) => has_credential,
                Err(e) => {
                    warn!(error = %e, "Credential check failed");
                    false
                }
            },
            None => {
                warn!("Credential host not available");
                false
            }
        };

        let mode = if has_credential {
            Mode::Ready(self.current_view())
        } else {
            Mode::NeedCredential
        };
        self.set_mode(mode);
        mode
    }

    /// Runs the host's selection flow and assumes it worked.
    ///
    /// The credential is not checked again afterwards.
    ///
    /// # Errors
    ///
    /// `CredentialError` if there is no host or the flow fails; the mode is
    /// then `NeedCredential`.
    #[instrument(skip(self))]
    pub async fn select_credential(&self) -> StoryboardResult<()> {
        let Some(host) = &self.host else {
            self.set_mode(Mode::NeedCredential);
            return Err(CredentialError::new(CredentialErrorKind::HostUnavailable(
                "Credential host not detected".to_string(),
            ))
            .into());
        };

        match host.select_credential().await {
            Ok(()) => {
                self.set_mode(Mode::Ready(self.current_view()));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Credential selection failed");
                self.set_mode(Mode::NeedCredential);
                Err(e)
            }
        }
    }

    /// Analyzes the current script and shows the resulting storyboard.
    ///
    /// Returns `None` when the analyzer did nothing, failed, or found no
    /// scenes; the view then stays on script input.
    ///
    /// # Errors
    ///
    /// `CredentialError::Missing` unless the studio is ready.
    #[instrument(skip(self))]
    pub async fn analyze(&self) -> StoryboardResult<Option<Arc<SceneGenerator<G>>>> {
        if !self.mode().is_ready() {
            return Err(CredentialError::new(CredentialErrorKind::Missing).into());
        }

        let Some(storyboard) = self.analyzer.analyze().await else {
            return Ok(None);
        };

        if storyboard.is_empty() {
            info!("Analysis returned no scenes, staying on script input");
            *self.lock_generator() = None;
            self.set_mode(Mode::Ready(View::ScriptInput));
            return Ok(None);
        }

        let generator = Arc::new(SceneGenerator::new(
            Arc::clone(&self.gateway),
            storyboard,
            self.options.parameters,
        ));
        *self.lock_generator() = Some(Arc::clone(&generator));
        info!(scenes = generator.snapshot().len(), "Showing storyboard");
        self.set_mode(Mode::Ready(View::StoryboardView));
        Ok(Some(generator))
    }

    /// Discards the storyboard and returns to script input.
    pub fn back_to_script(&self) {
        *self.lock_generator() = None;
        if self.mode().is_ready() {
            self.set_mode(Mode::Ready(View::ScriptInput));
        }
    }

    fn current_view(&self) -> View {
        if self.lock_generator().is_some() {
            View::StoryboardView
        } else {
            View::ScriptInput
        }
    }

    fn set_mode(&self, mode: Mode) {
        let previous = self.mode.send_replace(mode);
        if previous != mode {
            debug!(%previous, current = %mode, "Mode changed");
        }
    }

    fn lock_generator(&self) -> MutexGuard<'_, Option<Arc<SceneGenerator<G>>>> {
        self.generator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G, H> std::fmt::Debug for PresentationController<G, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationController")
            .field("mode", &*self.mode.borrow())
            .field("has_host", &self.host.is_some())
            .finish_non_exhaustive()
    }
}
