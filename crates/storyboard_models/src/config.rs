//! Layered configuration for the storyboard studio.
//!
//! Sources, later ones override earlier ones:
//! - Bundled defaults (include_str! from storyboard.toml)
//! - `~/.config/storyboard/storyboard.toml`
//! - `./storyboard.toml`
//! - An explicit file passed to [`StoryboardConfig::load_with`]

use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyboard_core::{ArtStyle, GenerationParameters, Resolution};
use storyboard_error::{ConfigError, StoryboardError, StoryboardResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

/// Gemini endpoint and model selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// REST base URL, without a trailing slash
    pub base_url: String,
    /// Model used for structured script analysis
    pub analysis_model: String,
    /// Model used for image synthesis
    pub image_model: String,
    /// Model used for the conversational assistant
    pub chat_model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

/// System instructions sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PromptConfig {
    /// Persona for script analysis
    pub analysis_system: String,
    /// Persona for the chat assistant
    pub chat_system: String,
}

/// Studio defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudioConfig {
    /// Initial resolution tier
    pub default_resolution: Resolution,
    /// Initial art style
    pub default_style: ArtStyle,
    /// Assistant greeting seeded into a new conversation log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
}

impl StudioConfig {
    /// Generation parameters the studio starts with.
    pub fn default_parameters(&self) -> GenerationParameters {
        GenerationParameters::new(self.default_resolution, self.default_style)
    }
}

/// Top-level storyboard configuration.
///
/// # Example
///
/// ```no_run
/// use storyboard_models::StoryboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryboardConfig::load()?;
/// println!("Analysis model: {}", config.gemini.analysis_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoryboardConfig {
    /// Provider settings
    pub gemini: GeminiConfig,
    /// System instructions
    pub prompts: PromptConfig,
    /// Studio defaults
    pub studio: StudioConfig,
}

impl StoryboardConfig {
    /// Bundled defaults only, ignoring any user files.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse.
    pub fn bundled() -> StoryboardResult<Self> {
        finish(bundled_builder())
    }

    /// Load the bundled defaults overlaid with user config files.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if any present file fails to parse.
    #[instrument]
    pub fn load() -> StoryboardResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");
        finish(user_builder())
    }

    /// Like [`StoryboardConfig::load`], with an optional explicit file on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing or any file fails to parse.
    #[instrument(skip(path))]
    pub fn load_with(path: Option<&Path>) -> StoryboardResult<Self> {
        match path {
            Some(path) => {
                debug!(path = %path.display(), "Overlaying explicit configuration file");
                finish(user_builder().add_source(File::from(path)))
            }
            None => Self::load(),
        }
    }

    /// Load the bundled defaults overlaid with a single file.
    ///
    /// The file may set only the keys it cares about.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryboardResult<Self> {
        debug!("Loading configuration from file");
        finish(bundled_builder().add_source(File::from(path.as_ref())))
    }
}

fn bundled_builder() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn user_builder() -> ConfigBuilder<DefaultState> {
    let mut builder = bundled_builder();

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config/storyboard/storyboard.toml");
        builder = builder.add_source(File::from(home_config).required(false));
    }

    builder.add_source(File::with_name("storyboard").required(false))
}

fn finish(builder: ConfigBuilder<DefaultState>) -> StoryboardResult<StoryboardConfig> {
    builder
        .build()
        .map_err(|e| {
            StoryboardError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            StoryboardError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
}
