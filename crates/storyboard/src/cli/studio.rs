//! Studio construction and the credential gate.

use super::gateway::HostedGateway;
use std::path::Path;
use std::sync::Arc;
use storyboard::{
    AnalysisError, AnalysisErrorKind, EnvCredentialHost, Mode, PresentationController,
    SceneGenerator, StoryboardConfig, StoryboardResult, StudioOptions,
};
use tracing::{info, instrument};

/// Presentation controller as driven from the terminal.
pub type Studio = PresentationController<HostedGateway, EnvCredentialHost>;

/// Studio options taken from configuration.
pub fn studio_options(config: &StoryboardConfig) -> StudioOptions {
    let options = StudioOptions::new(config.prompts.chat_system.clone())
        .with_parameters(config.studio.default_parameters());

    match &config.studio.welcome_message {
        Some(welcome) => options.with_welcome_message(welcome.clone()),
        None => options,
    }
}

/// Loads configuration, builds the studio and makes it ready.
///
/// When the environment holds no key the selection flow runs once; its
/// outcome is trusted without checking again.
#[instrument(skip_all)]
pub async fn open_studio(config_path: Option<&Path>) -> StoryboardResult<Studio> {
    let config = StoryboardConfig::load_with(config_path)?;
    let host = Arc::new(EnvCredentialHost::new(config.gemini.api_key_env.clone()));
    let options = studio_options(&config);
    let gateway = Arc::new(HostedGateway::new(Arc::clone(&host), config));

    let studio = PresentationController::new(gateway, Some(host), options);
    if studio.check_credential().await == Mode::NeedCredential {
        info!("No API key in the environment, selecting from .env");
        studio.select_credential().await?;
    }

    Ok(studio)
}

/// Loads a script file and analyzes it.
///
/// # Errors
///
/// File errors, or an `AnalysisError` carrying the inline message when no
/// storyboard was produced.
pub async fn analyze_file(
    studio: &Studio,
    script: &Path,
) -> StoryboardResult<Arc<SceneGenerator<HostedGateway>>> {
    studio.analyzer().load_script_file(script).await?;
    if studio.analyzer().script().trim().is_empty() {
        return Err(AnalysisError::new(AnalysisErrorKind::BlankScript).into());
    }

    match studio.analyze().await? {
        Some(generator) => Ok(generator),
        None => {
            let message = studio
                .analyzer()
                .error()
                .unwrap_or_else(|| "No scenes found in script".to_string());
            Err(AnalysisError::new(AnalysisErrorKind::NoStoryboard(message)).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard::{ArtStyle, Resolution};

    #[test]
    fn options_follow_configuration() -> anyhow::Result<()> {
        let mut config = StoryboardConfig::bundled()?;
        config.studio.default_resolution = Resolution::TwoK;
        config.studio.default_style = ArtStyle::Noir;
        config.studio.welcome_message = None;

        let options = studio_options(&config);

        assert_eq!(options.chat_system_prompt, config.prompts.chat_system);
        assert_eq!(*options.parameters.resolution(), Resolution::TwoK);
        assert_eq!(*options.parameters.style(), ArtStyle::Noir);
        assert_eq!(options.welcome_message, None);
        Ok(())
    }

    #[test]
    fn bundled_welcome_is_seeded() -> anyhow::Result<()> {
        let config = StoryboardConfig::bundled()?;
        let options = studio_options(&config);
        assert_eq!(options.welcome_message, config.studio.welcome_message);
        assert!(options.welcome_message.is_some());
        Ok(())
    }
}
