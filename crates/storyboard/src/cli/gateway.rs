//! Gateway whose key comes from the credential host.

use async_trait::async_trait;
use std::sync::{Arc, OnceLock};
use storyboard::{
    ChatSession, Conversation, CredentialError, CredentialErrorKind, EnvCredentialHost,
    GeminiClient, GenerationParameters, ImageRef, ImageSynthesis, ScriptAnalysis,
    Storyboard, StoryboardConfig, StoryboardDriver, StoryboardResult, TextStream,
};
use tracing::debug;

/// Builds the Gemini client on first use, with whatever key the host holds
/// at that moment.
///
/// The studio is constructed before the credential is checked, so the key
/// cannot be known up front.
#[derive(Debug)]
pub struct HostedGateway {
    host: Arc<EnvCredentialHost>,
    config: StoryboardConfig,
    client: OnceLock<GeminiClient>,
}

impl HostedGateway {
    pub fn new(host: Arc<EnvCredentialHost>, config: StoryboardConfig) -> Self {
        Self {
            host,
            config,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> StoryboardResult<&GeminiClient> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let api_key = self
            .host
            .api_key()
            .ok_or_else(|| CredentialError::new(CredentialErrorKind::Missing))?;
        let client = GeminiClient::with_api_key(api_key, &self.config)?;
        debug!(base_url = %client.base_url(), "Gemini client ready");
        Ok(self.client.get_or_init(|| client))
    }
}

impl StoryboardDriver for HostedGateway {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.config.gemini.analysis_model
    }
}

#[async_trait]
impl ScriptAnalysis for HostedGateway {
    async fn analyze_script(&self, raw_text: &str) -> StoryboardResult<Storyboard> {
        self.client()?.analyze_script(raw_text).await
    }
}

#[async_trait]
impl ImageSynthesis for HostedGateway {
    async fn synthesize_image(
        &self,
        visual_prompt: &str,
        params: &GenerationParameters,
    ) -> StoryboardResult<ImageRef> {
        self.client()?.synthesize_image(visual_prompt, params).await
    }
}

#[async_trait]
impl Conversation for HostedGateway {
    fn open_chat_session(&self, system_prompt: &str) -> StoryboardResult<ChatSession> {
        self.client()?.open_chat_session(system_prompt)
    }

    async fn stream_chat(
        &self,
        session: &ChatSession,
        user_text: &str,
    ) -> StoryboardResult<TextStream> {
        self.client()?.stream_chat(session, user_text).await
    }
}
