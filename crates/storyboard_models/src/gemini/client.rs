//! Gemini REST client implementation.

use super::protocol::{
    AnalysisPayload, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageConfig, Schema,
};
use super::sse::SseDecoder;
use crate::StoryboardConfig;
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Response};
use std::time::Duration;
use storyboard_core::{GenerationParameters, ImageRef, Storyboard};
use storyboard_error::{
    AnalysisError, AnalysisErrorKind, GeminiError, GeminiErrorKind, HttpError,
    StoryboardError, StoryboardResult, SynthesisError, SynthesisErrorKind,
};
use storyboard_interface::{
    ChatSession, Conversation, ImageSynthesis, ScriptAnalysis, StoryboardDriver, TextStream,
};
use tracing::{debug, info, instrument, warn};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` REST API.
///
/// One client serves all three studio capabilities, each against its own
/// configured model. Cloning is cheap; clones share the connection pool.
///
/// # Example
///
/// ```no_run
/// use storyboard_interface::ScriptAnalysis;
/// use storyboard_models::GeminiClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::new()?;
/// let storyboard = client.analyze_script("INT. DINER - NIGHT\nA waitress pours coffee.").await?;
/// println!("{} scenes", storyboard.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    analysis_model: String,
    image_model: String,
    chat_model: String,
    analysis_system: String,
}

impl GeminiClient {
    /// Creates a client from the layered configuration files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load, the API key variable
    /// is unset, or the HTTP client cannot be built.
    #[instrument]
    pub fn new() -> StoryboardResult<Self> {
        Self::from_config(&StoryboardConfig::load()?)
    }

    /// Creates a client, reading the API key from `config.gemini.api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or empty, or the HTTP client
    /// cannot be built.
    #[instrument(skip_all, fields(api_key_env = %config.gemini.api_key_env))]
    pub fn from_config(config: &StoryboardConfig) -> StoryboardResult<Self> {
        let var = &config.gemini.api_key_env;
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey(var.clone())))?;

        Self::with_api_key(api_key, config)
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(skip_all)]
    pub fn with_api_key(
        api_key: impl Into<String>,
        config: &StoryboardConfig,
    ) -> StoryboardResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.gemini.request_timeout_secs))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: config.gemini.base_url.trim_end_matches('/').to_string(),
            analysis_model: config.gemini.analysis_model.clone(),
            image_model: config.gemini.image_model.clone(),
            chat_model: config.gemini.chat_model.clone(),
            analysis_system: config.prompts.analysis_system.clone(),
        })
    }

    /// Points the client at another endpoint (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        model: &str,
        method: &str,
        query: &[(&str, &str)],
        request: &GenerateContentRequest,
    ) -> StoryboardResult<Response> {
        let url = format!("{}/models/{}:{}", self.base_url, model, method);
        debug!(url = %url, "Sending Gemini API request");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .json(request)
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status_code, "Gemini API returned an error status");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message,
            })
            .into());
        }

        Ok(response)
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> StoryboardResult<GenerateContentResponse> {
        let body = self
            .send(model, "generateContent", &[], request)
            .await?
            .text()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            GeminiError::new(GeminiErrorKind::InvalidResponse(e.to_string())).into()
        })
    }
}

fn analysis_prompt(script: &str) -> String {
    format!(
        "Analyze the following script and break it down into a sequence of key visual scenes for a storyboard.\n\
         For each scene, provide a scene number, a brief narrative description, and a highly detailed visual prompt optimized for image generation.\n\
         \n\
         SCRIPT:\n\
         {script}"
    )
}

fn build_request(
    builder: &mut super::protocol::GenerateContentRequestBuilder,
) -> StoryboardResult<GenerateContentRequest> {
    builder
        .build()
        .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())).into())
}

fn interrupted(message: impl Into<String>) -> StoryboardError {
    GeminiError::new(GeminiErrorKind::StreamInterrupted(message.into())).into()
}

/// Text carried by one streamed event; empty fragments are dropped.
fn decode_fragment(event: &str) -> StoryboardResult<Option<String>> {
    let chunk: GenerateContentResponse = serde_json::from_str(event)
        .map_err(|e| interrupted(format!("Undecodable stream event: {}", e)))?;
    Ok(chunk.text().filter(|text| !text.is_empty()))
}

impl StoryboardDriver for GeminiClient {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.analysis_model
    }
}

#[async_trait]
impl ScriptAnalysis for GeminiClient {
    #[instrument(skip(self, raw_text), fields(model = %self.analysis_model, script_len = raw_text.len()))]
    async fn analyze_script(&self, raw_text: &str) -> StoryboardResult<Storyboard> {
        let request = build_request(
            GenerateContentRequest::builder()
                .contents(vec![Content::user(analysis_prompt(raw_text))])
                .system_instruction(Content::system(self.analysis_system.clone()))
                .generation_config(GenerationConfig::json(Schema::storyboard())),
        )?;

        let response = self.generate(&self.analysis_model, &request).await?;
        let text = response
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AnalysisError::new(AnalysisErrorKind::EmptyPayload))?;

        let payload: AnalysisPayload = serde_json::from_str(&text)
            .map_err(|e| AnalysisError::new(AnalysisErrorKind::MalformedPayload(e.to_string())))?;

        let storyboard = Storyboard::from(payload);
        info!(scenes = storyboard.len(), "Script analyzed");
        Ok(storyboard)
    }
}

#[async_trait]
impl ImageSynthesis for GeminiClient {
    #[instrument(
        skip(self, visual_prompt),
        fields(model = %self.image_model, resolution = %params.resolution(), style = %params.style())
    )]
    async fn synthesize_image(
        &self,
        visual_prompt: &str,
        params: &GenerationParameters,
    ) -> StoryboardResult<ImageRef> {
        let request = build_request(
            GenerateContentRequest::builder()
                .contents(vec![Content::user(
                    params.style().compose_prompt(visual_prompt),
                )])
                .generation_config(GenerationConfig::image(ImageConfig::panel(
                    *params.resolution(),
                ))),
        )?;

        let response = self.generate(&self.image_model, &request).await?;
        let inline = response
            .first_inline_data()
            .ok_or_else(|| SynthesisError::new(SynthesisErrorKind::NoImage))?;

        debug!(mime_type = %inline.mime_type(), bytes = inline.data().len(), "Image received");
        Ok(ImageRef::new(inline.mime_type().clone(), inline.data().clone()))
    }
}

#[async_trait]
impl Conversation for GeminiClient {
    fn open_chat_session(&self, system_prompt: &str) -> StoryboardResult<ChatSession> {
        debug!(model = %self.chat_model, "Opening chat session");
        Ok(ChatSession::new(system_prompt))
    }

    #[instrument(skip(self, session, user_text), fields(model = %self.chat_model, history = session.history().len()))]
    async fn stream_chat(
        &self,
        session: &ChatSession,
        user_text: &str,
    ) -> StoryboardResult<TextStream> {
        let mut contents: Vec<Content> = session.history().iter().map(Content::from).collect();
        contents.push(Content::user(user_text));

        let request = build_request(
            GenerateContentRequest::builder()
                .contents(contents)
                .system_instruction(Content::system(session.system_instruction())),
        )?;

        let response = self
            .send(
                &self.chat_model,
                "streamGenerateContent",
                &[("alt", "sse")],
                &request,
            )
            .await?;

        let session = session.clone();
        let user_text = user_text.to_string();

        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            let mut body = Box::pin(response.bytes_stream());
            let mut reply = String::new();

            loop {
                let (events, done) = match body.next().await {
                    Some(Ok(chunk)) => (decoder.push(&chunk), false),
                    Some(Err(e)) => {
                        yield Err(interrupted(e.to_string()));
                        return;
                    }
                    None => (decoder.finish().into_iter().collect::<Vec<_>>(), true),
                };

                for event in events {
                    match decode_fragment(&event) {
                        Ok(Some(fragment)) => {
                            reply.push_str(&fragment);
                            yield Ok(fragment);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }

                if done {
                    break;
                }
            }

            debug!(reply_len = reply.len(), "Chat reply complete");
            session.commit(user_text, reply);
        };

        Ok(Box::pin(stream))
    }
}
