//! Scripted gateway for orchestrator tests.

use async_trait::async_trait;
use futures_util::stream;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storyboard_core::{GenerationParameters, ImageRef, Scene, Storyboard};
use storyboard_error::{
    AnalysisError, AnalysisErrorKind, GeminiError, GeminiErrorKind, StoryboardResult,
    SynthesisError, SynthesisErrorKind,
};
use storyboard_interface::{
    ChatSession, Conversation, ImageSynthesis, ScriptAnalysis, StoryboardDriver, TextStream,
};

/// Base64 payload returned for every successful image.
pub const MOCK_IMAGE_DATA: &str = "iVBORw0KGgo=";

/// Scripted reply for one chat turn.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Stream these fragments, then finish
    Fragments(Vec<&'static str>),
    /// Stream these fragments, then fail
    FailAfter(Vec<&'static str>),
    /// Fail before any fragment is produced
    Refuse,
}

/// Three scenes numbered 1..=3 with prompts "Prompt 1".."Prompt 3".
pub fn three_scene_storyboard() -> Storyboard {
    (1..=3)
        .map(|n| Scene::new(n, format!("Scene {n}"), format!("Prompt {n}")))
        .collect()
}

/// Gateway mock with per-capability scripts and call recording.
///
/// Image calls sleep briefly so concurrent callers interleave.
pub struct MockGateway {
    analyses: Mutex<VecDeque<Result<Storyboard, AnalysisErrorKind>>>,
    analysis_calls: AtomicUsize,
    failing_prompts: Mutex<HashSet<String>>,
    image_calls: Mutex<Vec<(String, GenerationParameters)>>,
    active_images: AtomicUsize,
    max_active_images: AtomicUsize,
    replies: Mutex<VecDeque<MockReply>>,
    refuse_sessions: bool,
    sessions_opened: AtomicUsize,
    chat_calls: Mutex<Vec<(String, usize)>>,
}

impl MockGateway {
    /// Succeeds everywhere; analysis returns three scenes.
    pub fn new() -> Self {
        Self {
            analyses: Mutex::new(VecDeque::new()),
            analysis_calls: AtomicUsize::new(0),
            failing_prompts: Mutex::new(HashSet::new()),
            image_calls: Mutex::new(Vec::new()),
            active_images: AtomicUsize::new(0),
            max_active_images: AtomicUsize::new(0),
            replies: Mutex::new(VecDeque::new()),
            refuse_sessions: false,
            sessions_opened: AtomicUsize::new(0),
            chat_calls: Mutex::new(Vec::new()),
        }
    }

    /// Gateway whose session creation always fails.
    pub fn refusing_sessions() -> Self {
        Self {
            refuse_sessions: true,
            ..Self::new()
        }
    }

    /// Queues the result of the next analysis.
    pub fn push_analysis(&self, result: Result<Storyboard, AnalysisErrorKind>) {
        self.analyses.lock().unwrap().push_back(result);
    }

    /// Makes synthesis fail for this prompt.
    pub fn fail_prompt(&self, prompt: &str) {
        self.failing_prompts.lock().unwrap().insert(prompt.to_string());
    }

    /// Makes synthesis succeed again for this prompt.
    pub fn heal_prompt(&self, prompt: &str) {
        self.failing_prompts.lock().unwrap().remove(prompt);
    }

    /// Queues the reply for the next chat turn.
    pub fn push_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn analysis_calls(&self) -> usize {
        self.analysis_calls.load(Ordering::SeqCst)
    }

    /// Prompts and parameters of every synthesis call, in issue order.
    pub fn image_calls(&self) -> Vec<(String, GenerationParameters)> {
        self.image_calls.lock().unwrap().clone()
    }

    /// Largest number of synthesis calls outstanding at once.
    pub fn max_concurrent_images(&self) -> usize {
        self.max_active_images.load(Ordering::SeqCst)
    }

    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }

    /// Text and committed history length of every chat call.
    pub fn chat_calls(&self) -> Vec<(String, usize)> {
        self.chat_calls.lock().unwrap().clone()
    }
}

impl StoryboardDriver for MockGateway {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[async_trait]
impl ScriptAnalysis for MockGateway {
    async fn analyze_script(&self, _raw_text: &str) -> StoryboardResult<Storyboard> {
        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(1)).await;

        let next = self.analyses.lock().unwrap().pop_front();
        match next.unwrap_or_else(|| Ok(three_scene_storyboard())) {
            Ok(storyboard) => Ok(storyboard),
            Err(kind) => Err(AnalysisError::new(kind).into()),
        }
    }
}

#[async_trait]
impl ImageSynthesis for MockGateway {
    async fn synthesize_image(
        &self,
        visual_prompt: &str,
        params: &GenerationParameters,
    ) -> StoryboardResult<ImageRef> {
        self.image_calls
            .lock()
            .unwrap()
            .push((visual_prompt.to_string(), *params));
        let active = self.active_images.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active_images.fetch_max(active, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;

        self.active_images.fetch_sub(1, Ordering::SeqCst);
        if self.failing_prompts.lock().unwrap().contains(visual_prompt) {
            return Err(SynthesisError::new(SynthesisErrorKind::NoImage).into());
        }
        Ok(ImageRef::new("image/png", MOCK_IMAGE_DATA))
    }
}

#[async_trait]
impl Conversation for MockGateway {
    fn open_chat_session(&self, system_prompt: &str) -> StoryboardResult<ChatSession> {
        if self.refuse_sessions {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey(
                "GEMINI_API_KEY".to_string(),
            ))
            .into());
        }
        self.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(ChatSession::new(system_prompt))
    }

    async fn stream_chat(
        &self,
        session: &ChatSession,
        user_text: &str,
    ) -> StoryboardResult<TextStream> {
        self.chat_calls
            .lock()
            .unwrap()
            .push((user_text.to_string(), session.history().len()));

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Fragments(vec!["ok"]));

        let (fragments, fail) = match reply {
            MockReply::Refuse => {
                return Err(GeminiError::new(GeminiErrorKind::HttpError {
                    status_code: 503,
                    message: "Model is overloaded".to_string(),
                })
                .into());
            }
            MockReply::Fragments(fragments) => (fragments, false),
            MockReply::FailAfter(fragments) => (fragments, true),
        };

        let mut items: Vec<StoryboardResult<String>> =
            fragments.iter().map(|f| Ok(f.to_string())).collect();
        if fail {
            items.push(Err(GeminiError::new(GeminiErrorKind::StreamInterrupted(
                "connection reset".to_string(),
            ))
            .into()));
        } else {
            session.commit(user_text, fragments.concat());
        }

        Ok(Box::pin(stream::iter(items)))
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle, as the orchestrators take it.
pub fn shared(gateway: MockGateway) -> Arc<MockGateway> {
    Arc::new(gateway)
}
