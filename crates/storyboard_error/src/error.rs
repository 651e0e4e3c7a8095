//! Top-level error wrapper types.

use crate::{
    AnalysisError, ChatError, ConfigError, CredentialError, GeminiError, HttpError, IoError,
    JsonError, SynthesisError,
};

/// Every error condition the storyboard workspace can raise.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StoryboardError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryboardErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Local file error
    #[from(IoError)]
    Io(IoError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Missing or unusable credential
    #[from(CredentialError)]
    Credential(CredentialError),
    /// Script analysis failure
    #[from(AnalysisError)]
    Analysis(AnalysisError),
    /// Image synthesis failure
    #[from(SynthesisError)]
    Synthesis(SynthesisError),
    /// Chat failure
    #[from(ChatError)]
    Chat(ChatError),
}

/// Storyboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardErrorKind, StoryboardResult, AnalysisError, AnalysisErrorKind};
///
/// fn analyze() -> StoryboardResult<()> {
///     Err(AnalysisError::new(AnalysisErrorKind::EmptyPayload))?
/// }
///
/// let err = analyze().unwrap_err();
/// assert!(matches!(err.kind(), StoryboardErrorKind::Analysis(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {}", _0)]
pub struct StoryboardError(Box<StoryboardErrorKind>);

impl StoryboardError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryboardErrorKind {
        &self.0
    }
}

impl<T> From<T> for StoryboardError
where
    T: Into<StoryboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for storyboard operations.
pub type StoryboardResult<T> = std::result::Result<T, StoryboardError>;
