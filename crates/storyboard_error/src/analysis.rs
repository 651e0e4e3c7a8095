//! Script analysis error types.

/// Ways script analysis can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AnalysisErrorKind {
    /// Provider returned no text payload
    #[display("No response from AI")]
    EmptyPayload,
    /// Payload did not parse as the scene schema
    #[display("Failed to parse AI response: {}", _0)]
    MalformedPayload(String),
    /// Nothing to analyze
    #[display("Script is empty")]
    BlankScript,
    /// Analysis did not produce a storyboard; carries the inline message
    #[display("{}", _0)]
    NoStoryboard(String),
}

/// Script analysis error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{AnalysisError, AnalysisErrorKind};
///
/// let err = AnalysisError::new(AnalysisErrorKind::EmptyPayload);
/// assert!(err.to_string().contains("No response from AI"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Analysis Error: {} at line {} in {}", kind, line, file)]
pub struct AnalysisError {
    /// The kind of error that occurred
    pub kind: AnalysisErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AnalysisError {
    /// Create a new AnalysisError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AnalysisErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
