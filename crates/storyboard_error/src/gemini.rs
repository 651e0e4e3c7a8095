//! Gemini provider error types.

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// API key not found in the configured environment variable
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Failed to construct the HTTP client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message (response body when available)
        message: String,
    },
    /// Response body did not match the generateContent envelope
    #[display("Invalid response envelope: {}", _0)]
    InvalidResponse(String),
    /// Streaming connection dropped or produced an undecodable event
    #[display("Stream interrupted: {}", _0)]
    StreamInterrupted(String),
}

impl GeminiErrorKind {
    /// HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GeminiErrorKind::HttpError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether the provider rejected the credential (401/403).
    ///
    /// The studio has no way to re-verify a selected key, so callers use this
    /// to hint that the key may be the problem.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::MissingApiKey("GEMINI_API_KEY".into()));
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_401_and_403_only() {
        let unauthorized = GeminiErrorKind::HttpError {
            status_code: 401,
            message: "API key not valid".to_string(),
        };
        let forbidden = GeminiErrorKind::HttpError {
            status_code: 403,
            message: "Permission denied".to_string(),
        };
        let overloaded = GeminiErrorKind::HttpError {
            status_code: 503,
            message: "Model is overloaded".to_string(),
        };

        assert!(unauthorized.is_auth_failure());
        assert!(forbidden.is_auth_failure());
        assert!(!overloaded.is_auth_failure());
        assert!(!GeminiErrorKind::MissingApiKey("GEMINI_API_KEY".to_string()).is_auth_failure());
    }

    #[test]
    fn location_points_at_constructor_call() {
        let err = GeminiError::new(GeminiErrorKind::StreamInterrupted("eof".to_string()));
        assert!(err.file.ends_with("gemini.rs"));
        assert!(err.to_string().contains("Stream interrupted: eof"));
    }
}
