//! Chat error types.

/// Ways a chat turn can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChatErrorKind {
    /// No session exists and none could be created
    #[display("Chat session not initialized: {}", _0)]
    NoSession(String),
    /// User text was empty or whitespace
    #[display("Message is empty")]
    EmptyMessage,
}

/// Chat error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Chat Error: {} at line {} in {}", kind, line, file)]
pub struct ChatError {
    /// The kind of error that occurred
    pub kind: ChatErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ChatError {
    /// Create a new ChatError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ChatErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
