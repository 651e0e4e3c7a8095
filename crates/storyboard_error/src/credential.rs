//! Credential error types.

/// Why the studio cannot use the provider credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CredentialErrorKind {
    /// No credential has been selected
    #[display("No API key selected")]
    Missing,
    /// The host does not offer a credential capability at all
    #[display("Credential host not available: {}", _0)]
    HostUnavailable(String),
    /// The host credential check itself failed
    #[display("Credential check failed: {}", _0)]
    CheckFailed(String),
    /// The host credential selection flow failed
    #[display("Credential selection failed: {}", _0)]
    SelectionFailed(String),
}

/// Credential error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{CredentialError, CredentialErrorKind};
///
/// let err = CredentialError::new(CredentialErrorKind::Missing);
/// assert!(err.to_string().contains("No API key selected"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Credential Error: {} at line {} in {}", kind, line, file)]
pub struct CredentialError {
    /// The kind of error that occurred
    pub kind: CredentialErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CredentialError {
    /// Create a new CredentialError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CredentialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
