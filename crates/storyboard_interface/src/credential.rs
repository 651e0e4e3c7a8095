//! Host credential capability.

use async_trait::async_trait;
use storyboard_error::StoryboardResult;

/// Credential capability provided by the host environment.
///
/// The studio never inspects the credential itself; it only asks the host
/// whether one is selected and asks it to run its selection flow.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Whether a credential is currently selected.
    async fn has_credential(&self) -> StoryboardResult<bool>;

    /// Run the host's selection flow.
    ///
    /// Returns no status; callers assume success when this does not fail.
    async fn select_credential(&self) -> StoryboardResult<()>;
}
