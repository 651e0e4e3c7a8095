//! Scripted credential host.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use storyboard_error::{CredentialError, CredentialErrorKind, StoryboardResult};
use storyboard_interface::CredentialProvider;

/// How the selection flow behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockSelection {
    /// Resolves without error
    Succeeds,
    /// Rejects
    Fails,
}

/// Host reporting a fixed credential state.
pub struct MockHost {
    has_credential: Option<bool>,
    selection: MockSelection,
    check_calls: AtomicUsize,
    select_calls: AtomicUsize,
}

impl MockHost {
    /// Host whose check reports `has_credential`.
    pub fn new(has_credential: bool, selection: MockSelection) -> Self {
        Self {
            has_credential: Some(has_credential),
            selection,
            check_calls: AtomicUsize::new(0),
            select_calls: AtomicUsize::new(0),
        }
    }

    /// Host whose check itself errors.
    pub fn broken_check() -> Self {
        Self {
            has_credential: None,
            ..Self::new(false, MockSelection::Succeeds)
        }
    }

    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub fn select_calls(&self) -> usize {
        self.select_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for MockHost {
    async fn has_credential(&self) -> StoryboardResult<bool> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        self.has_credential.ok_or_else(|| {
            CredentialError::new(CredentialErrorKind::CheckFailed(
                "Requested entity was not found.".to_string(),
            ))
            .into()
        })
    }

    async fn select_credential(&self) -> StoryboardResult<()> {
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        match self.selection {
            MockSelection::Succeeds => Ok(()),
            MockSelection::Fails => Err(CredentialError::new(
                CredentialErrorKind::SelectionFailed("dialog dismissed".to_string()),
            )
            .into()),
        }
    }
}
