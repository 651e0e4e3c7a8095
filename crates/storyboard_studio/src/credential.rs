//! Terminal credential host.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use storyboard_error::{CredentialError, CredentialErrorKind, StoryboardResult};
use storyboard_interface::CredentialProvider;
use tracing::{debug, instrument};

/// Credential capability backed by the process environment and a `.env` file.
///
/// A credential is present when the configured variable is set to a
/// non-empty value. Selecting reads the variable from the `.env` file and
/// keeps it in memory; the process environment is never modified.
#[derive(Debug)]
pub struct EnvCredentialHost {
    var: String,
    env_file: PathBuf,
    selected: Mutex<Option<String>>,
}

impl EnvCredentialHost {
    /// Host reading `var`, selecting from `./.env`.
    pub fn new(var: impl Into<String>) -> Self {
        Self::with_env_file(var, ".env")
    }

    /// Host reading `var`, selecting from the given file.
    pub fn with_env_file(var: impl Into<String>, env_file: impl Into<PathBuf>) -> Self {
        Self {
            var: var.into(),
            env_file: env_file.into(),
            selected: Mutex::new(None),
        }
    }

    /// Name of the variable holding the key.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// The key, from the environment or an earlier selection.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.selected
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone()
            })
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialHost {
    async fn has_credential(&self) -> StoryboardResult<bool> {
        Ok(self.api_key().is_some())
    }

    #[instrument(skip(self), fields(var = %self.var, env_file = %self.env_file.display()))]
    async fn select_credential(&self) -> StoryboardResult<()> {
        let entries = dotenvy::from_path_iter(&self.env_file).map_err(|e| {
            CredentialError::new(CredentialErrorKind::SelectionFailed(format!(
                "{}: {}",
                self.env_file.display(),
                e
            )))
        })?;

        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                CredentialError::new(CredentialErrorKind::SelectionFailed(e.to_string()))
            })?;
            if key == self.var && !value.trim().is_empty() {
                debug!("Credential selected from env file");
                *self.selected.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
                return Ok(());
            }
        }

        Err(CredentialError::new(CredentialErrorKind::SelectionFailed(format!(
            "{} not set in {}",
            self.var,
            self.env_file.display()
        )))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn selection_reads_the_env_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "OTHER=1")?;
        writeln!(file, "STORYBOARD_TEST_SELECTED_KEY=abc123")?;

        let host = EnvCredentialHost::with_env_file("STORYBOARD_TEST_SELECTED_KEY", file.path());
        assert!(!host.has_credential().await?);

        host.select_credential().await?;

        assert!(host.has_credential().await?);
        assert_eq!(host.api_key().as_deref(), Some("abc123"));
        Ok(())
    }

    #[tokio::test]
    async fn selection_without_the_variable_fails() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "SOMETHING_ELSE=1")?;

        let host = EnvCredentialHost::with_env_file("STORYBOARD_TEST_ABSENT_KEY", file.path());

        assert!(host.select_credential().await.is_err());
        assert!(!host.has_credential().await?);
        Ok(())
    }

    #[tokio::test]
    async fn missing_env_file_fails_selection() {
        let host = EnvCredentialHost::with_env_file(
            "STORYBOARD_TEST_NO_FILE_KEY",
            "/nonexistent/storyboard/.env",
        );

        assert!(host.select_credential().await.is_err());
    }
}
