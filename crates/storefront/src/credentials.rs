//! Bearer token providers.
//!
//! Authenticated endpoints read the token from an injected
//! [`CredentialProvider`] on every request, so a token written by another
//! process (or by `blanja token set`) is picked up without restarting.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors reading or writing stored credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Token file could not be read or written.
    #[error("Token store error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of the bearer token for authenticated calls.
pub trait CredentialProvider: Send + Sync {
    /// The current bearer token, if the shopper is signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store exists but cannot be read.
    fn bearer_token(&self) -> Result<Option<SecretString>, CredentialError>;
}

/// A fixed token, e.g. from `BLANJA_TOKEN`.
#[derive(Clone)]
pub struct StaticToken(SecretString);

impl StaticToken {
    /// Wrap a token.
    #[must_use]
    pub const fn new(token: SecretString) -> Self {
        Self(token)
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Result<Option<SecretString>, CredentialError> {
        Ok(Some(self.0.clone()))
    }
}

/// Anonymous access: authenticated calls go out without a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Result<Option<SecretString>, CredentialError> {
        Ok(None)
    }
}

/// Token persisted in a plain file, the terminal counterpart of the
/// browser's local storage.
///
/// A missing or blank file means "signed out".
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a token, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn store(&self, token: &SecretString) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        std::fs::write(&self.path, token.expose_secret().trim())
            .map_err(|source| self.io_error(source))?;
        tracing::info!(path = %self.path.display(), "Stored bearer token");
        Ok(())
    }

    /// Remove the stored token. Clearing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), CredentialError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Cleared bearer token");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialProvider for FileTokenStore {
    fn bearer_token(&self) -> Result<Option<SecretString>, CredentialError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| SecretString::from(token.to_string())))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.io_error(source)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_token_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("blanja-credentials-{}-{name}", std::process::id()))
            .join("token")
    }

    #[test]
    fn test_static_token() {
        let provider = StaticToken::new(SecretString::from("abc.def.ghi"));
        let token = provider.bearer_token().unwrap().unwrap();
        assert_eq!(token.expose_secret(), "abc.def.ghi");
    }

    #[test]
    fn test_no_credentials() {
        assert!(NoCredentials.bearer_token().unwrap().is_none());
    }

    #[test]
    fn test_file_store_missing_file_is_signed_out() {
        let store = FileTokenStore::new(temp_token_path("missing"));
        assert!(store.bearer_token().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let store = FileTokenStore::new(temp_token_path("round-trip"));

        store.store(&SecretString::from("  token-123\n")).unwrap();
        let token = store.bearer_token().unwrap().unwrap();
        assert_eq!(token.expose_secret(), "token-123");

        store.clear().unwrap();
        assert!(store.bearer_token().unwrap().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_blank_file_is_signed_out() {
        let store = FileTokenStore::new(temp_token_path("blank"));
        store.store(&SecretString::from("   ")).unwrap();
        assert!(store.bearer_token().unwrap().is_none());
        store.clear().unwrap();
    }
}
