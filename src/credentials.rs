//! API key storage.

use std::fmt;

use crate::error::{ApiError, Result};

/// Environment variable read for the API key when the config names none.
pub const DEFAULT_API_KEY_ENV: &str = "YANDEX_TRANSLATE_API_KEY";

/// Holds the provider API key for the lifetime of a client.
///
/// Built once from configuration and never mutated afterwards.
#[derive(Clone, Default)]
pub struct CredentialStore {
    api_key: Option<String>,
}

impl CredentialStore {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_option(Some(api_key.into()))
    }

    /// A store without a key. Every call made with it fails with a config error.
    pub const fn empty() -> Self {
        Self { api_key: None }
    }

    fn from_option(api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Self { api_key }
    }

    /// Resolves the key from the named environment variable, falling back to
    /// `configured` (the value written in the config file).
    pub fn resolve(env_var: &str, configured: Option<&str>) -> Self {
        if let Ok(key) = std::env::var(env_var)
            && !key.trim().is_empty()
        {
            return Self::new(key);
        }
        Self::from_option(configured.map(str::to_string))
    }

    /// Returns the API key.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ErrorKind::Config`] error if no key was configured.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ApiError::config(format!(
                "API key is not set (export {DEFAULT_API_KEY_ENV} or set api_key in the config file)"
            ))
        })
    }

    pub const fn is_set(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
