//! # ytr - Yandex Translate client
//!
//! A small client for the Yandex Translate API and the `ytr` command built on it.
//!
//! The library side is a single entry point, [`TranslationClient::translate`]
//! (also reachable through the [`Translator`] trait), which validates its
//! arguments, builds the wire request, sends it with bounded retries, and
//! decodes the answer into a [`TranslationResult`] or a typed [`ApiError`].
//!
//! ```no_run
//! # async fn demo() -> Result<(), ytr_cli::ApiError> {
//! use ytr_cli::{CredentialStore, TranslationClient, TransportConfig, DEFAULT_ENDPOINT};
//!
//! let client = TranslationClient::with_http(
//!     CredentialStore::new("trnsl.1.1.example"),
//!     DEFAULT_ENDPOINT,
//!     TransportConfig::default(),
//! )?;
//! let result = client.translate("hello", "en", "ru").await?;
//! println!("{}", result.translated_text);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! The CLI reads `~/.config/ytr/config.toml`:
//!
//! ```toml
//! [ytr]
//! from = "en"
//! to = "ru"
//!
//! [api]
//! api_key_env = "YANDEX_TRANSLATE_API_KEY"
//! timeout_secs = 10
//! max_retries = 2
//! ```

/// Translation cache management using `SQLite`.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// API key storage.
pub mod credentials;

/// Typed translation errors.
pub mod error;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Tracing subscriber setup.
pub mod logging;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Translation client for the Yandex Translate API.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;

pub use credentials::CredentialStore;
pub use error::{ApiError, ErrorKind};
pub use translation::{
    DEFAULT_ENDPOINT, HttpTransport, RetryPolicy, TranslationClient, TranslationRequest,
    TranslationResult, Translator, Transport, TransportConfig,
};
