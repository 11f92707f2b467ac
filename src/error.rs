//! Typed errors returned by the translation client.
//!
//! Every failure of a translation call is an [`ApiError`]: a [`ErrorKind`]
//! classifying it, a human-readable message, and whether retrying the same call
//! could succeed.

use std::fmt;

use thiserror::Error;

/// Classification of a failed translation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or unusable client configuration (e.g. no API key).
    Config,
    /// Connection failure, timeout, or an unreadable response stream.
    Network,
    /// The provider rejected the API key.
    Auth,
    /// A request or volume quota was exceeded.
    RateLimited,
    /// The arguments can never be translated as given.
    InvalidInput,
    /// The provider failed or answered with something we cannot decode.
    ServerError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Config => "configuration error",
            Self::Network => "network error",
            Self::Auth => "authentication error",
            Self::RateLimited => "rate limited",
            Self::InvalidInput => "invalid input",
            Self::ServerError => "server error",
        };
        f.write_str(name)
    }
}

/// A failed translation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
    /// Provider status code that produced this error, if any.
    pub status: Option<u16>,
}

impl ApiError {
    fn new(kind: ErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
            status: None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message, false)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message, true)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message, false)
    }

    /// A successful response whose payload could not be decoded.
    ///
    /// Not retryable: the provider would answer the same way again.
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerError, message, false)
    }

    /// Maps a provider status code to an error.
    ///
    /// `message` is the provider's own explanation, when it sent one.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let (kind, fallback) = match status {
            401 => (ErrorKind::Auth, "API key is invalid"),
            402 => (ErrorKind::Auth, "API key is blocked"),
            403 => (ErrorKind::RateLimited, "daily request limit exceeded"),
            404 => (ErrorKind::RateLimited, "daily character limit exceeded"),
            429 => (ErrorKind::RateLimited, "too many requests"),
            413 => (ErrorKind::InvalidInput, "text exceeds the maximum size"),
            422 => (ErrorKind::InvalidInput, "text cannot be translated"),
            501 => (
                ErrorKind::InvalidInput,
                "translation direction is not supported",
            ),
            400..=499 => (ErrorKind::InvalidInput, "request rejected by the provider"),
            500..=599 => (ErrorKind::ServerError, "provider failed to handle the request"),
            _ => (ErrorKind::ServerError, "unexpected response status"),
        };

        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        Self {
            kind,
            message: format!("{status}: {message}"),
            retryable: status_is_retryable(status),
            status: Some(status),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn is_retryable(&self) -> bool {
        self.retryable
    }
}

/// Returns `true` if a response with this status is worth sending again.
///
/// Only server-side failures qualify. 501 means the language pair is not
/// supported, which no retry changes.
pub const fn status_is_retryable(status: u16) -> bool {
    matches!(status, 500 | 502..=599)
}

/// Result type for translation calls.
pub type Result<T> = std::result::Result<T, ApiError>;
