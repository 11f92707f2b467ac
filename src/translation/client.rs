use std::future::Future;
use tracing::{debug, instrument};

use super::request::{self, TranslationRequest};
use super::response::{self, TranslationResult};
use super::transport::{HttpTransport, Transport, TransportConfig};
use crate::credentials::CredentialStore;
use crate::error::Result;

/// The single entry point a host needs: translate `text` from `from` to `to`.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> impl Future<Output = Result<TranslationResult>> + Send;
}

/// Translation API client.
///
/// Holds only its credentials, the endpoint, and a transport, so one instance
/// can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct TranslationClient<T = HttpTransport> {
    credentials: CredentialStore,
    endpoint: String,
    transport: T,
}

impl TranslationClient<HttpTransport> {
    /// Creates a client that talks HTTP with the given timeout and retry settings.
    pub fn with_http(
        credentials: CredentialStore,
        endpoint: impl Into<String>,
        config: TransportConfig,
    ) -> Result<Self> {
        Ok(Self::new(credentials, endpoint, HttpTransport::new(config)?))
    }
}

impl<T: Transport> TranslationClient<T> {
    pub fn new(credentials: CredentialStore, endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            credentials,
            endpoint: endpoint.into(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Translates `text` from `from` to `to`.
    ///
    /// `from` may be `auto` to have the provider detect the source language.
    pub async fn translate(&self, text: &str, from: &str, to: &str) -> Result<TranslationResult> {
        let request = TranslationRequest::new(text, from, to)?;
        self.execute(&request).await
    }

    /// Runs an already constructed request: build, send, parse.
    #[instrument(
        skip_all,
        fields(from = request.source_lang(), to = request.target_lang())
    )]
    pub async fn execute(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        // Bad arguments are reported before missing credentials
        request.wire_lang()?;

        let key = self.credentials.api_key()?;
        let wire = request::build(request, &self.endpoint, key)?;
        let wire_response = self.transport.send(&wire).await?;
        let result = response::parse(&wire_response)?;

        debug!(
            chars = result.translated_text.chars().count(),
            detected = result.detected_lang.as_deref(),
            "translation received"
        );
        Ok(result)
    }
}

impl<T: Transport> Translator for TranslationClient<T> {
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<TranslationResult> {
        Self::translate(self, text, from, to).await
    }
}
