use sha2::{Digest, Sha256};
use std::fmt;

use super::language::{is_auto, normalize_language};
use crate::error::{ApiError, Result};

/// Default Yandex Translate JSON endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translate.yandex.net/api/v1.5/tr.json/translate";

/// Longest text sent in one request, in characters.
pub const MAX_TEXT_CHARS: usize = 10_000;

const ELLIPSIS: char = '\u{2026}';

/// A single text to translate between two languages.
///
/// Construction checks that the text and both language codes are non-empty;
/// the fields cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    source_text: String,
    source_lang: String,
    target_lang: String,
}

impl TranslationRequest {
    pub fn new(
        source_text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Result<Self> {
        let source_text = source_text.into();
        let source_lang = source_lang.into().trim().to_string();
        let target_lang = target_lang.into().trim().to_string();

        if source_text.trim().is_empty() {
            return Err(ApiError::invalid_input("source text is empty"));
        }
        if source_lang.is_empty() {
            return Err(ApiError::invalid_input("source language is empty"));
        }
        if target_lang.is_empty() {
            return Err(ApiError::invalid_input("target language is empty"));
        }

        Ok(Self {
            source_text,
            source_lang,
            target_lang,
        })
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// Returns `true` if the provider should detect the source language.
    pub fn detects_source(&self) -> bool {
        is_auto(&self.source_lang)
    }

    /// The provider's translation direction: `<from>-<to>`, or just `<to>`
    /// when the source language is detected.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ErrorKind::InvalidInput`] error if either language
    /// code is malformed.
    pub fn wire_lang(&self) -> Result<String> {
        let target = normalize_language(&self.target_lang)?;
        if self.detects_source() {
            Ok(target)
        } else {
            let source = normalize_language(&self.source_lang)?;
            Ok(format!("{source}-{target}"))
        }
    }

    /// Computes the translation cache key for this request against `endpoint`.
    pub fn cache_key(&self, endpoint: &str) -> String {
        let cache_input = serde_json::json!({
            "source_text": self.source_text,
            "source_lang": self.source_lang.to_ascii_lowercase(),
            "target_lang": self.target_lang.to_ascii_lowercase(),
            "endpoint": endpoint,
        });

        let mut hasher = Sha256::new();
        hasher.update(cache_input.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// The HTTP payload for one translation call: a URL and its form parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

impl WireRequest {
    /// Returns the value of the form parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for WireRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(key, value)| {
                if *key == "key" {
                    (*key, "<redacted>")
                } else {
                    (*key, value.as_str())
                }
            })
            .collect();

        f.debug_struct("WireRequest")
            .field("url", &self.url)
            .field("params", &params)
            .finish()
    }
}

/// Maps a request to the provider's wire format.
///
/// # Errors
///
/// Returns an [`crate::ErrorKind::InvalidInput`] error if either language
/// code is malformed.
pub fn build(request: &TranslationRequest, endpoint: &str, key: &str) -> Result<WireRequest> {
    let mut params = vec![("key", key.to_string()), ("lang", request.wire_lang()?)];

    if request.detects_source() {
        // Ask the provider to report the language it detected
        params.push(("options", "1".to_string()));
    }

    params.push(("text", truncate_text(&request.source_text)));

    Ok(WireRequest {
        url: endpoint.to_string(),
        params,
    })
}

fn truncate_text(text: &str) -> String {
    if text.chars().count() > MAX_TEXT_CHARS {
        let mut short: String = text.chars().take(MAX_TEXT_CHARS - 1).collect();
        short.push(ELLIPSIS);
        short
    } else {
        text.to_string()
    }
}
