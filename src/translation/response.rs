use serde::{Deserialize, Serialize};

use super::transport::WireResponse;
use crate::error::{ApiError, Result};

/// A successful translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    /// Source language reported by the provider, when detection was requested.
    pub detected_lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    code: Option<u16>,
    message: Option<String>,
    text: Option<PayloadText>,
    detected: Option<Detected>,
}

// The JSON API answers with an array; single strings are accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PayloadText {
    One(String),
    Many(Vec<String>),
}

impl PayloadText {
    fn into_text(self) -> String {
        match self {
            Self::One(text) => text,
            Self::Many(parts) => parts.concat(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Detected {
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CodePayload {
    code: Option<u16>,
}

/// Status the provider actually reports for `response`.
///
/// The JSON API can answer with HTTP 200 and carry its real status in the
/// body's `code` field. Anything else falls back to the HTTP status.
pub fn provider_status(response: &WireResponse) -> u16 {
    if !(200..300).contains(&response.status) {
        return response.status;
    }
    serde_json::from_str::<CodePayload>(&response.body)
        .ok()
        .and_then(|p| p.code)
        .unwrap_or(response.status)
}

/// Decodes a provider response into a result or a typed error.
///
/// # Errors
///
/// Non-success statuses map through [`ApiError::from_status`]. A success
/// response that is not JSON or carries no translated text is a
/// [`crate::ErrorKind::ServerError`].
pub fn parse(response: &WireResponse) -> Result<TranslationResult> {
    if !(200..300).contains(&response.status) {
        return Err(ApiError::from_status(
            response.status,
            error_message(&response.body),
        ));
    }

    let payload: Payload = serde_json::from_str(&response.body).map_err(|e| {
        ApiError::malformed_response(format!("unexpected response payload: {e}"))
    })?;

    if let Some(code) = payload.code
        && code != 200
    {
        return Err(ApiError::from_status(code, payload.message));
    }

    let translated_text = payload
        .text
        .map(PayloadText::into_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ApiError::malformed_response("response contains no translated text"))?;

    let detected_lang = payload
        .detected
        .and_then(|d| d.lang)
        .filter(|lang| !lang.is_empty());

    Ok(TranslationResult {
        translated_text,
        detected_lang,
    })
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|p| p.message)
}
