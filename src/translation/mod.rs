mod client;
mod language;
mod request;
mod response;
mod transport;

pub use client::{TranslationClient, Translator};
pub use language::{AUTO_DETECT, SUPPORTED_LANGUAGES, is_auto, normalize_language, print_languages};
pub use request::{DEFAULT_ENDPOINT, MAX_TEXT_CHARS, TranslationRequest, WireRequest, build};
pub use response::{TranslationResult, parse};
pub use transport::{
    HttpTransport, RetryPolicy, Transport, TransportConfig, WireResponse, with_retry,
};
