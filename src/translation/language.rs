//! Language code validation and the languages the provider offers.

use crate::error::{ApiError, Result};
use crate::ui::Style;

/// Source language value asking the provider to detect the language.
pub const AUTO_DETECT: &str = "auto";

/// Language codes (ISO 639-1) accepted by the Yandex Translate API.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("az", "Azerbaijani"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("ga", "Irish"),
    ("gl", "Galician"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ka", "Georgian"),
    ("kk", "Kazakh"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("mn", "Mongolian"),
    ("ms", "Malay"),
    ("mt", "Maltese"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("tg", "Tajik"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("tt", "Tatar"),
    ("uk", "Ukrainian"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes (ISO 639-1)"));
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:5} {}", Style::code(code), Style::secondary(name));
    }
    println!(
        "  {:5} {}",
        Style::code(AUTO_DETECT),
        Style::secondary("Detect source language")
    );
}

/// Returns `true` if `code` asks for source language detection.
pub fn is_auto(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO_DETECT)
}

/// Validates a language tag and returns the code sent on the wire.
///
/// Accepts `en`, `en-US`, `pt_BR`, `zh-Hant-TW` and similar tags. The result
/// is the lower-cased primary subtag.
///
/// # Errors
///
/// Returns an [`crate::ErrorKind::InvalidInput`] error for malformed tags.
pub fn normalize_language(code: &str) -> Result<String> {
    let trimmed = code.trim();
    let mut subtags = trimmed.split(['-', '_']);

    let primary = subtags.next().unwrap_or_default();
    let primary_ok =
        (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
    let rest_ok = subtags.all(|tag| {
        (1..=8).contains(&tag.len()) && tag.chars().all(|c| c.is_ascii_alphanumeric())
    });

    if primary_ok && rest_ok {
        Ok(primary.to_ascii_lowercase())
    } else {
        Err(ApiError::invalid_input(format!(
            "invalid language code: '{trimmed}' (expected an ISO 639-1 code such as en, ru, de)"
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_normalize_plain_codes() {
        assert_eq!(normalize_language("en").unwrap(), "en");
        assert_eq!(normalize_language("RU").unwrap(), "ru");
        assert_eq!(normalize_language(" de ").unwrap(), "de");
    }

    #[test]
    fn test_normalize_strips_region() {
        assert_eq!(normalize_language("en-US").unwrap(), "en");
        assert_eq!(normalize_language("pt_BR").unwrap(), "pt");
        assert_eq!(normalize_language("zh-Hant-TW").unwrap(), "zh");
    }

    #[test]
    fn test_normalize_rejects_malformed() {
        for code in ["", "e", "english", "e1", "en-", "en--US", "en-toolongsubtag", "-en"] {
            let err = normalize_language(code).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "code: {code:?}");
        }
    }

    #[test]
    fn test_is_auto() {
        assert!(is_auto("auto"));
        assert!(is_auto("AUTO"));
        assert!(!is_auto("en"));
    }

    #[test]
    fn test_supported_languages_are_normalized() {
        for (code, _) in SUPPORTED_LANGUAGES {
            assert_eq!(normalize_language(code).unwrap(), *code);
        }
    }
}
