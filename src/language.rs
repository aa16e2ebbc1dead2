//! Transcript languages offered to users.
//!
//! Codes are passed to the transcript service as-is; this list only drives
//! help output and warnings.

use serde::Serialize;

/// Default transcript language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A selectable transcript language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "it", name: "Italian" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "te", name: "Telugu" },
    Language { code: "ml", name: "Malayalam" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "gu", name: "Gujarati" },
    Language { code: "mr", name: "Marathi" },
    Language { code: "ur", name: "Urdu" },
    Language { code: "pa", name: "Punjabi" },
    Language { code: "fa", name: "Persian" },
    Language { code: "tr", name: "Turkish" },
    Language { code: "th", name: "Thai" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "id", name: "Indonesian" },
    Language { code: "ms", name: "Malay" },
    Language { code: "fil", name: "Filipino" },
    Language { code: "sw", name: "Swahili" },
    Language { code: "am", name: "Amharic" },
];

/// Look up the display name for a language code (case-insensitive).
pub fn language_name(code: &str) -> Option<&'static str> {
    let code = code.trim();
    LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
        .map(|l| l.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lookup() {
        assert_eq!(language_name("en"), Some("English"));
        assert_eq!(language_name("FIL"), Some("Filipino"));
        assert_eq!(language_name("xx"), None);
    }

    #[test]
    fn test_default_is_listed() {
        assert!(language_name(DEFAULT_LANGUAGE).is_some());
        assert_eq!(LANGUAGES.len(), 29);
    }
}
