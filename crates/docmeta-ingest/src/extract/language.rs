//! Language detection on the opening characters of a document.

use docmeta_infer::LanguageDetector;
use tracing::warn;

/// Returned when the language cannot be determined.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Detect the language of the first `sample_chars` characters.
pub fn detect_language(
    text: &str,
    detector: Option<&dyn LanguageDetector>,
    sample_chars: usize,
) -> String {
    let sample: String = text.chars().take(sample_chars).collect();
    if sample.trim().is_empty() {
        return UNKNOWN_LANGUAGE.to_string();
    }

    let Some(detector) = detector else {
        warn!("No language detector loaded, language is unknown");
        return UNKNOWN_LANGUAGE.to_string();
    };

    match detector.detect(&sample) {
        Some(code) => code,
        None => {
            warn!("Language detection failed ({}), returning unknown", detector.name());
            UNKNOWN_LANGUAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmeta_infer::WhatlangDetector;

    struct FixedDetector(Option<&'static str>);

    impl LanguageDetector for FixedDetector {
        fn name(&self) -> &str {
            "fixed"
        }

        fn detect(&self, sample: &str) -> Option<String> {
            assert!(sample.chars().count() <= 10);
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_sample_is_bounded() {
        let detector = FixedDetector(Some("fr"));
        assert_eq!(detect_language(&"x".repeat(500), Some(&detector), 10), "fr");
    }

    #[test]
    fn test_unknown_cases() {
        let undecided = FixedDetector(None);
        assert_eq!(detect_language("some text", Some(&undecided), 10), UNKNOWN_LANGUAGE);
        assert_eq!(detect_language("some text", None, 10), UNKNOWN_LANGUAGE);
        assert_eq!(detect_language("   ", Some(&FixedDetector(Some("en"))), 10), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_whatlang_english() {
        let text = "The committee reviewed the annual budget and approved funding for \
                    three new community libraries across the northern district.";
        assert_eq!(detect_language(text, Some(&WhatlangDetector::new()), 1000), "en");
    }
}
