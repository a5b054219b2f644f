//! Language detection.

use whatlang::Lang;

/// Trait for language detectors.
pub trait LanguageDetector: Send + Sync {
    fn name(&self) -> &str;

    /// Detect the language of a text sample. Returns None when undecidable.
    fn detect(&self, sample: &str) -> Option<String>;
}

/// Trigram-based detector from the `whatlang` crate.
#[derive(Debug, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn name(&self) -> &str {
        "whatlang"
    }

    fn detect(&self, sample: &str) -> Option<String> {
        let info = whatlang::detect(sample)?;
        tracing::debug!(
            "Detected {} (confidence={:.2}, reliable={})",
            info.lang().eng_name(),
            info.confidence(),
            info.is_reliable()
        );
        Some(iso_639_1(info.lang()).to_string())
    }
}

/// Two-letter ISO 639-1 code where one exists; ISO 639-3 otherwise.
pub fn iso_639_1(lang: Lang) -> &'static str {
    match lang.code() {
        "afr" => "af",
        "ara" => "ar",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "ind" => "id",
        "ita" => "it",
        "jpn" => "ja",
        "kan" => "kn",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "nld" => "nl",
        "nob" => "no",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "slk" => "sk",
        "slv" => "sl",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tha" => "th",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "vie" => "vi",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english() {
        let detector = WhatlangDetector::new();
        let text = "The committee reviewed the annual budget and approved funding \
                    for the new library, the community garden, and several road repairs.";
        assert_eq!(detector.detect(text).as_deref(), Some("en"));
    }

    #[test]
    fn test_detects_spanish() {
        let detector = WhatlangDetector::new();
        let text = "El comité revisó el presupuesto anual y aprobó la financiación \
                    para la nueva biblioteca y varias reparaciones de carreteras.";
        assert_eq!(detector.detect(text).as_deref(), Some("es"));
    }

    #[test]
    fn test_empty_sample_is_undecidable() {
        assert!(WhatlangDetector::new().detect("").is_none());
    }

    #[test]
    fn test_code_mapping() {
        assert_eq!(iso_639_1(Lang::Eng), "en");
        assert_eq!(iso_639_1(Lang::Deu), "de");
    }
}
