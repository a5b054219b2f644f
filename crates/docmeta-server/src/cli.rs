//! One-shot extraction for the `docmeta extract` subcommand.

use std::path::Path;

use docmeta_core::{MetadataRecord, Result};
use docmeta_ingest::Ingester;
use tracing::info;

/// Output path used when none is given.
pub const DEFAULT_OUTPUT: &str = "metadata.json";

/// Generate metadata for `input` and write it as pretty JSON to `output`.
pub fn extract_to_file(ingester: &Ingester, input: &Path, output: &Path) -> Result<MetadataRecord> {
    let record = ingester.ingest_file(input)?;
    std::fs::write(output, record.to_json_pretty()?)?;
    info!("Wrote metadata for {} to {}", input.display(), output.display());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmeta_core::{DocMetaConfig, Error};
    use docmeta_infer::ModelCapabilities;
    use tempfile::TempDir;

    fn ingester() -> Ingester {
        Ingester::new(&DocMetaConfig::default(), ModelCapabilities::none(), None)
    }

    #[test]
    fn test_writes_metadata_json() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("notes.txt");
        let output = dir.path().join(DEFAULT_OUTPUT);
        std::fs::write(&input, "Operations Handbook For New Staff\nWelcome aboard.").unwrap();

        let record = extract_to_file(&ingester(), &input, &output).unwrap();
        assert_eq!(record.title, "Operations Handbook For New Staff");

        let written = MetadataRecord::from_json(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, record);
    }

    #[test]
    fn test_unsupported_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("slides.pptx");
        std::fs::write(&input, b"PK").unwrap();

        let err = extract_to_file(&ingester(), &input, &dir.path().join("out.json")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }
}
