use std::path::Path;

use log::{error, info};

use super::dissector::{Dissector, FIELD_SEPARATOR};
use super::parser::parse_output;
use super::types::{FieldRecord, OutputTargets};
use super::writer::{write_csv, write_json};
use crate::error_handling::types::ExtractError;

/// Turns a capture file into [`FieldRecord`]s through an external dissector.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    dissector: Dissector,
}

impl FieldExtractor {
    pub fn new(dissector: Dissector) -> Self {
        Self { dissector }
    }

    /// Dissects `capture`, parses every output line and writes the requested
    /// outputs.
    ///
    /// When the dissector fails its standard error is logged and no output
    /// file is created. Records are returned whether or not any output was
    /// requested.
    pub async fn extract(
        &self,
        capture: &Path,
        targets: &OutputTargets,
    ) -> Result<Vec<FieldRecord>, ExtractError> {
        info!("Extracting fields from {}", capture.display());

        let text = match self.dissector.dissect(capture).await {
            Ok(text) => text,
            Err(ExtractError::DissectorFailed { status, stderr }) => {
                error!("{} error ({}): {}", self.dissector.program(), status, stderr.trim());
                return Err(ExtractError::DissectorFailed { status, stderr });
            }
            Err(e) => {
                error!("Unable to run {}: {}", self.dissector.program(), e);
                return Err(e);
            }
        };

        let records = parse_output(&text, FIELD_SEPARATOR);
        info!("Parsed {} records from {}", records.len(), capture.display());

        if let Some(path) = &targets.json {
            write_json(path, &records)?;
        }
        if let Some(path) = &targets.csv {
            write_csv(path, &records)?;
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scripted(script: &str) -> FieldExtractor {
        FieldExtractor::new(Dissector::new("sh").with_leading_args(["-c", script, "dissector"]))
    }

    fn targets(dir: &TempDir) -> OutputTargets {
        OutputTargets {
            json: Some(dir.path().join("out.json")),
            csv: Some(dir.path().join("out.csv")),
        }
    }

    #[tokio::test]
    async fn records_are_parsed_and_written() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = TempDir::new().unwrap();
        let extractor = scripted(
            "printf '\"1700000000.0\"|\"10.0.0.1\"|\"10.0.0.2\"|\"TCP\"|\"60\"|\"SYN\"\\n\
             \"1700000001.25\"|\"10.0.0.2\"|\"10.0.0.1\"|\"TCP\"|\"60\"\\n'",
        );
        let targets = targets(&dir);

        let records = extractor
            .extract(Path::new("capture.pcap"), &targets)
            .await
            .expect("extraction ok");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].time, "2023-11-14T22:13:20Z");
        assert_eq!(records[0].info, "SYN");
        assert_eq!(records[1].time, "2023-11-14T22:13:21.250000Z");
        assert_eq!(records[1].info, "");

        let json: Vec<FieldRecord> =
            serde_json::from_str(&fs::read_to_string(targets.json.unwrap()).unwrap()).unwrap();
        assert_eq!(json, records);

        let csv = fs::read_to_string(targets.csv.unwrap()).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with("time,src,dst,protocol,length,info"));
    }

    #[tokio::test]
    async fn dissector_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let extractor = scripted("echo 'capture file corrupted' >&2; exit 1");
        let targets = targets(&dir);

        let result = extractor.extract(Path::new("broken.pcap"), &targets).await;

        match result {
            Err(ExtractError::DissectorFailed { stderr, .. }) => {
                assert!(stderr.contains("capture file corrupted"))
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(!targets.json.unwrap().exists());
        assert!(!targets.csv.unwrap().exists());
    }

    #[tokio::test]
    async fn records_are_returned_without_outputs() {
        let dir = TempDir::new().unwrap();
        let extractor = scripted("printf '1700000000|a|b|ARP|42|Who has\\n'");

        let records = extractor
            .extract(Path::new("capture.pcap"), &OutputTargets::none())
            .await
            .expect("extraction ok");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].protocol, "ARP");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
