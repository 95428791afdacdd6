//! Record types produced by the field extractor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Column names, in output order, for both JSON keys and the CSV header.
pub const FIELD_NAMES: [&str; 6] = ["time", "src", "dst", "protocol", "length", "info"];

/// Summary of one captured packet.
///
/// All values are kept as text; any of them may be empty when the dissector
/// had nothing to report for the packet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// ISO-8601 UTC instant with a trailing `Z`, or empty if unparsable.
    pub time: String,
    pub src: String,
    pub dst: String,
    pub protocol: String,
    /// Frame length token as emitted by the dissector.
    pub length: String,
    pub info: String,
}

/// Files the extractor should write besides returning the records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTargets {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl OutputTargets {
    pub fn none() -> Self {
        Self::default()
    }
}
