//! Capture-file field extraction.
//!
//! Runs a dissection tool (`tshark -T fields` by default) over a capture file,
//! reshapes its delimited text output into [`FieldRecord`]s and optionally
//! writes them as JSON and/or CSV.
//!
//! The dissector output is buffered whole before parsing, so memory use grows
//! with the size of the capture being processed.

pub mod dissector;
pub mod extractor;
pub mod parser;
pub mod types;
pub mod writer;

pub use dissector::{Dissector, DISSECTOR_FIELDS, FIELD_SEPARATOR};
pub use extractor::FieldExtractor;
pub use parser::{epoch_to_iso8601, parse_line, parse_output};
pub use types::{FieldRecord, OutputTargets, FIELD_NAMES};
pub use writer::{write_csv, write_json};
