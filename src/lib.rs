pub mod capture_supervisor;
pub use capture_supervisor::{CaptureEngine, CaptureSession, CaptureSupervisor, SupervisorOutcome};

pub mod field_extraction;
pub use field_extraction::{Dissector, FieldExtractor, FieldRecord, OutputTargets};

pub mod configuration;
pub mod error_handling;
pub mod logging;
