pub mod config;
pub mod types;

pub use config::{CaptureConfig, ExtractArgs};
pub use types::CaptureInterface;
