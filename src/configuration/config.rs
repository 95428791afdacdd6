use super::types::*;
use clap::Parser;
use std::path::PathBuf;

/// Runtime configuration of the capture supervisor.
///
/// Every field can be given on the command line or through the environment,
/// which is how container deployments usually configure the service.
///
/// # Fields Overview
///
/// - `interface`: interface to capture on, `any` for all of them
/// - `pcap_dir`: directory receiving the raw capture files
/// - `output_dir`: directory reserved for derived outputs, created at startup
/// - `engine`: capture engine program, `tshark` unless overridden
#[derive(Parser, Debug, Clone)]
#[command(name = "netcap-capture")]
#[command(version)]
#[command(about = "Supervises a long-running packet capture")]
pub struct CaptureConfig {
    /// Interface to capture on.
    ///
    /// # Command Line
    /// Use `--interface <NAME>` or `CAPTURE_IFACE`
    #[arg(long, env = "CAPTURE_IFACE", default_value = ALL_INTERFACES)]
    pub interface: CaptureInterface,

    /// Directory where raw capture files are written.
    ///
    /// Created (parents included) at startup when missing.
    ///
    /// # Command Line
    /// Use `--pcap-dir <PATH>` or `PCAP_DIR`
    #[arg(long, env = "PCAP_DIR", default_value = "/app/pcaps")]
    pub pcap_dir: PathBuf,

    /// Directory for derived outputs.
    ///
    /// Not written by the supervisor itself, only created so later processing
    /// stages can rely on it.
    ///
    /// # Command Line
    /// Use `--output-dir <PATH>` or `OUTPUT_DIR`
    #[arg(long, env = "OUTPUT_DIR", default_value = "/app/output")]
    pub output_dir: PathBuf,

    /// Capture engine executable.
    #[arg(long, env = "CAPTURE_ENGINE", default_value = "tshark")]
    pub engine: String,
}

impl CaptureConfig {
    /// Parses the configuration from the process arguments and environment.
    ///
    /// # Panics
    /// Exits the process with clap's usage message on invalid arguments.
    pub fn from_args() -> Self {
        CaptureConfig::parse()
    }
}

/// Command line of the field extractor.
#[derive(Parser, Debug, Clone)]
#[command(name = "netcap-extract")]
#[command(version)]
#[command(about = "Extracts packet summary fields from a capture file")]
pub struct ExtractArgs {
    /// Capture file to process
    pub pcap: PathBuf,

    /// Write the records as a JSON array to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write the records as CSV to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Dissection tool executable
    #[arg(long, env = "DISSECTOR_BIN", default_value = "tshark")]
    pub dissector: String,
}

impl ExtractArgs {
    pub fn from_args() -> Self {
        ExtractArgs::parse()
    }
}
