use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug)]
pub enum SupervisorError {
    DirectoryCreation { path: PathBuf, source: std::io::Error },
    SpawnFailed(std::io::Error),
    MissingDiagnostics,
    NotLaunched,
    MonitorFailed(std::io::Error),
    SignalRegistration(std::io::Error),
}

impl fmt::Display for SupervisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupervisorError::DirectoryCreation { path, source } => {
                write!(f, "Unable to create directory {}: {}", path.display(), source)
            }
            SupervisorError::SpawnFailed(e) => write!(f, "Capture engine spawn failed: {}", e),
            SupervisorError::MissingDiagnostics => {
                write!(f, "Capture engine diagnostic stream unavailable")
            }
            SupervisorError::NotLaunched => write!(f, "Capture engine has not been launched"),
            SupervisorError::MonitorFailed(e) => write!(f, "Capture engine monitor error: {}", e),
            SupervisorError::SignalRegistration(e) => {
                write!(f, "Signal handler registration failed: {}", e)
            }
        }
    }
}

impl std::error::Error for SupervisorError {}

#[derive(Debug)]
pub enum ExtractError {
    DissectorSpawn(std::io::Error),
    DissectorFailed { status: ExitStatus, stderr: String },
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::DissectorSpawn(e) => write!(f, "Dissector spawn failed: {}", e),
            ExtractError::DissectorFailed { status, stderr } => {
                write!(f, "Dissector failed ({}): {}", status, stderr.trim())
            }
            ExtractError::IoError(e) => write!(f, "Output IO error: {}", e),
            ExtractError::JsonError(e) => write!(f, "JSON serialization error: {}", e),
            ExtractError::CsvError(e) => write!(f, "CSV serialization error: {}", e),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::IoError(err)
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        ExtractError::JsonError(err)
    }
}

impl From<csv::Error> for ExtractError {
    fn from(err: csv::Error) -> Self {
        ExtractError::CsvError(err)
    }
}
