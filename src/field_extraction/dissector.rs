use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use log::debug;
use tokio::process::Command;

use crate::error_handling::types::ExtractError;

/// Character between fields in the dissector output. Never part of a value
/// for the fields requested below.
pub const FIELD_SEPARATOR: char = '|';

/// Fields requested from the dissector, in output order.
pub const DISSECTOR_FIELDS: [&str; 6] = [
    "frame.time_epoch",
    "ip.src",
    "ip.dst",
    "_ws.col.Protocol",
    "frame.len",
    "_ws.col.Info",
];

/// Launch recipe for the external dissection tool.
///
/// Invoked as `<program> [leading args] -r <pcap> -T fields -e <field>...
/// -E separator=| -E quote=d -E occurrence=f`.
#[derive(Debug, Clone)]
pub struct Dissector {
    program: String,
    leading_args: Vec<String>,
}

impl Dissector {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn tshark() -> Self {
        Self::new("tshark")
    }

    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self, capture: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();
        args.push("-r".into());
        args.push(capture.as_os_str().to_owned());
        args.push("-T".into());
        args.push("fields".into());
        for field in DISSECTOR_FIELDS {
            args.push("-e".into());
            args.push(field.into());
        }
        for option in [
            format!("separator={}", FIELD_SEPARATOR),
            "quote=d".to_string(),
            "occurrence=f".to_string(),
        ] {
            args.push("-E".into());
            args.push(option.into());
        }
        args
    }

    /// Runs the dissector to completion and returns its standard output.
    ///
    /// The whole output is buffered in memory. A non-zero exit is an error
    /// carrying the captured standard error text.
    pub async fn dissect(&self, capture: &Path) -> Result<String, ExtractError> {
        let args = self.arguments(capture);
        debug!("Running dissector {} with args {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(ExtractError::DissectorSpawn)?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(ExtractError::DissectorFailed {
                status: output.status,
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            debug!("Dissector diagnostics: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for Dissector {
    fn default() -> Self {
        Self::tshark()
    }
}
