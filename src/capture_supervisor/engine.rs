use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use log::debug;
use tokio::process::{Child, Command};

use crate::configuration::types::CaptureInterface;
use crate::error_handling::types::SupervisorError;

/// Launch recipe for the external capture engine.
///
/// The engine is invoked as `<program> [leading args] -i <iface> -w <path>`.
/// Leading arguments are empty for a real `tshark`; they exist so wrappers
/// (e.g. `sudo`, `sh -c`) can be placed in front of the fixed arguments.
#[derive(Debug, Clone)]
pub struct CaptureEngine {
    program: String,
    leading_args: Vec<String>,
}

impl CaptureEngine {
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

    /// Full argument vector handed to the engine, program name excluded.
    pub fn arguments(&self, interface: &CaptureInterface, output_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();
        args.push("-i".into());
        args.push(interface.as_engine_arg().into());
        args.push("-w".into());
        args.push(output_path.as_os_str().to_owned());
        args
    }

    /// Spawns the engine with its diagnostic stream piped back to us.
    ///
    /// Standard output is discarded: the engine writes packets to the file
    /// and has nothing useful to say on stdout.
    pub fn spawn(
        &self,
        interface: &CaptureInterface,
        output_path: &Path,
    ) -> Result<Child, SupervisorError> {
        let args = self.arguments(interface, output_path);
        debug!("Spawning capture engine {} with args {:?}", self.program, args);

        Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(SupervisorError::SpawnFailed)
    }
}

impl Default for CaptureEngine {
    fn default() -> Self {
        Self::tshark()
    }
}
