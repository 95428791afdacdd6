use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, ChildStderr};

use super::engine::CaptureEngine;
use crate::configuration::config::CaptureConfig;
use crate::configuration::types::CaptureInterface;
use crate::error_handling::types::SupervisorError;

/// Builds `<dir>/capture_<YYYYMMDD-HHMMSS>.pcap` for a capture started at `started_at`.
pub fn capture_file_path(dir: &Path, started_at: &DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "capture_{}.pcap",
        started_at.format("%Y%m%d-%H%M%S")
    ))
}

/// Creates `dir` and its parents; an existing directory is not an error.
pub fn ensure_dir(dir: &Path) -> Result<(), SupervisorError> {
    fs::create_dir_all(dir).map_err(|source| SupervisorError::DirectoryCreation {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!("Directory ready: {}", dir.display());
    Ok(())
}

/// One capture run: where it writes and the engine process writing it.
///
/// The engine handle stays `None` until [`CaptureSession::launch`] succeeds
/// and goes back to `None` once it has been terminated, so at most one
/// engine is ever owned by a session.
#[derive(Debug)]
pub struct CaptureSession {
    interface: CaptureInterface,
    output_path: PathBuf,
    engine: Option<Child>,
}

impl CaptureSession {
    pub fn new(interface: CaptureInterface, output_path: PathBuf) -> Self {
        Self {
            interface,
            output_path,
            engine: None,
        }
    }

    /// Prepares the filesystem for a run and derives the output file path.
    ///
    /// Both the capture directory and the derived-output directory are
    /// created when missing.
    pub fn prepare(
        config: &CaptureConfig,
        started_at: &DateTime<Local>,
    ) -> Result<Self, SupervisorError> {
        ensure_dir(&config.pcap_dir)?;
        ensure_dir(&config.output_dir)?;

        let output_path = capture_file_path(&config.pcap_dir, started_at);
        Ok(Self::new(config.interface.clone(), output_path))
    }

    pub fn interface(&self) -> &CaptureInterface {
        &self.interface
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_some()
    }

    /// Pid of the owned engine, if launched and not yet reaped.
    pub fn engine_pid(&self) -> Option<u32> {
        self.engine.as_ref().and_then(|child| child.id())
    }

    /// Starts the engine and hands back its diagnostic stream.
    ///
    /// A session that already owns an engine refuses to start a second one
    /// and returns the spawn error without touching the running process.
    pub fn launch(&mut self, engine: &CaptureEngine) -> Result<ChildStderr, SupervisorError> {
        if self.engine.is_some() {
            return Err(SupervisorError::SpawnFailed(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "capture engine already running for this session",
            )));
        }

        let mut child = engine.spawn(&self.interface, &self.output_path)?;
        let stderr = match child.stderr.take() {
            Some(stderr) => stderr,
            None => {
                let _ = child.start_kill();
                return Err(SupervisorError::MissingDiagnostics);
            }
        };

        info!(
            "Capture engine {} started (pid {:?})",
            engine.program(),
            child.id()
        );
        self.engine = Some(child);
        Ok(stderr)
    }

    /// Non-blocking exit check of the owned engine.
    pub fn poll_exit(&mut self) -> Result<Option<ExitStatus>, SupervisorError> {
        match self.engine.as_mut() {
            Some(child) => child.try_wait().map_err(SupervisorError::MonitorFailed),
            None => Err(SupervisorError::NotLaunched),
        }
    }

    /// Waits until the owned engine exits.
    pub async fn wait_exit(&mut self) -> Result<ExitStatus, SupervisorError> {
        match self.engine.as_mut() {
            Some(child) => child.wait().await.map_err(SupervisorError::MonitorFailed),
            None => Err(SupervisorError::NotLaunched),
        }
    }

    /// Asks the engine to stop and releases ownership of it.
    ///
    /// Sends SIGTERM so the engine can flush its capture file, falling back
    /// to a forced kill if the request cannot be delivered. Failures caused
    /// by an engine that is already gone are ignored. Returns the released
    /// process so the caller may reap it; `None` when there was nothing to
    /// terminate, which makes repeated calls harmless.
    pub fn terminate_engine(&mut self) -> Option<Child> {
        let mut child = self.engine.take()?;

        match child.id() {
            Some(pid) => {
                if !send_sigterm(pid) {
                    debug!("SIGTERM not delivered to pid {}, killing", pid);
                    if let Err(e) = child.start_kill() {
                        warn!("Failed to kill capture engine {}: {}", pid, e);
                    }
                } else {
                    debug!("Sent SIGTERM to capture engine pid {}", pid);
                }
            }
            None => debug!("Capture engine already exited, nothing to terminate"),
        }

        Some(child)
    }
}

fn send_sigterm(pid: u32) -> bool {
    let Ok(pid) = i32::try_from(pid) else {
        return false;
    };
    match signal::kill(Pid::from_raw(pid), Signal::SIGTERM) {
        Ok(()) => true,
        Err(e) => {
            debug!("kill({}, SIGTERM) failed: {}", pid, e);
            false
        }
    }
}
