use std::future::Future;
use std::process::ExitStatus;

use chrono::{DateTime, Local};
use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::signal::unix::{signal, SignalKind};

use super::engine::CaptureEngine;
use super::session::CaptureSession;
use super::types::{ShutdownSignal, SupervisorOutcome};
use crate::configuration::config::CaptureConfig;
use crate::error_handling::types::SupervisorError;

/// Owns one capture session and keeps it alive until shutdown or engine exit.
///
/// The supervisor does not restart the engine. When the engine exits on its
/// own, [`CaptureSupervisor::run`] returns and relaunching is left to whatever
/// manages the process (a container restart policy, systemd, ...).
pub struct CaptureSupervisor {
    session: CaptureSession,
    engine: CaptureEngine,
}

enum Stop {
    Signal(ShutdownSignal),
    Exited(Result<ExitStatus, SupervisorError>),
}

impl CaptureSupervisor {
    pub fn new(session: CaptureSession, engine: CaptureEngine) -> Self {
        Self { session, engine }
    }

    /// Prepares directories and the output path for a capture starting now-ish.
    pub fn from_config(
        config: &CaptureConfig,
        started_at: &DateTime<Local>,
    ) -> Result<Self, SupervisorError> {
        let session = CaptureSession::prepare(config, started_at)?;
        Ok(Self::new(session, CaptureEngine::new(config.engine.clone())))
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// Handles a shutdown request.
    ///
    /// Safe whether or not the engine was ever launched; the engine receives
    /// at most one terminate request no matter how often this is called.
    /// The supervisor does not wait for the engine to finish exiting.
    pub fn shutdown(&mut self, signal: ShutdownSignal) -> SupervisorOutcome {
        info!("Received signal {}, exiting...", signal);
        if self.session.terminate_engine().is_none() {
            debug!("No capture engine to terminate");
        }
        SupervisorOutcome::Shutdown(signal)
    }

    /// Launches the engine and monitors it until `shutdown` resolves or the
    /// engine exits.
    ///
    /// A shutdown already pending when this is called wins: the engine is
    /// never started. A launch failure is returned as an error; nothing is
    /// retried.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<SupervisorOutcome, SupervisorError>
    where
        F: Future<Output = ShutdownSignal>,
    {
        info!("Capture service starting");
        info!("Interface: {}", self.session.interface());
        info!("Saving PCAP to: {}", self.session.output_path().display());

        tokio::pin!(shutdown);
        let pending_signal = tokio::select! {
            biased;
            signal = &mut shutdown => Some(signal),
            _ = std::future::ready(()) => None,
        };
        if let Some(signal) = pending_signal {
            return Ok(self.shutdown(signal));
        }

        let diagnostics = self.session.launch(&self.engine)?;
        info!("Capture engine started successfully");

        let stop = tokio::select! {
            biased;
            signal = &mut shutdown => Stop::Signal(signal),
            status = monitor_diagnostics(&mut self.session, diagnostics) => Stop::Exited(status),
        };

        match stop {
            Stop::Signal(signal) => Ok(self.shutdown(signal)),
            Stop::Exited(status) => {
                let status = status?;
                warn!("Capture engine exited ({}), capture will restart", status);
                Ok(SupervisorOutcome::EngineExited(status))
            }
        }
    }
}

/// Logs every diagnostic line of the engine until it exits.
///
/// Reads block until a line arrives, so the loop is paced by the engine's
/// output. Once the stream closes the engine is awaited directly.
async fn monitor_diagnostics<R>(
    session: &mut CaptureSession,
    diagnostics: R,
) -> Result<ExitStatus, SupervisorError>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(diagnostics);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                debug!("Capture engine diagnostic stream closed");
                return session.wait_exit().await;
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim();
                if !line.is_empty() {
                    error!("Capture engine error: {}", line);
                }
            }
            Err(e) => {
                warn!("Failed to read capture engine diagnostics: {}", e);
                return session.wait_exit().await;
            }
        }

        if let Some(status) = session.poll_exit()? {
            return Ok(status);
        }
    }
}

/// Resolves on the first SIGINT or SIGTERM.
///
/// Handlers are installed when this is called, so call it before launching
/// the engine to avoid losing an early signal.
pub fn shutdown_signal() -> Result<impl Future<Output = ShutdownSignal>, SupervisorError> {
    let mut interrupt =
        signal(SignalKind::interrupt()).map_err(SupervisorError::SignalRegistration)?;
    let mut terminate =
        signal(SignalKind::terminate()).map_err(SupervisorError::SignalRegistration)?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => ShutdownSignal::Interrupt,
            _ = terminate.recv() => ShutdownSignal::Terminate,
        }
    })
}
