use std::fmt;
use std::process::{ExitCode, ExitStatus};

/// Shutdown requests delivered to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT, usually Ctrl-C.
    Interrupt,
    /// SIGTERM, usually a container stop.
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// How a supervised capture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorOutcome {
    /// A shutdown signal was received and the engine was asked to stop.
    Shutdown(ShutdownSignal),
    /// The engine exited by itself.
    EngineExited(ExitStatus),
}

impl SupervisorOutcome {
    /// Process exit code for the supervisor binary.
    ///
    /// Signal-driven shutdown always succeeds; an engine exiting on its own
    /// is a failure.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_clean() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, SupervisorOutcome::Shutdown(_))
    }
}
