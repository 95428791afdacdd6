//! Capture supervisor subsystem.
//!
//! Runs one external capture engine (`tshark` by default) writing packets to
//! a timestamped file, logs the engine's diagnostic stream, and stops it
//! cleanly on SIGINT / SIGTERM.
//!
//! Re-exports:
//! - [`CaptureSupervisor`]: launches and monitors the engine.
//! - [`CaptureSession`], [`CaptureEngine`]: the run and its launch recipe.
//! - [`ShutdownSignal`], [`SupervisorOutcome`]: how a run ends.
//!
//! Example (non-running):
//! ```ignore
//! use netcap::capture_supervisor::{shutdown_signal, CaptureSupervisor};
//!
//! let shutdown = shutdown_signal()?;
//! let mut supervisor = CaptureSupervisor::from_config(&config, &chrono::Local::now())?;
//! let outcome = supervisor.run(shutdown).await?;
//! ```

pub mod engine;
pub mod session;
pub mod supervisor;
pub mod types;

pub use engine::CaptureEngine;
pub use session::{capture_file_path, CaptureSession};
pub use supervisor::{shutdown_signal, CaptureSupervisor};
pub use types::{ShutdownSignal, SupervisorOutcome};
