use std::process::ExitCode;

use log::{error, info};
use netcap::capture_supervisor::{shutdown_signal, CaptureSupervisor};
use netcap::configuration::config::CaptureConfig;

#[tokio::main]
async fn main() -> ExitCode {
    netcap::logging::init();

    let config = CaptureConfig::from_args();

    // Handlers go in before anything is spawned so an early SIGTERM is not lost
    let shutdown = match shutdown_signal() {
        Ok(shutdown) => shutdown,
        Err(e) => {
            error!("Failed to start capture: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut supervisor = match CaptureSupervisor::from_config(&config, &chrono::Local::now()) {
        Ok(supervisor) => supervisor,
        Err(e) => {
            error!("Failed to start capture: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match supervisor.run(shutdown).await {
        Ok(outcome) => {
            info!("Capture service stopped: {:?}", outcome);
            outcome.exit_code()
        }
        Err(e) => {
            error!("Failed to start capture: {}", e);
            ExitCode::FAILURE
        }
    }
}
