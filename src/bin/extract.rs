use std::process::ExitCode;

use log::error;
use netcap::configuration::config::ExtractArgs;
use netcap::error_handling::types::ExtractError;
use netcap::field_extraction::{Dissector, FieldExtractor, OutputTargets};

#[tokio::main]
async fn main() -> ExitCode {
    netcap::logging::init();

    let args = ExtractArgs::from_args();
    let extractor = FieldExtractor::new(Dissector::new(args.dissector));
    let targets = OutputTargets {
        json: args.json,
        csv: args.csv,
    };

    match extractor.extract(&args.pcap, &targets).await {
        Ok(_) => ExitCode::SUCCESS,
        // already logged by the extractor
        Err(ExtractError::DissectorFailed { .. } | ExtractError::DissectorSpawn(_)) => {
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Extraction failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
