//! Process-wide logger setup shared by both binaries.
//!
//! https://docs.rs/env_logger/latest/env_logger/

use env_logger::Env;

/// Installs the `env_logger` backend for the `log` facade.
///
/// Defaults to `info`; `RUST_LOG` overrides the filter. Must be called once,
/// before the first log line is emitted.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .init();
}
