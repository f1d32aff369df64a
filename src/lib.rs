// src/lib.rs - Library interface for the bench-test analyses

pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod experiments;
pub mod plot_framework;
pub mod plot_functions;
pub mod report;
pub mod types;

/// Package version shown in the CLI header and `--version`.
pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
