pub mod config;
pub mod runner;

pub use config::CliConfig;
pub use runner::{run_command, CliCommand, PreferenceOptions, PreferenceOverrides};
