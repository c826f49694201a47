//! CLI module for itportal
//!
//! Provides command-line interface for:
//! - serve: Boot the API server
//! - check-config: Validate and print the effective configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, load_config, run, run_command, serve};
pub use errors::{CliError, CliResult};
