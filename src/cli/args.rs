//! CLI argument definitions using clap
//!
//! Commands:
//! - itportal serve [--config <path>] [--port <port>]
//! - itportal check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// itportal - IT asset management API over PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "itportal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to configuration file (defaults plus environment when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding config and ITPORTAL_PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate configuration, print it, and exit
    CheckConfig {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["itportal", "serve", "--config", "it.json", "--port", "8080"])
            .unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, Some(PathBuf::from("it.json")));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_config_without_path() {
        let cli = Cli::try_parse_from(["itportal", "check-config"]).unwrap();
        assert!(matches!(cli.command, Command::CheckConfig { config: None }));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["itportal", "init"]).is_err());
    }
}
