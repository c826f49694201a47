//! CLI command implementations
//!
//! `serve` follows a fixed boot sequence: load config, start logging, open
//! the pool, warm the schema cache, then serve until Ctrl-C.

use std::path::Path;

use crate::config::AppConfig;
use crate::db::Gateway;
use crate::http_server::{AppState, HttpServer};
use crate::observability::{init_logging, log_event, log_event_with_fields, Event};
use crate::resource::{catalog, Fields};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(config.as_deref()),
    }
}

/// Load configuration and apply a command-line port override
pub fn load_config(path: Option<&Path>, port: Option<u16>) -> CliResult<AppConfig> {
    let mut config = AppConfig::load(path)?;
    if let Some(port) = port {
        config.server.port = port;
        config.validate()?;
    }
    Ok(config)
}

/// Tables whose column sets come from the catalog
fn dynamic_tables() -> Vec<&'static str> {
    catalog::all()
        .iter()
        .filter(|def| def.fields == Fields::Dynamic)
        .map(|def| def.table)
        .collect()
}

/// Boot and serve the HTTP API
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let config = load_config(config_path, port)?;
    init_logging(&config.log);
    log_event(Event::BootStart);
    let addr = config.server.socket_addr();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("addr", addr.as_str()), ("fiscal_year", config.fiscal_year.as_str())],
    );

    // Start the async runtime and run the server
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pool = match config.database.connect().await {
            Ok(pool) => pool,
            Err(e) => {
                let message = e.to_string();
                log_event_with_fields(Event::BootFailed, &[("error", message.as_str())]);
                return Err(CliError::Database(e));
            }
        };
        log_event(Event::PoolReady);

        let state = AppState::new(Gateway::new(pool), &config);
        state.schema.warm(&dynamic_tables()).await;
        log_event(Event::SchemaWarmed);

        HttpServer::new(config.server.clone(), state).start().await?;
        Ok::<(), CliError>(())
    })
}

/// Validate configuration and print the effective settings as JSON
pub fn check_config(config_path: Option<&Path>) -> CliResult<()> {
    let mut config = load_config(config_path, None)?;
    if !config.database.url.is_empty() {
        config.database.url = redact_url(&config.database.url);
    }
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Hide the password in a connection URL
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("postgres://it:secret@db:5432/itportal"),
            "postgres://it:***@db:5432/itportal"
        );
        assert_eq!(redact_url("postgres://db/itportal"), "postgres://db/itportal");
        assert_eq!(redact_url("not a url"), "not a url");
    }

    #[test]
    fn test_dynamic_tables() {
        assert_eq!(dynamic_tables(), vec!["asset_details"]);
    }
}
