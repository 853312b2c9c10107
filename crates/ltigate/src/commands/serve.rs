//! `ltigate serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use ltigate_config::{CliSettings, Config};
use ltigate_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover ltigate.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Default tool path (overrides config).
    #[arg(long)]
    tools_path: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            tools_path: self.tools_path,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Print startup info
        output.info(&format!(
            "Starting LTI gateway on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Default tool path: {}", config.lti.tools_path));
        if config.consumers.is_empty() {
            output.warning("No consumers configured; content-item returns will fail");
        } else {
            output.info(&format!(
                "Registered consumers: {}",
                config.consumers.len()
            ));
        }

        // Build server config and run
        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }
}
