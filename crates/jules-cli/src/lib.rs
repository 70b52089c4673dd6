// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use jules_logging::CliLoggingArgs;
use jules_rest_client::{ClientConfig, RestClient, RestClientError};
use serde_json::json;

pub mod activities;
pub mod render;
pub mod sessions;
pub mod sources;

pub use clap::Parser;
pub use render::OutputFormat;

#[derive(clap::Parser, Debug)]
#[command(
    name = "jules",
    about = "Command line client for the Jules coding-session API",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub logging: CliLoggingArgs,

    /// API key
    #[arg(long, env = "JULES_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "JULES_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        value_name = "SECONDS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connected repositories
    Sources {
        #[command(subcommand)]
        subcommand: sources::SourcesCommands,
    },
    /// Coding sessions
    Sessions {
        #[command(subcommand)]
        subcommand: sessions::SessionsCommands,
    },
    /// Session activities
    Activities {
        #[command(subcommand)]
        subcommand: activities::ActivitiesCommands,
    },
}

impl Cli {
    /// Client configuration from flags; clap already folded in the
    /// environment variables.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(Duration::from_secs(timeout));
        }
        config
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let client = RestClient::new(cli.client_config())?;
    tracing::debug!(base_url = %client.base_url(), "Jules client ready");

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Sources { subcommand } => subcommand.run(&client, cli.format, &mut out),
        Commands::Sessions { subcommand } => subcommand.run(&client, cli.format, &mut out),
        Commands::Activities { subcommand } => subcommand.run(&client, cli.format, &mut out),
    }
}

/// Report a failed command: `{"error": ...}` on stdout for JSON output,
/// `Error: ...` on stderr otherwise.
pub fn report_error(
    err: &anyhow::Error,
    format: OutputFormat,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return writeln!(out, "{}", json!({ "error": err.to_string() }));
    }

    writeln!(err_out, "Error: {err}")?;
    if let Some(RestClientError::Configuration(_)) = err.downcast_ref::<RestClientError>() {
        writeln!(err_out)?;
        writeln!(err_out, "To fix this:")?;
        writeln!(err_out, "  export JULES_API_KEY='your_api_key_here'")?;
        writeln!(err_out)?;
        writeln!(err_out, "Get your API key at: https://developers.google.com/jules/api")?;
    }
    Ok(())
}
