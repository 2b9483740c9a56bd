//! `gcal-tool`: run the calendar tool and its credential check from a shell.

use anyhow::{Context, Result};
use calendar_tool::config::Config;
use calendar_tool::{provider_descriptor, tool_descriptor, GoogleCalendarProvider};
use clap::{Parser, Subcommand};
use plugin_types::{Tool, ToolParameters, ToolProvider};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gcal-tool")]
#[command(about = "Run the Google Calendar agent tool outside the host platform")]
struct Cli {
    /// TOML config file
    #[arg(short, long, env = "GCAL_TOOL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Service account key file. Overrides `credentials_path` from the config.
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT_FILE", value_name = "FILE")]
    credentials: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke the tool once and print its messages
    Invoke {
        /// One of create, fetch, delete (case-insensitive)
        #[arg(short, long)]
        action: String,

        /// Free text; used as the description of a created event
        #[arg(short, long, default_value = "")]
        query: String,

        /// Print each message as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Check the service account credentials with a live fetch
    Validate,
    /// Print the provider and tool descriptors as JSON
    Describe,
    /// Print an example config file
    ExampleConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        config,
        credentials,
        command,
    } = Cli::parse();

    match command {
        Commands::Describe => {
            let descriptors = json!({
                "provider": provider_descriptor(),
                "tools": [tool_descriptor()],
            });
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }
        Commands::ExampleConfig => {
            print!("{}", toml::to_string_pretty(&Config::example())?);
        }
        Commands::Invoke {
            action,
            query,
            json,
        } => {
            install_crypto_provider();
            let config = resolve_config(config, credentials)?;
            let provider = GoogleCalendarProvider::new(config.connector());
            let tool = provider.tool(config.read_credentials()?);

            let parameters = ToolParameters::new()
                .with("action", action)
                .with("query", query);
            let messages = tool.invoke(parameters).await?;

            for message in messages {
                if json {
                    println!("{}", serde_json::to_string(&message)?);
                } else {
                    println!("{}", message);
                }
            }
        }
        Commands::Validate => {
            install_crypto_provider();
            let config = resolve_config(config, credentials)?;
            let provider = GoogleCalendarProvider::new(config.connector());

            provider
                .validate_credentials(&config.read_credentials()?)
                .await
                .context("Credential validation failed")?;

            println!("Credentials are valid.");
        }
    }

    Ok(())
}

fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }
}

fn resolve_config(config_path: Option<PathBuf>, credentials_path: Option<PathBuf>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::load(&path)?,
        None => {
            let path = credentials_path.clone().context(
                "No credentials configured: pass --config or --credentials \
                 (or set GOOGLE_SERVICE_ACCOUNT_FILE)",
            )?;
            Config::from_credentials_path(path)
        }
    };

    if let Some(path) = credentials_path {
        config.credentials_path = path;
    }

    tracing::debug!("Using service account key {}", config.credentials_path.display());
    Ok(config)
}
