//! nexttrip CLI
//!
//! Prints how many minutes remain until the next departure of a route from a
//! stop in a given direction.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use clap::Parser;
use integration_transit::{ProviderRegistry, TransitConfig, TransitError, TransitProvider};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Gets the next time transit will be at the specified stop
#[derive(Parser, Debug)]
#[command(name = "nexttrip")]
#[command(author, version, about = "Gets the next time transit will be at the specified stop", long_about = None)]
struct Cli {
    /// Route name, matched case-insensitively (e.g. "blue line")
    route: String,

    /// Stop description, matched case-insensitively (e.g. "platform 2")
    stop: String,

    /// Direction name, matched case-insensitively (e.g. "south")
    direction: String,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Transit provider to query (overrides configuration)
    #[arg(short, long)]
    provider: Option<String>,

    /// Use the provider's sandbox environment
    #[arg(long)]
    sandbox: bool,

    /// Provider API base URL (overrides configuration)
    #[arg(long)]
    base_url: Option<String>,

    /// Configuration file (default: ./nexttrip.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Load configuration and apply command-line overrides
fn resolve_config(cli: &Cli) -> Result<TransitConfig, TransitError> {
    let mut config = match &cli.config {
        Some(path) => TransitConfig::load_from(path)?,
        None => TransitConfig::load()?,
    };
    apply_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut TransitConfig, cli: &Cli) {
    if let Some(provider) = &cli.provider {
        config.provider.clone_from(provider);
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if cli.sandbox {
        config.use_sandbox = true;
    }
}

/// Whole minutes from `now` until `departs_at`, truncated toward zero
fn minutes_until(departs_at: i64, now: DateTime<Utc>) -> anyhow::Result<i64> {
    let departure = DateTime::from_timestamp(departs_at, 0)
        .ok_or_else(|| anyhow!("departure time {departs_at} is out of range"))?;
    Ok((departure - now).num_minutes())
}

fn format_minutes(minutes: i64) -> String {
    format!("{minutes} Minutes")
}

/// Run the lookup and return the line to print
async fn next_trip_line(
    provider: &dyn TransitProvider,
    cli: &Cli,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    let departs_at = provider
        .get_next_trip(&cli.route, &cli.stop, &cli.direction)
        .await?;
    debug!(departs_at, "Departure time");
    Ok(format_minutes(minutes_until(departs_at, now)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(cli.verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = resolve_config(&cli)?;
    let registry = ProviderRegistry::with_defaults();
    let provider = registry
        .create(&config.provider, &config)
        .map_err(|e| match e {
            TransitError::UnknownProvider(_) => {
                anyhow!("{e} (available: {})", registry.names().join(", "))
            }
            other => other.into(),
        })?;

    let line = next_trip_line(provider.as_ref(), &cli, Utc::now()).await?;
    println!("{line}");

    Ok(())
}
