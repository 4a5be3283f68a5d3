//! Cassandra Explain CLI
//!
//! Resolves a typed facade call and prints the operation it delegates to.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cassandra_explain::{Cli, Config, LogFormat, explain_for, render};
use cassandra_operations::RecordingOperations;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(entity) = cli.entity {
        config.entity = entity;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(log_format) = cli.log_format {
        config.log_format = log_format;
    }

    // Initialize tracing
    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    info!(
        version = cassandra_explain::VERSION,
        entity = ?config.entity,
        "Resolving typed call"
    );

    let ops = RecordingOperations::new();
    let invocation = explain_for(config.entity, &ops, cli.command).await?;

    info!(operation = %invocation.operation, "Delegated");

    println!(
        "{}",
        render(&invocation, config.output).context("Failed to render invocation")?
    );

    Ok(())
}
