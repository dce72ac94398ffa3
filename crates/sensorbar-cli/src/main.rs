//! Sensorbar
//!
//! Polls hardware sensors (temperature, fan speed, power draw) and prints one
//! JSON status line per update for a status bar or any other consumer.

mod config;
mod sink;

use anyhow::{Context, Result};
use clap::Parser;
use sensorbar_core::{DisplaySink, Output, PollerHandle, SensorModule};
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use sink::StdoutSink;

#[derive(Parser)]
#[command(name = "sensorbar")]
#[command(about = "Hardware sensor monitor for status bars")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    config: PathBuf,

    /// Run a single cycle per sensor and exit
    #[arg(long)]
    once: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for sensor output
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    // Load configuration
    let config = Config::load(&cli.config).context("Failed to load configuration")?;
    info!("Loaded configuration from: {}", cli.config.display());

    // Resolve every sensor before polling any of them
    let mut modules = Vec::with_capacity(config.sensors.len());
    for entry in &config.sensors {
        let module = SensorModule::new(entry.sensor.clone(), entry.tooltip(config.tooltip))
            .with_context(|| format!("Failed to initialize sensor '{}'", entry.name))?;
        info!(
            "Sensor '{}' reads {} from {}",
            entry.name,
            module.config().sensor_type,
            module.source_description()
        );
        modules.push((entry, module));
    }

    if cli.once {
        for (entry, module) in modules {
            let output = module.poll_once().unwrap_or_else(|e| {
                Output::unavailable(&e.to_string(), entry.tooltip(config.tooltip))
            });
            StdoutSink::new(&entry.name).update(output);
        }
        return Ok(());
    }

    let handles: Vec<PollerHandle> = modules
        .into_iter()
        .map(|(entry, module)| {
            module.spawn(entry.interval(config.interval), StdoutSink::new(&entry.name))
        })
        .collect();
    info!("Polling {} sensor(s)", handles.len());

    // Setup Unix signal handlers
    let mut sigterm = signal(SignalKind::terminate()).context("Failed to register SIGTERM")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to register SIGINT")?;

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
    }

    for handle in handles {
        handle.shutdown().await;
    }

    Ok(())
}
