use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use speakbox_types::{AppEvent, Region};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod context;
mod controller;
mod events;
mod io;
mod profile;
mod session;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::profile::ProfileStore;
use self::state::AppState;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

/// Draw a box over the screen, read its text aloud
#[derive(Debug, Parser)]
#[command(name = "speakbox", version, about)]
struct Args {
    /// Profile to load from the user config directory
    #[arg(long, default_value = "main")]
    profile: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Create the selection box at startup, as x,y,w,h
    #[arg(long, value_parser = parse_region)]
    region: Option<Region>,

    /// Skip global hotkey registration
    #[arg(long)]
    no_hotkeys: bool,
}

fn parse_region(value: &str) -> Result<Region, String> {
    value.parse()
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_format);

    let store = ProfileStore::user()?;
    store.init()?;
    let mut config = store
        .load(&args.profile)
        .with_context(|| format!("Failed to load profile {}", args.profile))?;
    config.apply_env();
    if args.region.is_some() {
        config.ocr.capture_region = args.region;
    }
    if args.no_hotkeys {
        config.hotkeys.enabled = false;
    }
    config.validate().context("Invalid configuration")?;
    tracing::info!("Loaded profile {} from {}", args.profile, store.root().display());

    let startup_region = config.ocr.capture_region;
    let hotkeys = config.hotkeys.enabled;

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(hotkeys).await;

    if let Some(region) = startup_region {
        controller.event_sender().send(AppEvent::CreateBox(region)).await?;
    }

    tokio::select! {
        result = signal::ctrl_c() => {
            result.context("Failed to listen for ctrl+c")?;
            tracing::info!("Shutdown requested");
            controller.event_sender().send(AppEvent::Close).await.ok();
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:?}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    let drain = async { while tasks.join_next().await.is_some() {} };
    if tokio::time::timeout(std::time::Duration::from_secs(2), drain).await.is_err() {
        tracing::warn!("Tasks did not stop in time");
        tasks.abort_all();
    }

    Ok(())
}
