use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use medterm_analyzer::{Analyzer, GeminiAnalyzer};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod profile;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Medical term analysis and Arabic clinical translation
#[derive(Parser)]
#[command(name = "medterm", version)]
struct Args {
    /// JSON profile to load instead of defaults
    #[arg(long, env = "MEDTERM_CONFIG")]
    config: Option<PathBuf>,

    /// Model identifier, overrides config and GEMINI_MODEL
    #[arg(long)]
    model: Option<String>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Log as JSON lines on stderr
    #[arg(long)]
    log_json: bool,

    /// Write a default profile to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env before argument parsing so `env = ...` args see it
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    if let Some(path) = &args.write_config {
        return profile::write_default_profile(path);
    }

    let mut config = profile::load_config(args.config.as_deref())?;
    if let Some(model) = args.model {
        config.analyzer.model = model;
    }
    if args.no_color {
        config.ui.color = false;
    }

    if config.analyzer.api_key.is_empty() {
        tracing::warn!("API_KEY is not set, analysis requests will fail");
    }

    let analyzer = GeminiAnalyzer::new(&config.analyzer)?;
    let metadata = analyzer.metadata();
    tracing::info!("Using {} model {}", metadata.name, metadata.model);

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(Arc::new(analyzer));

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("task finished"),
                Ok(Err(e)) => tracing::error!("task exited: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::warn!("task exited during shutdown: {e}");
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
