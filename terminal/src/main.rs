use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use terminal::app;
use terminal::config::{Args, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();

    match start(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("snakery: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn start(args: Args) -> Result<()> {
    let settings = Settings::from_args(args)?;
    init_tracing(&settings.log_file)?;
    info!(?settings, "starting snakery");
    app::run(settings).await
}

// stdout belongs to the game, so logs go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
