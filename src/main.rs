mod app;
mod clock;
mod config;
mod input;
mod model;
mod modes;
mod render;
mod rng;
mod session;
mod shop;
mod sim;

use anyhow::{Context, Result};
use clap::Parser;
use std::{fs::OpenOptions, path::Path, path::PathBuf, sync::Mutex};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Keep the bug count down for 30 days and get out rich")]
pub(crate) struct Args {
    /// ms per simulation tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// frame cap
    #[arg(long)]
    fps: Option<u32>,

    /// fixed seed for the bug picker
    #[arg(long)]
    seed: Option<u64>,

    /// JSON shop catalog: [{"text": "...", "cost": 5}, ...]
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// where to write logs (defaults to the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// plain white text
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = config::project_paths()?;
    init_tracing(args.log_file.as_deref().unwrap_or(&paths.log_path))?;

    let result = app::run(&args, &paths);
    if let Err(err) = &result {
        error!(error = %err, "exited with error");
    }
    result
}

// The terminal is in raw mode while we play, so logs go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}
