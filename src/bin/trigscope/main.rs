//! trigscope - Terminal scope for trigger-driven utility nodes
//!
//! Run with: cargo run --bin trigscope
//! Logs go to `trigscope.log` in the system temp directory (`RUST_LOG` applies).

mod app;
mod patch;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use app::Trigscope;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    Trigscope::new().bpm(120.0).coefficient(0.95).run()
}

fn init_logging() -> EyreResult<()> {
    let path = std::env::temp_dir().join("trigscope.log");
    let file = File::create(&path).wrap_err_with(|| format!("failed to create {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(log = %path.display(), "trigscope starting");
    Ok(())
}
