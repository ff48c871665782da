//! # Lava
//!
//! Opens a window with the animated lava background, or renders it headless
//! to a PNG. Pass `--watch-shader` to hot-reload a WGSL file while the window
//! is open.

mod app;
mod cli;
mod headless;
mod watcher;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if cli.headless {
        let path = headless::run(&cli)?;
        tracing::info!("wrote {}", path.display());
        Ok(())
    } else {
        app::run(&cli)
    }
}
