//! Light Paint - headless harness for the light painting operators
//!
//! Loads a scene and an operator request from JSON, runs the operator and
//! prints the resulting scene.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config::log_filter()))
        .with_writer(std::io::stderr)
        .init();

    cli::run()
}
