//! Molette: a rotary-knob remote for a Music Assistant server

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod input;

use app::App;
use config::Config;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    App::new(config).run()
}
