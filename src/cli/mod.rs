//! Command-line front end.
//!
//! Drives the annotation core from files and scripts without a player or UI.

pub mod args;
pub mod data;
pub mod inspect;
pub mod replay;

pub use args::Cli;
pub use args::Commands;

use crate::app::config::{self, Config};
use anyhow::Result;
use std::path::Path;

/// Load the config from `--config` if given, else from the default location.
pub fn load_config_cascade(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            config::load_from(path)
        }
        None => config::load_config(),
    }
}

pub fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::ParseData(args) => data::run(args, &config),
        Commands::Active(args) => inspect::run_active(args),
        Commands::Modes(args) => inspect::run_modes(args),
        Commands::Replay(args) => replay::run(args, config),
    }
}
