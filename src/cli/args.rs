//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Video Annotator - time-synchronized transcript, label and sensor-data tooling
#[derive(Parser)]
#[command(name = "video-annotator")]
#[command(about = "Inspect and replay time-synchronized video annotations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file path (default: ~/.config/video-annotator/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a data-series file or URL and print the samples
    ParseData(ParseDataArgs),
    /// Print the segment active at a given time
    Active(ActiveArgs),
    /// List the edit modes available for a record
    Modes(RecordArgs),
    /// Feed a script of player and user events through a session
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct ParseDataArgs {
    /// File path or http(s) URL of the delimited text
    pub source: String,

    /// Seconds subtracted from every sample time (default: config value)
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct RecordArgs {
    /// Video record as JSON (camelCase fields)
    pub record: PathBuf,
}

#[derive(Args)]
pub struct ActiveArgs {
    /// Video record as JSON (camelCase fields)
    pub record: PathBuf,

    /// Playback time in seconds
    #[arg(short, long)]
    pub time: f64,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Video record as JSON (camelCase fields)
    pub record: PathBuf,

    /// Event script, one command per line
    pub script: PathBuf,

    /// Data-series source loaded before the script runs
    #[arg(short, long)]
    pub data: Option<String>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// One `time<TAB>data` line per sample
    #[default]
    Text,
    /// JSON array of samples
    Json,
}
