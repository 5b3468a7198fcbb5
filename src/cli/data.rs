//! `parse-data` command.

use crate::app::Config;
use crate::cli::args::{OutputFormat, ParseDataArgs};
use crate::data::{self, DataSeries};
use crate::domain::traits::DataSource;
use crate::infrastructure::HttpDataSource;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::time::Duration;

pub fn run(args: ParseDataArgs, config: &Config) -> Result<()> {
    let source = HttpDataSource::new(Duration::from_secs(config.fetch_timeout_secs));
    let raw = source.fetch_text(&args.source)?;

    let offset = args.offset.unwrap_or(config.calibration_offset_secs);
    let series = DataSeries::parse(&raw, offset);
    eprintln!(
        "Parsed {} samples from {} (offset {}s)",
        series.len(),
        data::source_label(&args.source),
        offset
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_series(&series, args.format, &mut handle)
}

pub fn write_series(series: &DataSeries, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for point in series.points() {
                writeln!(out, "{}\t{}", point.time, point.data)?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(series.points())
                .context("Failed to serialize JSON")?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}
