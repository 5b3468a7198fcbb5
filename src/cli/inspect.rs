//! `active` and `modes` commands.

use crate::cli::args::{ActiveArgs, RecordArgs};
use crate::domain::VideoRecord;
use crate::mode;
use crate::segments::{format_timestamp, SegmentIndex, SpeakerTier};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a camelCase record JSON from disk.
pub fn load_record(path: &Path) -> Result<VideoRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse record: {}", path.display()))
}

pub fn run_active(args: ActiveArgs) -> Result<()> {
    let record = load_record(&args.record)?;
    println!("{}", describe_active(&record, args.time));
    Ok(())
}

pub fn run_modes(args: RecordArgs) -> Result<()> {
    let record = load_record(&args.record)?;
    for mode in mode::available_modes(&record) {
        println!("{}", mode);
    }
    Ok(())
}

pub fn describe_active(record: &VideoRecord, time: f64) -> String {
    let index = SegmentIndex::new(record.segments());
    match index.active_index(time) {
        Some(i) => {
            let segment = &record.segments()[i];
            format!(
                "#{} [{}] {} ({}): {}",
                i,
                format_timestamp(segment.start_time),
                segment.speaker,
                SpeakerTier::of(&segment.speaker).as_str(),
                segment.text
            )
        }
        None => "no active segment".to_string(),
    }
}
