//! `replay` command: drive a session from a text script.
//!
//! Script grammar, one command per line (`#` starts a comment):
//!
//! ```text
//! time 12.5
//! pause
//! seek 40
//! click-segment 2
//! click-point 0
//! mode Text Recognition
//! ```

use crate::app::{AppContext, Config};
use crate::cli::args::ReplayArgs;
use crate::cli::inspect::load_record;
use crate::domain::{EditMode, VideoRecord};
use crate::sync::{PlayerEvent, Session};
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Time(f64),
    Pause,
    Seek(f64),
    ClickSegment(usize),
    ClickPoint(usize),
    Mode(EditMode),
}

/// Parse one script line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "time" => ScriptCommand::Time(parse_seconds(rest)?),
        "pause" => ScriptCommand::Pause,
        "seek" => ScriptCommand::Seek(parse_seconds(rest)?),
        "click-segment" => ScriptCommand::ClickSegment(parse_index(rest)?),
        "click-point" => ScriptCommand::ClickPoint(parse_index(rest)?),
        "mode" => match EditMode::parse(rest) {
            Some(mode) => ScriptCommand::Mode(mode),
            None => bail!("unknown edit mode: {:?}", rest),
        },
        other => bail!("unknown command: {:?}", other),
    };
    Ok(Some(command))
}

fn parse_seconds(s: &str) -> Result<f64> {
    let value: f64 = s.parse().with_context(|| format!("invalid time: {:?}", s))?;
    if !value.is_finite() {
        bail!("invalid time: {:?}", s);
    }
    Ok(value)
}

fn parse_index(s: &str) -> Result<usize> {
    s.parse().with_context(|| format!("invalid index: {:?}", s))
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(line).with_context(|| format!("line {}", n + 1))? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Apply `commands` in order, writing the view after each as a JSON line.
pub fn run_script(session: &mut Session, commands: &[ScriptCommand], out: &mut dyn Write) -> Result<()> {
    for command in commands {
        match command {
            ScriptCommand::Time(t) => session.handle_player_event(PlayerEvent::TimeUpdate(*t)),
            ScriptCommand::Pause => session.handle_player_event(PlayerEvent::Pause),
            ScriptCommand::Seek(t) => session.seek(*t),
            ScriptCommand::ClickSegment(i) => {
                if session.click_segment(*i).is_none() {
                    tracing::warn!(index = i, "no such segment");
                }
            }
            ScriptCommand::ClickPoint(i) => {
                if session.click_data_point(*i).is_none() {
                    tracing::warn!(index = i, "no such data point");
                }
            }
            ScriptCommand::Mode(mode) => {
                if let Err(e) = session.set_mode(*mode) {
                    tracing::warn!(error = %e, "mode change refused");
                }
            }
        }
        let line = serde_json::to_string(&session.view()).context("Failed to serialize view")?;
        writeln!(out, "{}", line)?;
    }

    let labels = serde_json::to_string(&session.record().labels).context("Failed to serialize labels")?;
    writeln!(out, "{}", labels)?;
    Ok(())
}

/// Open a session and load its data series on the calling thread, so the
/// replay output does not depend on thread timing. `data` overrides the
/// record's own `dataUrl`.
pub fn open_session(ctx: &AppContext, record: VideoRecord, data: Option<String>) -> Result<Session> {
    let data_url = data.unwrap_or_else(|| record.data_url.clone());
    let mut session = ctx.deferred_session_for(record);
    if !data_url.is_empty() && !session.select_data_source_now(&data_url) {
        bail!("Failed to load data series from {}", data_url);
    }
    Ok(session)
}

pub fn run(args: ReplayArgs, config: Config) -> Result<()> {
    let record = load_record(&args.record)?;
    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script: {}", args.script.display()))?;
    let commands = parse_script(&script)?;

    let ctx = AppContext::new(config);
    let mut session = open_session(&ctx, record, args.data)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run_script(&mut session, &commands, &mut handle)
}
