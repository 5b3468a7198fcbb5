//! Delimited-text parser for the auxiliary data series.
//!
//! Input is a table with a header row naming at least `time` and `data`
//! columns. Rows whose `time` cell is empty are dropped; everything else is
//! kept, with unparseable numbers carried as `NaN`.

use crate::domain::DataPoint;

/// Seconds between the start of data capture and the start of the video.
pub const CALIBRATION_OFFSET_SECS: f64 = 5.0;

const DELIMITERS: [char; 4] = [',', '\t', '|', ';'];

/// Parse raw text into calibrated data points.
pub fn parse(raw: &str) -> Vec<DataPoint> {
    parse_with_offset(raw, CALIBRATION_OFFSET_SECS)
}

/// Same as [`parse`] with an explicit calibration offset.
///
/// Never fails: input without a usable header yields an empty series.
pub fn parse_with_offset(raw: &str, offset_secs: f64) -> Vec<DataPoint> {
    // Spreadsheet exports often start with a UTF-8 byte-order mark.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };

    let delimiter = detect_delimiter(header_line);
    let header = split_row(header_line, delimiter);
    let time_col = header.iter().position(|h| h.trim() == "time");
    let data_col = header.iter().position(|h| h.trim() == "data");
    let (Some(time_col), Some(data_col)) = (time_col, data_col) else {
        tracing::debug!(header = header_line, "data series header lacks time/data columns");
        return Vec::new();
    };

    let mut points = Vec::new();
    for line in lines {
        let cells = split_row(line, delimiter);
        let time = cells.get(time_col).map(String::as_str).unwrap_or("");
        if time.is_empty() {
            continue;
        }
        let data = cells.get(data_col).map(String::as_str).unwrap_or("");
        points.push(DataPoint {
            time: to_number(time) - offset_secs,
            data: to_number(data),
        });
    }
    points
}

/// Numeric conversion with the lenient rules the chart expects:
/// surrounding whitespace ignored, blank means zero, garbage means NaN.
pub fn to_number(cell: &str) -> f64 {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn detect_delimiter(header: &str) -> char {
    DELIMITERS
        .iter()
        .copied()
        .find(|d| header.contains(*d))
        .unwrap_or(',')
}

/// Split one row, honoring double-quoted cells with `""` escapes.
fn split_row(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            cells.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    cells.push(current);
    cells
}
