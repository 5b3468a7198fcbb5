//! Auxiliary data series: parsing and playback cursor lookup.

mod parser;

pub use parser::{parse, parse_with_offset, to_number, CALIBRATION_OFFSET_SECS};

use crate::domain::DataPoint;

/// A parsed, calibrated data series.
///
/// Replaced wholesale on every load, never edited in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSeries {
    points: Vec<DataPoint>,
}

impl DataSeries {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    pub fn parse(raw: &str, offset_secs: f64) -> Self {
        Self::new(parse_with_offset(raw, offset_secs))
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point_at(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    /// Index of the sample nearest to `time`.
    ///
    /// Samples with a NaN time are skipped; on equal distance the earlier
    /// sample wins.
    pub fn cursor(&self, time: f64) -> Option<usize> {
        if !time.is_finite() {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (i, point) in self.points.iter().enumerate() {
            if point.time.is_nan() {
                continue;
            }
            let distance = (point.time - time).abs();
            match best {
                Some((_, d)) if d <= distance => {}
                _ => best = Some((i, distance)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Display label for a data source URL: its last path component.
pub fn source_label(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
