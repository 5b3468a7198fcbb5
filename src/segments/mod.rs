//! Transcript segment lookup.
//!
//! All lookups are pure functions of the segment list and a time; nothing
//! remembers the previous answer, so seeks in either direction are safe.

mod speaker;

pub use speaker::{format_timestamp, SpeakerTier};

use crate::domain::Segment;

/// Whether the transcript view can be shown at all.
pub fn is_enabled(segments: Option<&[Segment]>) -> bool {
    matches!(segments, Some(s) if !s.is_empty())
}

/// The segment whose interval contains `time`, first in list order.
pub fn active_segment(segments: &[Segment], time: f64) -> Option<&Segment> {
    active_index(segments, time).map(|i| &segments[i])
}

/// Position of the active segment, first in list order.
pub fn active_index(segments: &[Segment], time: f64) -> Option<usize> {
    segments.iter().position(|s| s.contains(time))
}

/// Borrowed view over a transcript that picks its lookup strategy once.
///
/// When the segments are sorted by start time and do not overlap, lookups
/// binary-search on `start_time`; otherwise they fall back to the linear
/// first-match scan. Both strategies give the same answer.
#[derive(Debug, Clone, Copy)]
pub struct SegmentIndex<'a> {
    segments: &'a [Segment],
    ordered: bool,
}

impl<'a> SegmentIndex<'a> {
    pub fn new(segments: &'a [Segment]) -> Self {
        Self {
            segments,
            ordered: is_ordered(segments),
        }
    }

    pub fn segments(&self) -> &'a [Segment] {
        self.segments
    }

    /// Whether lookups use binary search.
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    pub fn active_index(&self, time: f64) -> Option<usize> {
        if !self.ordered {
            return active_index(self.segments, time);
        }
        // Last segment starting at or before `time`.
        let after = self.segments.partition_point(|s| s.start_time <= time);
        let candidate = after.checked_sub(1)?;
        self.segments[candidate].contains(time).then_some(candidate)
    }

    pub fn active(&self, time: f64) -> Option<&'a Segment> {
        self.active_index(time).map(|i| &self.segments[i])
    }
}

/// Sorted by start, every interval well-formed, no interval overlapping the
/// next one.
fn is_ordered(segments: &[Segment]) -> bool {
    segments.iter().all(|s| s.start_time < s.end_time)
        && segments
            .windows(2)
            .all(|w| w[0].end_time <= w[1].start_time)
}
