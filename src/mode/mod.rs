//! Edit-mode state machine.
//!
//! Which modes are reachable depends only on the record; transitions happen
//! only on explicit selection.

use crate::domain::{EditMode, VideoRecord};
use crate::segments;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("edit mode \"{0}\" is not available for this video")]
    Unavailable(EditMode),
}

/// What a pause event should do in the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    None,
    AddLabelRow,
}

/// Reachable modes for `record`, in selector order.
pub fn available_modes(record: &VideoRecord) -> Vec<EditMode> {
    EditMode::ALL
        .into_iter()
        .filter(|mode| is_available(*mode, record))
        .collect()
}

pub fn is_available(mode: EditMode, record: &VideoRecord) -> bool {
    match mode {
        EditMode::Labeling | EditMode::AIAssistant => true,
        EditMode::TextRecognition => segments::is_enabled(record.segments.as_deref()),
        EditMode::WordCloud => record.has_word_counts(),
    }
}

/// Validate a user selection.
pub fn select(mode: EditMode, record: &VideoRecord) -> Result<EditMode, ModeError> {
    if is_available(mode, record) {
        Ok(mode)
    } else {
        Err(ModeError::Unavailable(mode))
    }
}

pub fn pause_action(mode: EditMode, tag_on_pause: bool) -> PauseAction {
    if mode == EditMode::Labeling && tag_on_pause {
        PauseAction::AddLabelRow
    } else {
        PauseAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Segment;
    use std::collections::BTreeMap;

    #[test]
    fn test_bare_record_modes() {
        let record = VideoRecord::new("admin", "v");
        assert_eq!(
            available_modes(&record),
            vec![EditMode::Labeling, EditMode::AIAssistant]
        );
    }

    #[test]
    fn test_all_modes_with_segments_and_words() {
        let mut record = VideoRecord::new("admin", "v");
        record.segments = Some(vec![Segment::new(0.0, 1.0, "Teacher", "hi")]);
        record.word_count_map = Some(BTreeMap::from([("hi".to_string(), 1)]));
        assert_eq!(available_modes(&record), EditMode::ALL.to_vec());
    }

    #[test]
    fn test_empty_collections_disable_modes() {
        let mut record = VideoRecord::new("admin", "v");
        record.segments = Some(Vec::new());
        record.word_count_map = Some(BTreeMap::new());
        assert!(!is_available(EditMode::TextRecognition, &record));
        assert!(!is_available(EditMode::WordCloud, &record));
    }

    #[test]
    fn test_select_rejects_unavailable() {
        let record = VideoRecord::new("admin", "v");
        assert_eq!(
            select(EditMode::WordCloud, &record),
            Err(ModeError::Unavailable(EditMode::WordCloud))
        );
        assert_eq!(select(EditMode::AIAssistant, &record), Ok(EditMode::AIAssistant));
    }

    #[test]
    fn test_pause_policy() {
        assert_eq!(pause_action(EditMode::Labeling, true), PauseAction::AddLabelRow);
        assert_eq!(pause_action(EditMode::Labeling, false), PauseAction::None);
        for mode in [EditMode::TextRecognition, EditMode::WordCloud, EditMode::AIAssistant] {
            assert_eq!(pause_action(mode, true), PauseAction::None);
        }
    }
}
