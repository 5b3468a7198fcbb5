//! Sync orchestration: routes player events and user actions through the
//! clock, the store and the derived lookups.

mod loader;
mod session;

pub use loader::{DataLoaded, DataLoader};
pub use session::{Collaborators, Session};

use crate::domain::traits::VideoHandle;
use crate::domain::EditMode;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Events emitted by the external player.
pub enum PlayerEvent {
    TimeUpdate(f64),
    Pause,
    PlayerReady(Arc<dyn VideoHandle>),
    ScreenReady(Arc<dyn VideoHandle>),
    VideoObjectReady(Arc<dyn VideoHandle>),
}

/// Snapshot of everything derived from the current time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncView {
    pub current_time: f64,
    pub edit_mode: EditMode,
    /// Index into the record's segments.
    pub active_segment: Option<usize>,
    /// Index into the loaded data series.
    pub data_cursor: Option<usize>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{LabelTrack, SaveOutcome};
    use crate::domain::{ApiResponse, MessageLevel, Segment, VideoRecord};
    use crate::test_support::mocks::{
        MockBackend, MockChat, MockDataSource, MockLabelTable, MockMessages, MockNavigator,
        MockVideoHandle,
    };
    use serde_json::json;

    struct Harness {
        backend: Arc<MockBackend>,
        data: Arc<MockDataSource>,
        messages: Arc<MockMessages>,
        navigator: Arc<MockNavigator>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                backend: Arc::new(MockBackend::accepting()),
                data: Arc::new(MockDataSource::new()),
                messages: Arc::new(MockMessages::new()),
                navigator: Arc::new(MockNavigator::new()),
            }
        }

        fn collaborators(&self, labels: Box<dyn crate::domain::traits::LabelTable>) -> Collaborators {
            Collaborators {
                backend: self.backend.clone(),
                data_source: self.data.clone(),
                labels,
                messages: self.messages.clone(),
                navigator: self.navigator.clone(),
            }
        }
    }

    fn lesson() -> VideoRecord {
        let mut record = VideoRecord::new("admin", "lesson-1");
        record.video_id = "vid-1".to_string();
        record.segments = Some(vec![
            Segment::new(0.0, 2.0, "Teacher", "Good morning"),
            Segment::new(2.0, 5.0, "Student 1", "Morning"),
            Segment::new(8.0, 10.0, "Teacher", "Sit down"),
        ]);
        record
    }

    #[test]
    fn test_time_update_drives_view() {
        let h = Harness::new();
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);

        session.handle_player_event(PlayerEvent::TimeUpdate(3.0));
        let view = session.view();
        assert_eq!(view.current_time, 3.0);
        assert_eq!(view.active_segment, Some(1));
        assert_eq!(view.data_cursor, None);

        session.handle_player_event(PlayerEvent::TimeUpdate(6.0));
        assert_eq!(session.view().active_segment, None);

        // Backward seek must not reuse a previous answer.
        session.handle_player_event(PlayerEvent::TimeUpdate(0.5));
        assert_eq!(session.view().active_segment, Some(0));
    }

    #[test]
    fn test_click_segment_seeks_player() {
        let h = Harness::new();
        let video = Arc::new(MockVideoHandle::new());
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);
        session.handle_player_event(PlayerEvent::VideoObjectReady(video.clone()));

        assert_eq!(session.click_segment(2), Some(8.0));
        assert_eq!(session.current_time(), 8.0);
        assert_eq!(session.view().active_segment, Some(2));
        assert_eq!(video.seeks(), vec![8.0]);

        assert_eq!(session.click_segment(9), None);
        assert_eq!(video.seeks().len(), 1);
    }

    #[test]
    fn test_click_segment_before_player_ready() {
        let h = Harness::new();
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);
        assert_eq!(session.click_segment(1), Some(2.0));
        assert_eq!(session.current_time(), 2.0);
    }

    #[test]
    fn test_pause_in_labeling_with_tag_on_pause_adds_one_row() {
        let h = Harness::new();
        let table = MockLabelTable::new();
        let calls = table.calls();
        let mut record = lesson();
        record.tag_on_pause = true;
        let mut session = Session::new(record, h.collaborators(Box::new(table)), 5.0);

        session.handle_player_event(PlayerEvent::TimeUpdate(4.25));
        session.handle_player_event(PlayerEvent::Pause);

        assert_eq!(calls.lock().len(), 1);
        assert_eq!(calls.lock()[0].1, 4.25);
        assert_eq!(session.record().labels.len(), 1);
        assert_eq!(session.record().labels[0].start_time, 4.25);
    }

    #[test]
    fn test_pause_without_tag_on_pause_adds_nothing() {
        let h = Harness::new();
        let table = MockLabelTable::new();
        let calls = table.calls();
        let mut session = Session::new(lesson(), h.collaborators(Box::new(table)), 5.0);

        session.handle_player_event(PlayerEvent::Pause);

        assert!(calls.lock().is_empty());
        assert!(session.record().labels.is_empty());
    }

    #[test]
    fn test_pause_outside_labeling_adds_nothing() {
        let h = Harness::new();
        let table = MockLabelTable::new();
        let calls = table.calls();
        let mut record = lesson();
        record.tag_on_pause = true;
        let mut session = Session::new(record, h.collaborators(Box::new(table)), 5.0);
        session.set_mode(EditMode::TextRecognition).unwrap();

        session.handle_player_event(PlayerEvent::Pause);

        assert!(calls.lock().is_empty());
    }

    #[test]
    fn test_pause_rows_accumulate() {
        let h = Harness::new();
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);
        session.set_tag_on_pause(true);

        for t in [1.0, 2.0, 3.0] {
            session.handle_player_event(PlayerEvent::TimeUpdate(t));
            session.handle_player_event(PlayerEvent::Pause);
        }

        let starts: Vec<f64> = session.record().labels.iter().map(|l| l.start_time).collect();
        assert_eq!(starts, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_set_mode_validates() {
        let h = Harness::new();
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);
        assert!(session.set_mode(EditMode::WordCloud).is_err());
        assert_eq!(session.record().edit_mode, EditMode::Labeling);
        session.set_mode(EditMode::TextRecognition).unwrap();
        assert_eq!(session.view().edit_mode, EditMode::TextRecognition);
    }

    #[test]
    fn test_select_data_source_now_and_click_point() {
        let h = Harness::new();
        h.data.insert("s1.csv", "time,data\n5,10\n7,20\n,99\n");
        let video = Arc::new(MockVideoHandle::new());
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);
        session.handle_player_event(PlayerEvent::VideoObjectReady(video.clone()));

        assert!(session.select_data_source_now("s1.csv"));
        assert_eq!(session.record().data_url, "s1.csv");
        assert_eq!(session.series().unwrap().len(), 2);

        session.handle_player_event(PlayerEvent::TimeUpdate(1.8));
        assert_eq!(session.view().data_cursor, Some(1));

        assert_eq!(session.click_data_point(0), Some(0.0));
        assert_eq!(video.seeks(), vec![0.0]);
        assert_eq!(session.view().data_cursor, Some(0));
    }

    #[test]
    fn test_stale_data_load_is_dropped() {
        let h = Harness::new();
        h.data.insert("old.csv", "time,data\n5,1\n");
        h.data.insert("new.csv", "time,data\n5,1\n6,2\n7,3\n");
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);

        let first = session.select_data_source("old.csv");
        let second = session.select_data_source("new.csv");

        let rx = session.data_loader().receiver();
        let mut results = vec![rx.recv_blocking().unwrap(), rx.recv_blocking().unwrap()];
        // Deliver the newest first, then the stale one.
        results.sort_by_key(|l| std::cmp::Reverse(l.generation));
        assert_eq!(results[0].generation, second);
        assert_eq!(results[1].generation, first);

        assert!(session.apply_data_loaded(results.remove(0)));
        assert!(!session.apply_data_loaded(results.remove(0)));
        assert_eq!(session.series().unwrap().len(), 3);
        assert_eq!(session.record().data_url, "new.csv");
    }

    #[test]
    fn test_initial_data_url_loads_in_background() {
        let h = Harness::new();
        h.data.insert("init.csv", "time,data\n5,1\n6,1\n");
        let mut record = lesson();
        record.data_url = "init.csv".to_string();
        let mut session = Session::new(record, h.collaborators(Box::new(LabelTrack::new())), 5.0);

        let loaded = session.data_loader().receiver().recv_blocking().unwrap();
        assert!(session.apply_data_loaded(loaded));
        assert_eq!(session.series().unwrap().len(), 2);
        assert_eq!(session.poll_data(), 0);
    }

    #[test]
    fn test_failed_data_load_keeps_series_and_reports() {
        let h = Harness::new();
        h.data.insert("good.csv", "time,data\n5,1\n");
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);
        assert!(session.select_data_source_now("good.csv"));

        assert!(!session.select_data_source_now("missing.csv"));

        assert_eq!(session.series().unwrap().len(), 1);
        let (level, text) = h.messages.last().unwrap();
        assert_eq!(level, MessageLevel::Error);
        assert!(text.starts_with("Failed to load data: "));
    }

    #[test]
    fn test_clearing_data_source() {
        let h = Harness::new();
        h.data.insert("a.csv", "time,data\n5,1\n");
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);
        session.select_data_source_now("a.csv");
        session.select_data_source("");
        assert!(session.series().is_none());
        assert_eq!(session.view().data_cursor, None);
    }

    #[test]
    fn test_load_success_and_failure() {
        let h = Harness::new();
        h.backend.put(lesson());
        let session = Session::load("admin", "lesson-1", h.collaborators(Box::new(LabelTrack::new())), 5.0)
            .unwrap();
        assert_eq!(session.current_time(), 0.0);
        assert_eq!(session.store().session_name(), "lesson-1");

        let err = Session::load("admin", "nope", h.collaborators(Box::new(LabelTrack::new())), 5.0)
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Rejected(ref m) if m.starts_with("Failed to get video: ")));
        assert_eq!(h.messages.count(), 1);
    }

    #[test]
    fn test_load_transport_failure() {
        let h = Harness::new();
        let collaborators = Collaborators {
            backend: Arc::new(MockBackend::unreachable()),
            ..h.collaborators(Box::new(LabelTrack::new()))
        };
        let err = Session::load("admin", "lesson-1", collaborators, 5.0).err().unwrap();
        assert!(matches!(err, LoadError::Transport(_)));
    }

    #[test]
    fn test_rejected_save_through_session() {
        let mut h = Harness::new();
        h.backend = Arc::new(MockBackend::with_update_response(ApiResponse::ok(false)));
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);
        session.set_field("name", json!("renamed")).unwrap();
        session.set_field("topic", json!("greetings")).unwrap();

        assert_eq!(session.save(false), SaveOutcome::Rejected);
        assert_eq!(session.record().name, "lesson-1");
        assert_eq!(session.record().topic, "greetings");
    }

    #[test]
    fn test_generate_plan_needs_chat() {
        let h = Harness::new();
        let mut record = lesson();
        record.template = "Topic: ${topic}".to_string();
        record.topic = "greetings".to_string();
        let mut session = Session::new(record, h.collaborators(Box::new(LabelTrack::new())), 5.0);
        assert_eq!(session.generate_plan(), None);

        let chat = Arc::new(MockChat::new());
        session.attach_chat(chat.clone());
        assert_eq!(session.generate_plan().as_deref(), Some("Topic: greetings"));
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_playback_task_follows_record() {
        let h = Harness::new();
        let mut session = Session::new(lesson(), h.collaborators(Box::new(LabelTrack::new())), 5.0);
        assert_eq!(session.playback_task().unwrap().vid, "vid-1");
        session.set_field("videoId", json!("")).unwrap();
        assert!(session.playback_task().is_none());
    }
}
