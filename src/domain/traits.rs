//! Collaborator contracts of the annotation core.
//!
//! The core never talks to a player, a backend or a UI directly. These
//! traits are the seams: production adapters live in `infrastructure`,
//! test doubles in `test_support::mocks`.

use crate::domain::types::{ApiResponse, LabelRow, MessageLevel, VideoRecord};
use anyhow::Result;

/// Handle to an external player component (player, screen or video object).
///
/// Only the video-object handle is ever asked to seek; the other two are
/// stored so the label table can draw on them.
pub trait VideoHandle: Send + Sync {
    /// Jump playback to `seconds`.
    fn change_time(&self, seconds: f64);
}

/// Persistence backend for video records.
///
/// `Err` means the call never produced a response (transport failure).
/// Application-level failures come back as `Ok` with `status = "error"`.
pub trait VideoBackend: Send + Sync {
    fn get_video(&self, owner: &str, name: &str) -> Result<ApiResponse<VideoRecord>>;

    /// Store `record` under `owner/name`.
    ///
    /// `data = Some(false)` with `status = "ok"` means the backend refused the
    /// update on a business rule.
    fn update_video(&self, owner: &str, name: &str, record: &VideoRecord) -> Result<ApiResponse<bool>>;
}

/// Source of raw data-series text (plain GET against `dataUrl`).
pub trait DataSource: Send + Sync {
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// The label table that owns label rows.
pub trait LabelTable {
    /// Append a row seeded from `current_labels` at `current_time` and return
    /// the table's new contents.
    fn add_row(&mut self, current_labels: &[LabelRow], current_time: f64) -> Vec<LabelRow>;
}

/// User-visible notifications.
pub trait MessageSink {
    fn show_message(&self, level: MessageLevel, text: &str);
}

/// Route change after a successful save.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// The AI assistant conversation, treated as an opaque sink.
pub trait ChatSink {
    fn send_message(&self, text: &str, is_hidden: bool);
}
