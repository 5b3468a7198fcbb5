//! Mock implementations for unit testing.
//!
//! These mocks implement the collaborator traits from `crate::domain::traits`
//! so the core can be driven without a player, a backend or a UI.

use crate::domain::traits::{
    ChatSink, DataSource, LabelTable, MessageSink, Navigator, VideoBackend, VideoHandle,
};
use crate::domain::{ApiResponse, LabelRow, MessageLevel, VideoRecord};
use anyhow::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock player handle that records every seek.
pub struct MockVideoHandle {
    seeks: Mutex<Vec<f64>>,
}

impl MockVideoHandle {
    pub fn new() -> Self {
        Self {
            seeks: Mutex::new(Vec::new()),
        }
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.seeks.lock().clone()
    }
}

impl Default for MockVideoHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoHandle for MockVideoHandle {
    fn change_time(&self, seconds: f64) {
        self.seeks.lock().push(seconds);
    }
}

/// Mock backend holding records in memory.
///
/// `get_video` answers from [`put`](Self::put) records; `update_video`
/// returns the configured response and remembers what was sent.
pub struct MockBackend {
    records: Mutex<HashMap<String, VideoRecord>>,
    update_response: ApiResponse<bool>,
    reachable: bool,
    updates: Mutex<Vec<(String, String, VideoRecord)>>,
}

impl MockBackend {
    fn build(update_response: ApiResponse<bool>, reachable: bool) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            update_response,
            reachable,
            updates: Mutex::new(Vec::new()),
        }
    }

    /// Backend that accepts every update.
    pub fn accepting() -> Self {
        Self::build(ApiResponse::ok(true), true)
    }

    /// Backend that answers `status: ok` with `data: false`.
    pub fn rejecting() -> Self {
        Self::build(ApiResponse::ok(false), true)
    }

    /// Backend whose every call fails at the transport level.
    pub fn unreachable() -> Self {
        Self::build(ApiResponse::ok(false), false)
    }

    pub fn with_update_response(response: ApiResponse<bool>) -> Self {
        Self::build(response, true)
    }

    pub fn put(&self, record: VideoRecord) {
        let key = format!("{}/{}", record.owner, record.name);
        self.records.lock().insert(key, record);
    }

    pub fn updates(&self) -> Vec<(String, String, VideoRecord)> {
        self.updates.lock().clone()
    }
}

impl VideoBackend for MockBackend {
    fn get_video(&self, owner: &str, name: &str) -> Result<ApiResponse<VideoRecord>> {
        if !self.reachable {
            anyhow::bail!("connection refused");
        }
        let key = format!("{}/{}", owner, name);
        Ok(match self.records.lock().get(&key) {
            Some(record) => ApiResponse::ok(record.clone()),
            None => ApiResponse::error(&format!("video {} not found", key)),
        })
    }

    fn update_video(&self, owner: &str, name: &str, record: &VideoRecord) -> Result<ApiResponse<bool>> {
        if !self.reachable {
            anyhow::bail!("connection refused");
        }
        self.updates
            .lock()
            .push((owner.to_string(), name.to_string(), record.clone()));
        Ok(self.update_response.clone())
    }
}

/// Mock data source serving text by URL.
pub struct MockDataSource {
    files: Mutex<HashMap<String, String>>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, url: &str, text: &str) {
        self.files.lock().insert(url.to_string(), text.to_string());
    }
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for MockDataSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        match self.files.lock().get(url) {
            Some(text) => Ok(text.clone()),
            None => anyhow::bail!("404 Not Found: {}", url),
        }
    }
}

/// Label table that records each `add_row` call as `(rows before, time)`.
pub struct MockLabelTable {
    calls: Arc<Mutex<Vec<(usize, f64)>>>,
}

impl MockLabelTable {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared view of the calls; stays valid after the table is boxed away.
    pub fn calls(&self) -> Arc<Mutex<Vec<(usize, f64)>>> {
        Arc::clone(&self.calls)
    }
}

impl Default for MockLabelTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelTable for MockLabelTable {
    fn add_row(&mut self, current_labels: &[LabelRow], current_time: f64) -> Vec<LabelRow> {
        self.calls.lock().push((current_labels.len(), current_time));
        let mut rows = current_labels.to_vec();
        rows.push(LabelRow::at(current_time));
        rows
    }
}

#[derive(Default)]
pub struct MockMessages {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl MockMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages.lock().clone()
    }

    pub fn last(&self) -> Option<(MessageLevel, String)> {
        self.messages.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().len()
    }
}

impl MessageSink for MockMessages {
    fn show_message(&self, level: MessageLevel, text: &str) {
        self.messages.lock().push((level, text.to_string()));
    }
}

#[derive(Default)]
pub struct MockNavigator {
    paths: Mutex<Vec<String>>,
}

impl MockNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().clone()
    }
}

impl Navigator for MockNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().push(path.to_string());
    }
}

/// Assistant sink recording `(text, is_hidden)` pairs.
#[derive(Default)]
pub struct MockChat {
    messages: Mutex<Vec<(String, bool)>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, bool)> {
        self.messages.lock().clone()
    }
}

impl ChatSink for MockChat {
    fn send_message(&self, text: &str, is_hidden: bool) {
        self.messages.lock().push((text.to_string(), is_hidden));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_backend_round_trip() {
        let backend = MockBackend::accepting();
        backend.put(VideoRecord::new("admin", "v1"));

        let found = backend.get_video("admin", "v1").unwrap();
        assert!(found.is_ok());
        assert_eq!(found.data.unwrap().name, "v1");

        let missing = backend.get_video("admin", "v2").unwrap();
        assert!(!missing.is_ok());
        assert!(missing.data.is_none());
    }

    #[test]
    fn test_unreachable_backend_errors() {
        let backend = MockBackend::unreachable();
        assert!(backend.get_video("admin", "v1").is_err());
        assert!(backend
            .update_video("admin", "v1", &VideoRecord::new("admin", "v1"))
            .is_err());
        assert!(backend.updates().is_empty());
    }

    #[test]
    fn test_mock_label_table_counts_calls() {
        let mut table = MockLabelTable::new();
        let calls = table.calls();
        let rows = table.add_row(&[], 2.5);
        let rows = table.add_row(&rows, 3.5);
        assert_eq!(rows.len(), 2);
        assert_eq!(*calls.lock(), vec![(0, 2.5), (1, 3.5)]);
    }

    #[test]
    fn test_sinks_as_trait_objects() {
        let messages: Arc<dyn MessageSink> = Arc::new(MockMessages::new());
        messages.show_message(MessageLevel::Success, "ok");
        let navigator: Box<dyn Navigator> = Box::new(MockNavigator::new());
        navigator.navigate("/videos");
        let handle: Arc<dyn VideoHandle> = Arc::new(MockVideoHandle::new());
        handle.change_time(1.0);
    }
}
