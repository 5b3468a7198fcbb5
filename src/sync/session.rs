use super::loader::{DataLoaded, DataLoader};
use super::{LoadError, PlayerEvent, SyncView};
use crate::annotation::{self, AnnotationError, AnnotationStore, SaveOutcome, VideoField};
use crate::data::DataSeries;
use crate::domain::traits::{ChatSink, DataSource, LabelTable, MessageSink, Navigator, VideoBackend};
use crate::domain::{EditMode, LabelRow, MessageLevel, VideoRecord};
use crate::mode::{self, ModeError, PauseAction};
use crate::playback::{HandleKind, PlaybackClock, PlaybackTask};
use crate::segments::SegmentIndex;
use serde_json::Value;
use std::sync::Arc;

/// Everything outside the core that a session talks to.
pub struct Collaborators {
    pub backend: Arc<dyn VideoBackend>,
    pub data_source: Arc<dyn DataSource>,
    pub labels: Box<dyn LabelTable>,
    pub messages: Arc<dyn MessageSink>,
    pub navigator: Arc<dyn Navigator>,
}

/// One editing session over one video record.
///
/// Owns the store and the clock; every derived value in [`SyncView`] is
/// recomputed from them on demand.
pub struct Session {
    store: AnnotationStore,
    clock: PlaybackClock,
    series: Option<DataSeries>,
    loader: DataLoader,
    backend: Arc<dyn VideoBackend>,
    labels: Box<dyn LabelTable>,
    messages: Arc<dyn MessageSink>,
    navigator: Arc<dyn Navigator>,
    chat: Option<Arc<dyn ChatSink>>,
}

impl Session {
    /// Start a session over an already fetched record.
    ///
    /// Kicks off a background data load when the record names a data source.
    pub fn new(record: VideoRecord, collaborators: Collaborators, offset_secs: f64) -> Self {
        let mut session = Self::deferred(record, collaborators, offset_secs);
        let data_url = session.store.record().data_url.clone();
        if !data_url.is_empty() {
            session.loader.request(&data_url);
        }
        session
    }

    /// Like [`Session::new`], but leaves the data series unloaded until a
    /// source is selected.
    pub fn deferred(record: VideoRecord, collaborators: Collaborators, offset_secs: f64) -> Self {
        let Collaborators {
            backend,
            data_source,
            labels,
            messages,
            navigator,
        } = collaborators;

        Self {
            store: AnnotationStore::new(record),
            clock: PlaybackClock::new(),
            series: None,
            loader: DataLoader::new(data_source, offset_secs),
            backend,
            labels,
            messages,
            navigator,
            chat: None,
        }
    }

    /// Fetch `owner/name` from the backend and open a session on it.
    pub fn load(
        owner: &str,
        name: &str,
        collaborators: Collaborators,
        offset_secs: f64,
    ) -> Result<Self, LoadError> {
        let response = match collaborators.backend.get_video(owner, name) {
            Ok(response) => response,
            Err(e) => {
                let text = format!("Failed to get video: {:#}", e);
                collaborators.messages.show_message(MessageLevel::Error, &text);
                return Err(LoadError::Transport(text));
            }
        };

        let ok = response.is_ok();
        match response.data {
            Some(record) if ok => {
                tracing::info!(owner, name, "video loaded");
                Ok(Self::new(record, collaborators, offset_secs))
            }
            _ => {
                let text = format!("Failed to get video: {}", response.msg);
                collaborators.messages.show_message(MessageLevel::Error, &text);
                Err(LoadError::Rejected(text))
            }
        }
    }

    pub fn record(&self) -> &VideoRecord {
        self.store.record()
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    pub fn series(&self) -> Option<&DataSeries> {
        self.series.as_ref()
    }

    pub fn data_loader(&self) -> &DataLoader {
        &self.loader
    }

    pub fn attach_chat(&mut self, chat: Arc<dyn ChatSink>) {
        self.chat = Some(chat);
    }

    // === Player → core ===

    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::TimeUpdate(time) => self.clock.on_time_update(time),
            PlayerEvent::Pause => self.on_pause(),
            PlayerEvent::PlayerReady(handle) => self.clock.attach(HandleKind::Player, handle),
            PlayerEvent::ScreenReady(handle) => self.clock.attach(HandleKind::Screen, handle),
            PlayerEvent::VideoObjectReady(handle) => {
                self.clock.attach(HandleKind::VideoObject, handle)
            }
        }
    }

    fn on_pause(&mut self) {
        let record = self.store.record();
        match mode::pause_action(record.edit_mode, record.tag_on_pause) {
            PauseAction::None => {}
            PauseAction::AddLabelRow => {
                let now = self.clock.current_time();
                let rows = self.labels.add_row(&record.labels, now);
                tracing::debug!(time = now, rows = rows.len(), "label row added on pause");
                self.write_labels(rows);
            }
        }
    }

    fn write_labels(&mut self, rows: Vec<LabelRow>) {
        let result = serde_json::to_value(rows)
            .map_err(|source| AnnotationError::InvalidValue {
                field: VideoField::Labels.key(),
                source,
            })
            .and_then(|value| self.store.update(VideoField::Labels, value));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to store label rows");
        }
    }

    /// Derived view state at the current time.
    pub fn view(&self) -> SyncView {
        let now = self.clock.current_time();
        let record = self.store.record();
        SyncView {
            current_time: now,
            edit_mode: record.edit_mode,
            active_segment: SegmentIndex::new(record.segments()).active_index(now),
            data_cursor: self.series.as_ref().and_then(|s| s.cursor(now)),
        }
    }

    // === User → player ===

    /// Seek to the start of segment `index`. Returns the target time.
    pub fn click_segment(&mut self, index: usize) -> Option<f64> {
        let target = self.store.record().segments().get(index)?.start_time;
        self.clock.seek(target);
        Some(target)
    }

    /// Seek to the time of data sample `index`. Returns the target time.
    pub fn click_data_point(&mut self, index: usize) -> Option<f64> {
        let target = self.series.as_ref()?.point_at(index)?.time;
        if !target.is_finite() {
            return None;
        }
        self.clock.seek(target);
        Some(target)
    }

    pub fn seek(&mut self, time: f64) {
        self.clock.seek(time);
    }

    // === Data series ===

    /// Switch to another data source; loads in the background.
    pub fn select_data_source(&mut self, url: &str) -> u64 {
        self.set_data_url(url);
        if url.is_empty() {
            self.series = None;
            return self.loader.invalidate();
        }
        self.loader.request(url)
    }

    /// Switch to another data source, loading on the calling thread.
    pub fn select_data_source_now(&mut self, url: &str) -> bool {
        self.set_data_url(url);
        if url.is_empty() {
            self.series = None;
            self.loader.invalidate();
            return false;
        }
        let loaded = self.loader.load_now(url);
        self.apply_data_loaded(loaded)
    }

    fn set_data_url(&mut self, url: &str) {
        if let Err(e) = self.store.update(VideoField::DataUrl, Value::from(url)) {
            tracing::warn!(error = %e, "failed to record data source");
        }
    }

    /// Apply a finished load. Returns whether the series was replaced.
    pub fn apply_data_loaded(&mut self, loaded: DataLoaded) -> bool {
        if !self.loader.is_current(loaded.generation) {
            tracing::warn!(
                url = %loaded.url,
                generation = loaded.generation,
                current = self.loader.generation(),
                "dropping stale data series"
            );
            return false;
        }
        match loaded.result {
            Ok(series) => {
                tracing::info!(url = %loaded.url, points = series.len(), "data series ready");
                self.series = Some(series);
                true
            }
            Err(e) => {
                self.messages
                    .show_message(MessageLevel::Error, &format!("Failed to load data: {}", e));
                false
            }
        }
    }

    /// Drain finished loads without blocking. Returns how many replaced the
    /// series.
    pub fn poll_data(&mut self) -> usize {
        let mut applied = 0;
        while let Some(loaded) = self.loader.try_recv() {
            if self.apply_data_loaded(loaded) {
                applied += 1;
            }
        }
        applied
    }

    // === Record edits ===

    pub fn set_field(&mut self, key: &str, value: Value) -> Result<(), AnnotationError> {
        self.store.set_field(key, value)
    }

    pub fn available_modes(&self) -> Vec<EditMode> {
        mode::available_modes(self.store.record())
    }

    pub fn set_mode(&mut self, mode: EditMode) -> Result<(), ModeError> {
        let mode = mode::select(mode, self.store.record())?;
        if let Err(e) = self.store.update(VideoField::EditMode, Value::from(mode.as_str())) {
            tracing::warn!(error = %e, "failed to store edit mode");
        }
        Ok(())
    }

    pub fn set_tag_on_pause(&mut self, enabled: bool) {
        if let Err(e) = self.store.update(VideoField::TagOnPause, Value::from(enabled)) {
            tracing::warn!(error = %e, "failed to store tagOnPause");
        }
    }

    pub fn playback_task(&self) -> Option<PlaybackTask> {
        PlaybackTask::for_record(self.store.record())
    }

    /// Send the lesson-plan prompt to the attached assistant.
    pub fn generate_plan(&self) -> Option<String> {
        let chat = self.chat.as_ref()?;
        Some(annotation::send_plan(self.store.record(), chat.as_ref()))
    }

    pub fn save(&mut self, exit_after_save: bool) -> SaveOutcome {
        self.store.save(
            self.backend.as_ref(),
            self.messages.as_ref(),
            self.navigator.as_ref(),
            exit_after_save,
        )
    }
}
