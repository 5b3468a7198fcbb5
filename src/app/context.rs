//! Application context: wires configuration to the production collaborators.

use crate::annotation::LabelTrack;
use crate::app::config::Config;
use crate::domain::traits::{DataSource, MessageSink, Navigator, VideoBackend};
use crate::domain::VideoRecord;
use crate::infrastructure::{ConsoleMessages, HttpDataSource, HttpVideoBackend, RecordingNavigator};
use crate::sync::{Collaborators, LoadError, Session};
use std::sync::Arc;
use std::time::Duration;

/// Central point for dependency injection.
///
/// Holds one instance of each collaborator; every session opened through
/// the context shares them.
pub struct AppContext {
    pub config: Config,
    pub backend: Arc<dyn VideoBackend>,
    pub data_source: Arc<dyn DataSource>,
    pub messages: Arc<dyn MessageSink>,
    pub navigator: Arc<dyn Navigator>,
}

impl AppContext {
    /// Build the production context from a validated config.
    pub fn new(config: Config) -> Self {
        let timeout = Duration::from_secs(config.fetch_timeout_secs);
        Self {
            backend: Arc::new(HttpVideoBackend::new(&config.backend_url, timeout)),
            data_source: Arc::new(HttpDataSource::new(timeout)),
            messages: Arc::new(ConsoleMessages),
            navigator: Arc::new(RecordingNavigator::default()),
            config,
        }
    }

    /// Context over caller-supplied collaborators.
    pub fn with_collaborators(
        config: Config,
        backend: Arc<dyn VideoBackend>,
        data_source: Arc<dyn DataSource>,
        messages: Arc<dyn MessageSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            backend,
            data_source,
            messages,
            navigator,
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            backend: Arc::clone(&self.backend),
            data_source: Arc::clone(&self.data_source),
            labels: Box::new(LabelTrack::new()),
            messages: Arc::clone(&self.messages),
            navigator: Arc::clone(&self.navigator),
        }
    }

    /// Open a session on a record that is already in hand.
    pub fn session_for(&self, record: VideoRecord) -> Session {
        let mut session = Session::new(
            record,
            self.collaborators(),
            self.config.calibration_offset_secs,
        );
        self.apply_defaults(&mut session);
        session
    }

    /// Open a session that waits for an explicit data source selection
    /// instead of fetching the record's `dataUrl` in the background.
    pub fn deferred_session_for(&self, record: VideoRecord) -> Session {
        let mut session = Session::deferred(
            record,
            self.collaborators(),
            self.config.calibration_offset_secs,
        );
        self.apply_defaults(&mut session);
        session
    }

    /// Fetch `name` for the configured owner and open a session on it.
    pub fn open(&self, name: &str) -> Result<Session, LoadError> {
        let mut session = Session::load(
            &self.config.owner,
            name,
            self.collaborators(),
            self.config.calibration_offset_secs,
        )?;
        self.apply_defaults(&mut session);
        Ok(session)
    }

    fn apply_defaults(&self, session: &mut Session) {
        if self.config.tag_on_pause_default && !session.record().tag_on_pause {
            session.set_tag_on_pause(true);
        }
    }
}
