//! Playback clock: the one owner of "now".
//!
//! Derived views (active segment, data cursor) read `current_time()` on every
//! recomputation and never keep their own copy.

mod task;

pub use task::PlaybackTask;

use crate::domain::traits::VideoHandle;
use std::sync::Arc;

/// Which external handle became available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Player,
    Screen,
    VideoObject,
}

#[derive(Default)]
pub struct PlaybackClock {
    current_time: f64,
    player: Option<Arc<dyn VideoHandle>>,
    screen: Option<Arc<dyn VideoHandle>>,
    video_obj: Option<Arc<dyn VideoHandle>>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Record the time reported by the player.
    pub fn on_time_update(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Jump to `time`.
    ///
    /// The video object is told to seek when attached; the clock moves
    /// immediately either way so views do not wait for the next tick.
    /// Returns whether the player was actually instructed.
    pub fn seek(&mut self, time: f64) -> bool {
        self.current_time = time;
        match &self.video_obj {
            Some(video) => {
                video.change_time(time);
                true
            }
            None => {
                tracing::debug!(time, "seek without video object, clock only");
                false
            }
        }
    }

    /// Reset to the start for a freshly loaded record.
    pub fn reset(&mut self) {
        self.current_time = 0.0;
    }

    pub fn attach(&mut self, kind: HandleKind, handle: Arc<dyn VideoHandle>) {
        tracing::debug!(?kind, "player handle attached");
        match kind {
            HandleKind::Player => self.player = Some(handle),
            HandleKind::Screen => self.screen = Some(handle),
            HandleKind::VideoObject => self.video_obj = Some(handle),
        }
    }

    pub fn player(&self) -> Option<&Arc<dyn VideoHandle>> {
        self.player.as_ref()
    }

    pub fn screen(&self) -> Option<&Arc<dyn VideoHandle>> {
        self.screen.as_ref()
    }

    pub fn video_object(&self) -> Option<&Arc<dyn VideoHandle>> {
        self.video_obj.as_ref()
    }
}

impl std::fmt::Debug for PlaybackClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackClock")
            .field("current_time", &self.current_time)
            .field("player", &self.player.is_some())
            .field("screen", &self.screen.is_some())
            .field("video_obj", &self.video_obj.is_some())
            .finish()
    }
}
