//! Terminal stand-ins for the UI collaborators.

use crate::domain::traits::{ChatSink, MessageSink, Navigator};
use crate::domain::MessageLevel;
use parking_lot::Mutex;

/// Prints user messages to stderr.
#[derive(Default)]
pub struct ConsoleMessages;

impl MessageSink for ConsoleMessages {
    fn show_message(&self, level: MessageLevel, text: &str) {
        match level {
            MessageLevel::Success => {
                tracing::info!(%text, "message");
                eprintln!("{}", text);
            }
            MessageLevel::Error => {
                tracing::warn!(%text, "message");
                eprintln!("error: {}", text);
            }
        }
    }
}

/// Remembers the last route instead of changing pages.
#[derive(Default)]
pub struct RecordingNavigator {
    last: Mutex<Option<String>>,
}

impl RecordingNavigator {
    pub fn last(&self) -> Option<String> {
        self.last.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path, "navigate");
        *self.last.lock() = Some(path.to_string());
    }
}

/// Writes assistant prompts to stdout.
#[derive(Default)]
pub struct StdoutChat;

impl ChatSink for StdoutChat {
    fn send_message(&self, text: &str, is_hidden: bool) {
        tracing::debug!(is_hidden, "chat message");
        println!("{}", text);
    }
}
