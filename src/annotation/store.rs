use super::{AnnotationError, VideoField};
use crate::domain::traits::{MessageSink, Navigator, VideoBackend};
use crate::domain::{MessageLevel, VideoRecord};
use serde_json::Value;

/// Result of one save attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Accepted; the caller was sent to `path`.
    Saved { path: String },
    /// The backend answered but refused the update; `name` was rolled back.
    Rejected,
    /// The backend reported an error or could not be reached.
    Failed(String),
}

/// Owns the record being edited.
///
/// `session_name` is the name the record was loaded (or last saved) under;
/// it addresses the record on the backend and is the rollback target for a
/// refused rename.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    record: VideoRecord,
    session_name: String,
}

impl AnnotationStore {
    pub fn new(record: VideoRecord) -> Self {
        let session_name = record.name.clone();
        Self {
            record,
            session_name,
        }
    }

    pub fn record(&self) -> &VideoRecord {
        &self.record
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    /// Swap in a freshly loaded record.
    pub fn replace(&mut self, record: VideoRecord) {
        self.session_name = record.name.clone();
        self.record = record;
    }

    /// Coerce `value` for `field` and write it, leaving every other field
    /// as it was. On error the record is unchanged.
    pub fn update(&mut self, field: VideoField, value: Value) -> Result<(), AnnotationError> {
        let value = field.coerce(value);
        field.assign(&mut self.record, value)?;
        tracing::debug!(%field, "video field updated");
        Ok(())
    }

    /// String-keyed entry point for [`update`](Self::update).
    pub fn set_field(&mut self, key: &str, value: Value) -> Result<(), AnnotationError> {
        let field = VideoField::from_key(key)?;
        self.update(field, value)
    }

    /// Persist the record and report the outcome to the user.
    pub fn save(
        &mut self,
        backend: &dyn VideoBackend,
        messages: &dyn MessageSink,
        navigator: &dyn Navigator,
        exit_after_save: bool,
    ) -> SaveOutcome {
        let snapshot = self.record.clone();
        let response = match backend.update_video(&snapshot.owner, &self.session_name, &snapshot) {
            Ok(response) => response,
            Err(e) => {
                let text = format!("failed to save: {:#}", e);
                tracing::warn!(error = %e, "save transport failure");
                messages.show_message(MessageLevel::Error, &text);
                return SaveOutcome::Failed(text);
            }
        };

        if !response.is_ok() {
            let text = format!("failed to save: {}", response.msg);
            tracing::warn!(msg = %response.msg, "save failed");
            messages.show_message(MessageLevel::Error, &text);
            return SaveOutcome::Failed(text);
        }

        if response.data == Some(true) {
            messages.show_message(MessageLevel::Success, "Successfully saved");
            self.session_name = self.record.name.clone();
            let path = if exit_after_save {
                "/videos".to_string()
            } else {
                format!("/videos/{}", self.record.name)
            };
            tracing::info!(name = %self.session_name, "video saved");
            navigator.navigate(&path);
            SaveOutcome::Saved { path }
        } else {
            messages.show_message(MessageLevel::Error, "failed to save: server side failure");
            tracing::warn!(
                attempted = %self.record.name,
                restored = %self.session_name,
                "save rejected, restoring name"
            );
            self.record.name = self.session_name.clone();
            SaveOutcome::Rejected
        }
    }
}
