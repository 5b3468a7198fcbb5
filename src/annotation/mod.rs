//! Annotation store: the session's single owner of the `VideoRecord`.

mod field;
mod labels;
mod plan;
mod store;

pub use field::{parse_int, VideoField};
pub use labels::LabelTrack;
pub use plan::{generate_plan, send_plan};
pub use store::{AnnotationStore, SaveOutcome};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("unknown video field: {0}")]
    UnknownField(String),

    #[error("invalid value for field {field}: {source}")]
    InvalidValue {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
