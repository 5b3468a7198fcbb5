pub mod traits;
pub mod types;

pub use types::{ApiResponse, DataPoint, EditMode, LabelRow, MessageLevel, Segment, VideoRecord};
