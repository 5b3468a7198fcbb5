use crate::domain::VideoRecord;
use serde::Serialize;

const VIDEO_WIDTH: u32 = 1920;
const VIDEO_HEIGHT: u32 = 1080;

/// Descriptor handed to the external player when it mounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackTask {
    pub vid: String,
    pub play_auth: String,
    pub cover: String,
    pub video_width: u32,
    pub video_height: u32,
    pub width: String,
    pub autoplay: bool,
    pub is_live: bool,
    pub re_play: bool,
    pub playsinline: bool,
    pub preload: bool,
    pub control_bar_visibility: String,
    #[serde(rename = "useH5Prism")]
    pub use_h5_prism: bool,
}

impl PlaybackTask {
    /// `None` when the record has no video attached yet.
    pub fn for_record(record: &VideoRecord) -> Option<Self> {
        if record.video_id.is_empty() {
            return None;
        }
        Some(Self {
            vid: record.video_id.clone(),
            play_auth: record.play_auth.clone(),
            cover: record.cover_url.clone(),
            video_width: VIDEO_WIDTH,
            video_height: VIDEO_HEIGHT,
            width: "100%".to_string(),
            autoplay: false,
            is_live: false,
            re_play: false,
            playsinline: true,
            preload: true,
            control_bar_visibility: "hover".to_string(),
            use_h5_prism: true,
        })
    }
}
