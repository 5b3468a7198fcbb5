//! Shared types used across multiple modules.
//!
//! The record types mirror the JSON the persistence backend speaks
//! (camelCase keys, missing fields defaulted) so a record can be loaded,
//! edited and sent back without loss.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// View mode of the editing session.
///
/// Serialized with the display strings the backend stores in `editMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EditMode {
    #[default]
    Labeling,
    #[serde(rename = "Text Recognition")]
    TextRecognition,
    #[serde(rename = "Word Cloud")]
    WordCloud,
    #[serde(rename = "AI Assistant")]
    AIAssistant,
}

impl EditMode {
    /// All modes in selector order.
    pub const ALL: [EditMode; 4] = [
        EditMode::Labeling,
        EditMode::TextRecognition,
        EditMode::WordCloud,
        EditMode::AIAssistant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditMode::Labeling => "Labeling",
            EditMode::TextRecognition => "Text Recognition",
            EditMode::WordCloud => "Word Cloud",
            EditMode::AIAssistant => "AI Assistant",
        }
    }

    /// Parse a mode from its display string or a compact alias
    /// (`text-recognition`, `word-cloud`, `ai-assistant`).
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "labeling" => Some(EditMode::Labeling),
            "textrecognition" => Some(EditMode::TextRecognition),
            "wordcloud" => Some(EditMode::WordCloud),
            "aiassistant" => Some(EditMode::AIAssistant),
            _ => None,
        }
    }

    /// Whether the player and data chart are visible in this mode.
    pub fn shows_player(&self) -> bool {
        !matches!(self, EditMode::AIAssistant)
    }
}

/// `editMode` as stored on a record. Blank, null or unknown values fall back
/// to the default mode instead of failing the whole record.
fn lenient_edit_mode<'de, D>(deserializer: D) -> Result<EditMode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(EditMode::parse).unwrap_or_default())
}

impl std::fmt::Display for EditMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript utterance, active over `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Segment {
    pub start_time: f64,
    pub end_time: f64,
    pub speaker: String,
    pub text: String,
}

impl Segment {
    pub fn new(start_time: f64, end_time: f64, speaker: &str, text: &str) -> Self {
        Self {
            start_time,
            end_time,
            speaker: speaker.to_string(),
            text: text.to_string(),
        }
    }

    /// Half-open containment. Inverted or NaN intervals never contain anything.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time
    }
}

/// One calibrated sample of the auxiliary data series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub time: f64,
    pub data: f64,
}

/// One label annotation on the video timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelRow {
    pub id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    /// Columns owned by the label table that this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LabelRow {
    /// A blank label anchored at `time`.
    pub fn at(time: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time: time,
            end_time: time,
            text: String::new(),
            extra: Map::new(),
        }
    }
}

/// The annotated video as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoRecord {
    pub owner: String,
    pub name: String,
    pub created_time: String,
    pub display_name: String,
    pub tag: String,

    pub video_id: String,
    pub play_auth: String,
    pub cover_url: String,
    pub audio_url: String,

    #[serde(deserialize_with = "lenient_edit_mode")]
    pub edit_mode: EditMode,
    pub tag_on_pause: bool,
    pub labels: Vec<LabelRow>,
    pub segments: Option<Vec<Segment>>,
    pub word_count_map: Option<BTreeMap<String, u64>>,

    pub data_url: String,
    pub data_urls: Option<Vec<String>>,

    pub school: String,
    pub stage: String,
    pub grade: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub subject: String,
    pub topic: String,
    pub keywords: Option<Vec<String>>,
    pub template: String,

    pub score: i64,

    /// Backend keys without a typed field, sent back untouched on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VideoRecord {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Transcript segments, or an empty slice when none were recognized.
    pub fn segments(&self) -> &[Segment] {
        self.segments.as_deref().unwrap_or(&[])
    }

    pub fn has_word_counts(&self) -> bool {
        self.word_count_map
            .as_ref()
            .map(|m| !m.is_empty())
            .unwrap_or(false)
    }

    pub fn data_urls(&self) -> &[String] {
        self.data_urls.as_deref().unwrap_or(&[])
    }
}

/// Envelope returned by every backend call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok".to_string(),
            msg: String::new(),
            data: Some(data),
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            status: "error".to_string(),
            msg: msg.to_string(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Severity of a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Error,
}
