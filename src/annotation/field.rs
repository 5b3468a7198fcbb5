//! Typed field dispatch for `VideoRecord` updates.
//!
//! Every editable attribute has one `VideoField` variant. Incoming values are
//! first normalized by the coercion table, then deserialized into the
//! attribute's own type, so a bad key or a mistyped value is rejected before
//! the record is touched.

use super::AnnotationError;
use crate::domain::VideoRecord;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoField {
    Owner,
    Name,
    CreatedTime,
    DisplayName,
    Tag,
    VideoId,
    PlayAuth,
    CoverUrl,
    AudioUrl,
    EditMode,
    TagOnPause,
    Labels,
    Segments,
    WordCountMap,
    DataUrl,
    DataUrls,
    School,
    Stage,
    Grade,
    Class,
    Subject,
    Topic,
    Keywords,
    Template,
    Score,
}

impl VideoField {
    pub const ALL: [VideoField; 25] = [
        VideoField::Owner,
        VideoField::Name,
        VideoField::CreatedTime,
        VideoField::DisplayName,
        VideoField::Tag,
        VideoField::VideoId,
        VideoField::PlayAuth,
        VideoField::CoverUrl,
        VideoField::AudioUrl,
        VideoField::EditMode,
        VideoField::TagOnPause,
        VideoField::Labels,
        VideoField::Segments,
        VideoField::WordCountMap,
        VideoField::DataUrl,
        VideoField::DataUrls,
        VideoField::School,
        VideoField::Stage,
        VideoField::Grade,
        VideoField::Class,
        VideoField::Subject,
        VideoField::Topic,
        VideoField::Keywords,
        VideoField::Template,
        VideoField::Score,
    ];

    /// The JSON key of this field.
    pub fn key(&self) -> &'static str {
        match self {
            VideoField::Owner => "owner",
            VideoField::Name => "name",
            VideoField::CreatedTime => "createdTime",
            VideoField::DisplayName => "displayName",
            VideoField::Tag => "tag",
            VideoField::VideoId => "videoId",
            VideoField::PlayAuth => "playAuth",
            VideoField::CoverUrl => "coverUrl",
            VideoField::AudioUrl => "audioUrl",
            VideoField::EditMode => "editMode",
            VideoField::TagOnPause => "tagOnPause",
            VideoField::Labels => "labels",
            VideoField::Segments => "segments",
            VideoField::WordCountMap => "wordCountMap",
            VideoField::DataUrl => "dataUrl",
            VideoField::DataUrls => "dataUrls",
            VideoField::School => "school",
            VideoField::Stage => "stage",
            VideoField::Grade => "grade",
            VideoField::Class => "class",
            VideoField::Subject => "subject",
            VideoField::Topic => "topic",
            VideoField::Keywords => "keywords",
            VideoField::Template => "template",
            VideoField::Score => "score",
        }
    }

    pub fn from_key(key: &str) -> Result<Self, AnnotationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key() == key)
            .ok_or_else(|| AnnotationError::UnknownField(key.to_string()))
    }

    /// Normalize a raw value for this field. Only numeric fields change.
    pub fn coerce(&self, value: Value) -> Value {
        match self {
            VideoField::Score => Value::from(parse_int(&value)),
            _ => value,
        }
    }

    /// Write an already-coerced value into `record`.
    pub(crate) fn assign(&self, record: &mut VideoRecord, value: Value) -> Result<(), AnnotationError> {
        match self {
            VideoField::Owner => record.owner = decode(self, value)?,
            VideoField::Name => record.name = decode(self, value)?,
            VideoField::CreatedTime => record.created_time = decode(self, value)?,
            VideoField::DisplayName => record.display_name = decode(self, value)?,
            VideoField::Tag => record.tag = decode(self, value)?,
            VideoField::VideoId => record.video_id = decode(self, value)?,
            VideoField::PlayAuth => record.play_auth = decode(self, value)?,
            VideoField::CoverUrl => record.cover_url = decode(self, value)?,
            VideoField::AudioUrl => record.audio_url = decode(self, value)?,
            VideoField::EditMode => record.edit_mode = decode(self, value)?,
            VideoField::TagOnPause => record.tag_on_pause = decode(self, value)?,
            VideoField::Labels => record.labels = decode(self, value)?,
            VideoField::Segments => record.segments = decode(self, value)?,
            VideoField::WordCountMap => record.word_count_map = decode(self, value)?,
            VideoField::DataUrl => record.data_url = decode(self, value)?,
            VideoField::DataUrls => record.data_urls = decode(self, value)?,
            VideoField::School => record.school = decode(self, value)?,
            VideoField::Stage => record.stage = decode(self, value)?,
            VideoField::Grade => record.grade = decode(self, value)?,
            VideoField::Class => record.class_name = decode(self, value)?,
            VideoField::Subject => record.subject = decode(self, value)?,
            VideoField::Topic => record.topic = decode(self, value)?,
            VideoField::Keywords => record.keywords = decode(self, value)?,
            VideoField::Template => record.template = decode(self, value)?,
            VideoField::Score => record.score = decode(self, value)?,
        }
        Ok(())
    }
}

impl std::fmt::Display for VideoField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

fn decode<T: DeserializeOwned>(field: &VideoField, value: Value) -> Result<T, AnnotationError> {
    serde_json::from_value(value).map_err(|source| AnnotationError::InvalidValue {
        field: field.key(),
        source,
    })
}

/// Integer parse with form-input leniency: leading whitespace skipped, an
/// optional sign, an optional `0x` prefix, then as many digits as there
/// are. Anything without a leading digit becomes 0. Out-of-range values
/// saturate at the `i64` bounds.
pub fn parse_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_int_prefix(s).unwrap_or(0),
        _ => 0,
    }
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let digits: Vec<i64> = rest
        .chars()
        .map_while(|c| c.to_digit(radix))
        .map(i64::from)
        .collect();
    if digits.is_empty() {
        return None;
    }
    let bound = if negative { i64::MIN } else { i64::MAX };
    let value = digits.iter().try_fold(0i64, |acc, &d| {
        let shifted = acc.checked_mul(i64::from(radix))?;
        if negative {
            shifted.checked_sub(d)
        } else {
            shifted.checked_add(d)
        }
    });
    Some(value.unwrap_or(bound))
}
