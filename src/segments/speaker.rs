/// Speaker category used to color transcript tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerTier {
    Teacher,
    Student,
    Other,
}

impl SpeakerTier {
    pub fn of(speaker: &str) -> Self {
        if speaker == "Teacher" {
            SpeakerTier::Teacher
        } else if speaker.starts_with("Student") {
            SpeakerTier::Student
        } else {
            SpeakerTier::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeakerTier::Teacher => "teacher",
            SpeakerTier::Student => "student",
            SpeakerTier::Other => "other",
        }
    }
}

/// Timeline label for a segment start (HH:MM:SS).
///
/// Zero and non-finite inputs render as an empty label.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds == 0.0 {
        return String::new();
    }
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
