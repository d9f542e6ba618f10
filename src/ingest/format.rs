//! Annotation file format.
//!
//! One JSON object per annotator session:
//! ```json
//! {
//!   "nickname": "rater-7",
//!   "videoURL": "https://youtu.be/abc123",
//!   "e1": { "startTime": 12.5, "endTime": 18.0, "label": "happy" },
//!   "e2": { "start": "20", "end": "24.5", "emotion": "calm" }
//! }
//! ```
//! Every object-valued entry besides the two header keys is an event. Field
//! names have short aliases and times may be strings, since files written by
//! older annotation front-ends are not consistent about either.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

const NICKNAME_KEY: &str = "nickname";
const VIDEO_URL_KEYS: [&str; 2] = ["videoURL", "videoUrl"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(alias = "start", deserialize_with = "lenient_seconds")]
    pub start_time: f64,
    #[serde(alias = "end", deserialize_with = "lenient_seconds")]
    pub end_time: f64,
    #[serde(alias = "emotion")]
    pub label: String,
}

/// An event entry that could not be read, keyed by its name in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEventError {
    pub key: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationFile {
    pub nickname: Option<String>,
    pub video_url: String,
    pub events: Vec<(String, RawEvent)>,
    pub unreadable: Vec<RawEventError>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("annotation file is not a JSON object")]
    NotAnObject,
    #[error("annotation file has no videoURL")]
    MissingVideoUrl,
}

pub fn parse_annotation(value: Value) -> Result<AnnotationFile, FormatError> {
    let Value::Object(map) = value else {
        return Err(FormatError::NotAnObject);
    };

    let nickname = string_field(&map, &[NICKNAME_KEY]);
    let video_url = string_field(&map, &VIDEO_URL_KEYS).ok_or(FormatError::MissingVideoUrl)?;

    let mut events = Vec::new();
    let mut unreadable = Vec::new();
    for (key, value) in map {
        if !value.is_object() {
            continue;
        }
        match RawEvent::deserialize(value) {
            Ok(event) => events.push((key, event)),
            Err(err) => unreadable.push(RawEventError {
                key,
                message: err.to_string(),
            }),
        }
    }

    Ok(AnnotationFile {
        nickname,
        video_url,
        events,
        unreadable,
    })
}

fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid time value '{text}'"))),
    }
}
