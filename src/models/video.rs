//! Per-video annotation and consensus models.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{EventRecord, MergedFragment};

/// Every event recorded for one video, across all annotators.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAnnotationSet {
    video_code: String,
    events: Vec<EventRecord>,
}

impl VideoAnnotationSet {
    pub fn new(video_code: impl Into<String>) -> Self {
        Self {
            video_code: video_code.into(),
            events: Vec::new(),
        }
    }

    pub fn with_events(video_code: impl Into<String>, events: Vec<EventRecord>) -> Self {
        Self {
            video_code: video_code.into(),
            events,
        }
    }

    pub fn video_code(&self) -> &str {
        &self.video_code
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: EventRecord) {
        self.events.push(event);
    }

    /// Stable ascending sort on start time; ties keep insertion order.
    pub fn sort_by_start(&mut self) {
        self.events.sort_by(compare_start);
    }
}

pub(crate) fn compare_start(a: &EventRecord, b: &EventRecord) -> Ordering {
    a.start_time().total_cmp(&b.start_time())
}

/// Consensus fragments emitted for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConsensus {
    pub video_code: String,
    pub fragments_count: usize,
    pub annotations: Vec<MergedFragment>,
}

impl VideoConsensus {
    pub fn new(video_code: impl Into<String>, annotations: Vec<MergedFragment>) -> Self {
        Self {
            video_code: video_code.into(),
            fragments_count: annotations.len(),
            annotations,
        }
    }

    pub fn empty(video_code: impl Into<String>) -> Self {
        Self::new(video_code, Vec::new())
    }
}
