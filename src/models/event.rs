//! Event record data model.
//!
//! One annotator's claim that `label` applies to `[start_time, end_time)` on a
//! single video. Records are validated on construction and immutable after.

use serde::Serialize;

use crate::error::ConsensusError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    start_time: f64,
    end_time: f64,
    label: String,
    annotator_id: String,
}

impl EventRecord {
    pub fn new(
        start_time: f64,
        end_time: f64,
        label: impl Into<String>,
        annotator_id: impl Into<String>,
    ) -> Result<Self, ConsensusError> {
        if !start_time.is_finite() {
            return Err(ConsensusError::NonFiniteValue { field: "startTime" });
        }
        if !end_time.is_finite() {
            return Err(ConsensusError::NonFiniteValue { field: "endTime" });
        }
        if start_time < 0.0 {
            return Err(ConsensusError::NegativeStartTime(start_time));
        }
        if end_time <= start_time {
            return Err(ConsensusError::MalformedInterval {
                start_time,
                end_time,
            });
        }

        Ok(Self {
            start_time,
            end_time,
            label: label.into(),
            annotator_id: annotator_id.into(),
        })
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn annotator_id(&self) -> &str {
        &self.annotator_id
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Longer than `max_fragment_size`; such events never reach the merge loop.
    pub fn exceeds(&self, max_fragment_size: f64) -> bool {
        self.duration() > max_fragment_size
    }
}
