//! Merged fragment data models.
//!
//! A fragment is built in two phases: [`FragmentBuilder`] owns the growable
//! label and annotator sets while events are being absorbed, and
//! [`FragmentBuilder::finalize`] freezes it into an immutable [`MergedFragment`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::EventRecord;

/// A candidate interval that is still open and may absorb more events.
#[derive(Debug, Clone)]
pub struct FragmentBuilder {
    start_time: f64,
    end_time: f64,
    labels: BTreeSet<String>,
    annotators: BTreeSet<String>,
}

impl FragmentBuilder {
    /// Open a new fragment covering exactly `event`.
    pub fn seed(event: &EventRecord) -> Self {
        let mut builder = Self {
            start_time: event.start_time(),
            end_time: event.end_time(),
            labels: BTreeSet::new(),
            annotators: BTreeSet::new(),
        };
        builder.labels.insert(event.label().to_string());
        builder.annotators.insert(event.annotator_id().to_string());
        builder
    }

    /// Strict overlap: a fragment ending exactly where `event` starts does not overlap.
    pub fn overlaps(&self, event: &EventRecord) -> bool {
        self.end_time > event.start_time()
    }

    pub fn absorb(&mut self, event: &EventRecord) {
        // end only grows; events arrive sorted so start never moves
        self.end_time = self.end_time.max(event.end_time());
        self.labels.insert(event.label().to_string());
        self.annotators.insert(event.annotator_id().to_string());
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    pub fn annotators(&self) -> &BTreeSet<String> {
        &self.annotators
    }

    pub fn annotator_count(&self) -> usize {
        self.annotators.len()
    }

    pub fn finalize(self, agreement_ratio: Option<f64>) -> MergedFragment {
        let annotators: Vec<String> = self.annotators.into_iter().collect();
        MergedFragment {
            start_time: self.start_time,
            end_time: self.end_time,
            labels: self.labels.into_iter().collect(),
            annotators_count: annotators.len(),
            annotators,
            agreement_ratio,
        }
    }
}

/// An accepted consensus interval, ready to be written out or cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedFragment {
    pub start_time: f64,
    pub end_time: f64,
    pub labels: Vec<String>,
    pub annotators_count: usize,
    pub annotators: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement_ratio: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: f64, end: f64, label: &str, annotator: &str) -> EventRecord {
        EventRecord::new(start, end, label, annotator).unwrap()
    }

    #[test]
    fn absorb_never_shrinks_end() {
        let mut builder = FragmentBuilder::seed(&event(0.0, 20.0, "happy", "A"));
        builder.absorb(&event(5.0, 10.0, "sad", "B"));
        assert_eq!(builder.end_time(), 20.0);
        builder.absorb(&event(15.0, 25.0, "happy", "C"));
        assert_eq!(builder.end_time(), 25.0);
        assert_eq!(builder.start_time(), 0.0);
    }

    #[test]
    fn overlap_is_strict() {
        let builder = FragmentBuilder::seed(&event(0.0, 10.0, "happy", "A"));
        assert!(!builder.overlaps(&event(10.0, 12.0, "happy", "B")));
        assert!(builder.overlaps(&event(9.99, 12.0, "happy", "B")));
    }

    #[test]
    fn finalize_counts_distinct_annotators() {
        let mut builder = FragmentBuilder::seed(&event(0.0, 10.0, "happy", "A"));
        builder.absorb(&event(2.0, 8.0, "happy", "A"));
        builder.absorb(&event(3.0, 12.0, "calm", "B"));

        let fragment = builder.finalize(Some(1.0));
        assert_eq!(fragment.annotators_count, 2);
        assert_eq!(fragment.annotators, vec!["A", "B"]);
        assert_eq!(fragment.labels, vec!["calm", "happy"]);
        assert_eq!((fragment.start_time, fragment.end_time), (0.0, 12.0));
    }
}
