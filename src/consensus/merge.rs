use std::collections::BTreeMap;

use crate::consensus::agreement::{evaluate, Verdict};
use crate::consensus::config::ConsensusConfig;
use crate::models::{EventRecord, FragmentBuilder, MergedFragment};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// How events are grouped into fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Merge purely on temporal overlap; a fragment collects every label it absorbs.
    AnyLabel,
    /// Track one open fragment per label; only same-label events merge.
    LabelMatched,
}

impl MergePolicy {
    pub fn from_config(config: &ConsensusConfig) -> Self {
        if config.match_labels {
            MergePolicy::LabelMatched
        } else {
            MergePolicy::AnyLabel
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MergePolicy::AnyLabel => "any-label",
            MergePolicy::LabelMatched => "label-matched",
        }
    }
}

/// Result of a merge pass: surviving fragments plus how many candidates were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub fragments: Vec<MergedFragment>,
    pub discarded: usize,
}

impl MergeOutcome {
    fn close(&mut self, fragment: FragmentBuilder, total_annotators: usize, config: &ConsensusConfig) {
        let (start, end) = (fragment.start_time(), fragment.end_time());
        match evaluate(fragment, total_annotators, config) {
            Verdict::Accept(merged) => self.fragments.push(merged),
            Verdict::Reject { agreement_ratio } => {
                log_debug!(
                    "discarding fragment [{start:.3}, {end:.3}) with agreement {agreement_ratio:.3} < {:.3}",
                    config.acceptance_threshold
                );
                self.discarded += 1;
            }
        }
    }
}

/// Merge time-sorted, pre-filtered events into candidate fragments and keep the
/// ones the agreement evaluator accepts. Output is ascending by start time.
pub fn merge_events(
    events: &[EventRecord],
    total_annotators: usize,
    config: &ConsensusConfig,
) -> MergeOutcome {
    match MergePolicy::from_config(config) {
        MergePolicy::AnyLabel => merge_any_label(events, total_annotators, config),
        MergePolicy::LabelMatched => merge_label_matched(events, total_annotators, config),
    }
}

/// Single open fragment; a gap closes it and the gap-opening event seeds the next.
pub fn merge_any_label(
    events: &[EventRecord],
    total_annotators: usize,
    config: &ConsensusConfig,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    let mut open: Option<FragmentBuilder> = None;

    for event in events {
        match &mut open {
            Some(fragment) if fragment.overlaps(event) => fragment.absorb(event),
            _ => {
                if let Some(fragment) = open.take() {
                    outcome.close(fragment, total_annotators, config);
                }
                open = Some(FragmentBuilder::seed(event));
            }
        }
    }

    if let Some(fragment) = open {
        outcome.close(fragment, total_annotators, config);
    }

    outcome
}

/// One open fragment per label. Labels are kept in a sorted map so fragments
/// sharing a start time come out in a stable order after the final sort.
pub fn merge_label_matched(
    events: &[EventRecord],
    total_annotators: usize,
    config: &ConsensusConfig,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    let mut open: BTreeMap<String, FragmentBuilder> = BTreeMap::new();

    for event in events {
        match open.get_mut(event.label()) {
            Some(fragment) if fragment.overlaps(event) => fragment.absorb(event),
            Some(fragment) => {
                let closed = std::mem::replace(fragment, FragmentBuilder::seed(event));
                outcome.close(closed, total_annotators, config);
            }
            None => {
                open.insert(event.label().to_string(), FragmentBuilder::seed(event));
            }
        }
    }

    for (_, fragment) in open {
        outcome.close(fragment, total_annotators, config);
    }

    outcome
        .fragments
        .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    outcome
}
