use crate::consensus::config::ConsensusConfig;
use crate::models::{FragmentBuilder, MergedFragment};

/// Outcome of evaluating a closing fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accept(MergedFragment),
    Reject { agreement_ratio: f64 },
}

/// Fraction of the video's annotators that contributed to `fragment`.
pub fn agreement_ratio(fragment: &FragmentBuilder, total_annotators: usize) -> f64 {
    if total_annotators == 0 {
        return 0.0;
    }
    fragment.annotator_count() as f64 / total_annotators as f64
}

/// Accept iff the agreement ratio reaches the threshold. Accepted fragments are
/// finalized with their ratio recorded; rejected ones are dropped here.
pub fn evaluate(
    fragment: FragmentBuilder,
    total_annotators: usize,
    config: &ConsensusConfig,
) -> Verdict {
    let ratio = agreement_ratio(&fragment, total_annotators);
    if total_annotators > 0 && ratio >= config.acceptance_threshold {
        Verdict::Accept(fragment.finalize(Some(ratio)))
    } else {
        Verdict::Reject {
            agreement_ratio: ratio,
        }
    }
}
