use crate::error::ConsensusError;

/// Configuration for the consensus algorithm, passed by reference into every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusConfig {
    /// Merge only events sharing a label (label-matched policy) instead of any overlap
    pub match_labels: bool,

    /// Events longer than this (seconds) are treated as noise and never merged
    pub max_fragment_size: f64,

    /// Minimum fraction of a video's annotators a fragment needs to be kept, inclusive
    pub acceptance_threshold: f64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            match_labels: false,
            max_fragment_size: 30.0,
            acceptance_threshold: 0.5,
        }
    }
}

impl ConsensusConfig {
    pub fn validate(&self) -> Result<(), ConsensusError> {
        if !self.acceptance_threshold.is_finite() {
            return Err(ConsensusError::NonFiniteValue {
                field: "acceptanceThreshold",
            });
        }
        if !(0.0..=1.0).contains(&self.acceptance_threshold) {
            return Err(ConsensusError::ThresholdOutOfRange(
                self.acceptance_threshold,
            ));
        }
        // NaN is rejected here; +inf means "never exclude" and is allowed
        if self.max_fragment_size.is_nan() {
            return Err(ConsensusError::NonFiniteValue {
                field: "maxFragmentSize",
            });
        }
        if self.max_fragment_size < 0.0 {
            return Err(ConsensusError::NegativeMaxFragmentSize(
                self.max_fragment_size,
            ));
        }
        Ok(())
    }
}
