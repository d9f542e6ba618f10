use thiserror::Error;

/// Validation failures raised by the consensus core.
///
/// Every variant is detected before a merge starts: event records are checked
/// when they are constructed and the configuration is checked on entry to
/// [`crate::consensus::build_consensus`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsensusError {
    #[error("malformed interval: end time {end_time}s is not after start time {start_time}s")]
    MalformedInterval { start_time: f64, end_time: f64 },

    #[error("start time {0}s is negative")]
    NegativeStartTime(f64),

    #[error("{field} must be a finite number")]
    NonFiniteValue { field: &'static str },

    #[error("acceptance threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),

    #[error("max fragment size {0}s is negative")]
    NegativeMaxFragmentSize(f64),

    #[error("cut margin {0}s is negative")]
    NegativeCutMargin(f64),
}
