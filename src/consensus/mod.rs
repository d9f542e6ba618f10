pub mod agreement;
pub mod builder;
pub mod config;
pub mod merge;

pub use agreement::{evaluate, Verdict};
pub use builder::{build_consensus, build_video_consensus};
pub use config::ConsensusConfig;
pub use merge::{merge_events, MergeOutcome, MergePolicy};
