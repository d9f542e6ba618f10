pub mod event;
pub mod fragment;
pub mod video;

pub use event::EventRecord;
pub use fragment::{FragmentBuilder, MergedFragment};
pub use video::{VideoAnnotationSet, VideoConsensus};
