use std::path::{Path, PathBuf};

use crate::models::{MergedFragment, VideoConsensus};

pub const VIDEO_EXTENSION: &str = "mp4";

/// One fragment to cut out of a source video.
#[derive(Debug, Clone, PartialEq)]
pub struct CutInstruction {
    pub video_code: String,
    pub index: usize,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub start: f64,
    pub end: f64,
}

impl CutInstruction {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Fragment bounds padded by `margin` on both sides, clamped at zero.
pub fn cut_window(fragment: &MergedFragment, margin: f64) -> (f64, f64) {
    (
        (fragment.start_time - margin).max(0.0),
        fragment.end_time + margin,
    )
}

pub fn source_path(videos_dir: &Path, video_code: &str) -> PathBuf {
    videos_dir.join(format!("{video_code}.{VIDEO_EXTENSION}"))
}

pub fn fragment_path(fragments_dir: &Path, video_code: &str, index: usize) -> PathBuf {
    fragments_dir
        .join(video_code)
        .join(format!("{video_code}_{index:03}.{VIDEO_EXTENSION}"))
}

/// Map every emitted fragment to a cut, videos and fragments in result order.
pub fn plan_cuts(
    results: &[VideoConsensus],
    videos_dir: &Path,
    fragments_dir: &Path,
    margin: f64,
) -> Vec<CutInstruction> {
    results
        .iter()
        .flat_map(|video| {
            let source = source_path(videos_dir, &video.video_code);
            video
                .annotations
                .iter()
                .enumerate()
                .map(move |(index, fragment)| {
                    let (start, end) = cut_window(fragment, margin);
                    CutInstruction {
                        video_code: video.video_code.clone(),
                        index,
                        source: source.clone(),
                        destination: fragment_path(fragments_dir, &video.video_code, index),
                        start,
                        end,
                    }
                })
        })
        .collect()
}
