use std::collections::HashSet;

use crate::consensus::config::ConsensusConfig;
use crate::consensus::merge::{merge_events, MergePolicy};
use crate::error::ConsensusError;
use crate::models::video::compare_start;
use crate::models::{EventRecord, VideoAnnotationSet, VideoConsensus};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Main consensus function: one [`VideoConsensus`] per input set, in input order.
///
/// The configuration is validated before any video is merged. The result is a
/// pure function of `videos` and `config`.
pub fn build_consensus(
    videos: &[VideoAnnotationSet],
    config: &ConsensusConfig,
) -> Result<Vec<VideoConsensus>, ConsensusError> {
    config.validate()?;

    Ok(videos
        .iter()
        .map(|video| build_video_consensus(video, config))
        .collect())
}

/// Consensus for a single video. Assumes `config` has already been validated.
pub fn build_video_consensus(video: &VideoAnnotationSet, config: &ConsensusConfig) -> VideoConsensus {
    // Edge case: video with no events at all
    if video.is_empty() {
        log_debug!("video {}: no events", video.video_code());
        return VideoConsensus::empty(video.video_code());
    }

    let mut retained = retained_events(video.events(), config);
    let total_annotators = count_annotators(&retained);

    // Edge case: nothing left to merge
    if total_annotators == 0 {
        log_debug!(
            "video {}: no annotators after filtering {} events",
            video.video_code(),
            video.len()
        );
        return VideoConsensus::empty(video.video_code());
    }

    retained.sort_by(compare_start);
    let outcome = merge_events(&retained, total_annotators, config);

    log_debug!(
        "video {}: {} policy, {} annotators, {} of {} events merged, {} fragments kept, {} discarded",
        video.video_code(),
        MergePolicy::from_config(config).as_str(),
        total_annotators,
        retained.len(),
        video.len(),
        outcome.fragments.len(),
        outcome.discarded
    );

    VideoConsensus::new(video.video_code(), outcome.fragments)
}

/// Events short enough to take part in merging.
pub fn retained_events(events: &[EventRecord], config: &ConsensusConfig) -> Vec<EventRecord> {
    events
        .iter()
        .filter(|event| !event.exceeds(config.max_fragment_size))
        .cloned()
        .collect()
}

/// Distinct annotators among `events`; the agreement denominator for both policies.
pub fn count_annotators(events: &[EventRecord]) -> usize {
    events
        .iter()
        .map(|event| event.annotator_id())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: f64, end: f64, label: &str, annotator: &str) -> EventRecord {
        EventRecord::new(start, end, label, annotator).unwrap()
    }

    #[test]
    fn invalid_config_fails_before_merging() {
        let config = ConsensusConfig {
            acceptance_threshold: -0.1,
            ..ConsensusConfig::default()
        };
        assert_eq!(
            build_consensus(&[], &config),
            Err(ConsensusError::ThresholdOutOfRange(-0.1))
        );
    }

    #[test]
    fn over_long_events_leave_the_denominator() {
        let config = ConsensusConfig {
            match_labels: false,
            max_fragment_size: 20.0,
            acceptance_threshold: 1.0,
        };
        // C only contributes an over-long event, so A and B alone make full agreement
        let video = VideoAnnotationSet::with_events(
            "vid",
            vec![
                event(0.0, 10.0, "happy", "A"),
                event(0.0, 60.0, "happy", "C"),
                event(2.0, 8.0, "sad", "B"),
            ],
        );
        let result = build_video_consensus(&video, &config);

        assert_eq!(result.fragments_count, 1);
        assert_eq!(result.annotations[0].annotators, vec!["A", "B"]);
        assert_eq!(result.annotations[0].end_time, 10.0);
    }

    #[test]
    fn all_events_filtered_gives_empty_video() {
        let config = ConsensusConfig {
            max_fragment_size: 5.0,
            ..ConsensusConfig::default()
        };
        let video = VideoAnnotationSet::with_events("vid", vec![event(0.0, 10.0, "happy", "A")]);
        let result = build_video_consensus(&video, &config);
        assert_eq!(result, VideoConsensus::empty("vid"));
    }

    #[test]
    fn unsorted_input_is_sorted_before_merge() {
        let config = ConsensusConfig {
            acceptance_threshold: 0.0,
            max_fragment_size: 100.0,
            match_labels: false,
        };
        let video = VideoAnnotationSet::with_events(
            "vid",
            vec![event(5.0, 15.0, "happy", "B"), event(0.0, 10.0, "happy", "A")],
        );
        let result = build_video_consensus(&video, &config);
        assert_eq!(result.fragments_count, 1);
        assert_eq!(result.annotations[0].start_time, 0.0);
        assert_eq!(result.annotations[0].end_time, 15.0);
    }

    #[test]
    fn preserves_video_order() {
        let videos = vec![
            VideoAnnotationSet::with_events("zeta", vec![event(0.0, 1.0, "x", "A")]),
            VideoAnnotationSet::new("alpha"),
        ];
        let results = build_consensus(&videos, &ConsensusConfig::default()).unwrap();
        let codes: Vec<&str> = results.iter().map(|r| r.video_code.as_str()).collect();
        assert_eq!(codes, vec!["zeta", "alpha"]);
    }
}
