//! Reading annotator files from disk into per-video annotation sets.

pub mod format;
pub mod video_code;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use crate::models::{EventRecord, VideoAnnotationSet};

pub use format::{parse_annotation, AnnotationFile, FormatError, RawEvent};
pub use video_code::video_code_from_url;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Everything read from an input directory.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Video sets in first-seen order, each sorted by start time.
    pub videos: Vec<VideoAnnotationSet>,
    pub files_read: usize,
    pub files_skipped: usize,
    pub events_accepted: usize,
    pub events_rejected: usize,
}

/// Groups events by video code while remembering the order codes first appeared.
#[derive(Debug, Default)]
struct VideoIndex {
    videos: Vec<VideoAnnotationSet>,
    positions: HashMap<String, usize>,
}

impl VideoIndex {
    fn entry(&mut self, video_code: &str) -> &mut VideoAnnotationSet {
        let position = match self.positions.get(video_code) {
            Some(&position) => position,
            None => {
                self.videos.push(VideoAnnotationSet::new(video_code));
                self.positions
                    .insert(video_code.to_string(), self.videos.len() - 1);
                self.videos.len() - 1
            }
        };
        &mut self.videos[position]
    }

    fn into_sorted(mut self) -> Vec<VideoAnnotationSet> {
        for video in &mut self.videos {
            video.sort_by_start();
        }
        self.videos
    }
}

/// Read every `*.json` file in `dir`, in file-name order.
///
/// Unparseable files are skipped with a warning. Event entries that are
/// unreadable or describe an invalid interval are rejected; with `strict` the
/// first rejection aborts ingestion instead.
pub fn ingest_dir(dir: &Path, strict: bool) -> Result<IngestReport> {
    let files = annotation_files(dir)?;
    let mut report = IngestReport::default();
    let mut index = VideoIndex::default();

    for path in files {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read annotation file {}", path.display()))?;

        let parsed = serde_json::from_str(&contents)
            .map_err(anyhow::Error::from)
            .and_then(|value| parse_annotation(value).map_err(anyhow::Error::from));
        let annotation = match parsed {
            Ok(annotation) => annotation,
            Err(err) if strict => {
                return Err(err.context(format!("Invalid annotation file {}", path.display())))
            }
            Err(err) => {
                log_warn!("skipping annotation file {}: {err}", path.display());
                report.files_skipped += 1;
                continue;
            }
        };

        let annotator = annotation
            .nickname
            .clone()
            .unwrap_or_else(|| file_stem(&path));
        let video_code = video_code_from_url(&annotation.video_url);
        let video = index.entry(&video_code);

        for unreadable in &annotation.unreadable {
            if strict {
                bail!(
                    "unreadable event '{}' in {}: {}",
                    unreadable.key,
                    path.display(),
                    unreadable.message
                );
            }
            log_warn!(
                "rejecting event '{}' in {}: {}",
                unreadable.key,
                path.display(),
                unreadable.message
            );
            report.events_rejected += 1;
        }

        for (key, raw) in annotation.events {
            match EventRecord::new(raw.start_time, raw.end_time, raw.label, annotator.as_str()) {
                Ok(event) => {
                    video.push(event);
                    report.events_accepted += 1;
                }
                Err(err) if strict => {
                    return Err(anyhow!(err)
                        .context(format!("Invalid event '{key}' in {}", path.display())));
                }
                Err(err) => {
                    log_warn!("rejecting event '{key}' in {}: {err}", path.display());
                    report.events_rejected += 1;
                }
            }
        }

        report.files_read += 1;
    }

    report.videos = index.into_sorted();

    log_info!(
        "ingested {} files ({} skipped): {} videos, {} events accepted, {} rejected",
        report.files_read,
        report.files_skipped,
        report.videos.len(),
        report.events_accepted,
        report.events_rejected
    );

    Ok(report)
}

fn annotation_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list annotation directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?
            .path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
