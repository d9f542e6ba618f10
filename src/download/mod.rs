//! Fetching source videos that are not yet in the videos directory.
//!
//! Downloads go through an external `yt-dlp` binary, one progressive mp4 per
//! video code, written to the same `<videos>/<code>.mp4` path the cutter reads.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::cutting::plan::source_path;
use crate::models::VideoConsensus;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

const VIDEO_HOST: &str = "https://youtu.be";

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("downloader binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("downloader execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("downloader finished but {0} was not written")]
    MissingOutput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One video to fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadInstruction {
    pub video_code: String,
    pub url: String,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub succeeded: usize,
    pub failed: usize,
}

pub fn video_url(video_code: &str) -> String {
    format!("{VIDEO_HOST}/{video_code}")
}

/// Videos that have at least one fragment but no source file in `videos_dir`.
pub fn plan_downloads(results: &[VideoConsensus], videos_dir: &Path) -> Vec<DownloadInstruction> {
    results
        .iter()
        .filter(|video| video.fragments_count > 0)
        .map(|video| DownloadInstruction {
            video_code: video.video_code.clone(),
            url: video_url(&video.video_code),
            destination: source_path(videos_dir, &video.video_code),
        })
        .filter(|instruction| !instruction.destination.exists())
        .collect()
}

#[derive(Debug, Clone)]
pub struct VideoDownloader {
    binary: PathBuf,
}

impl Default for VideoDownloader {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl VideoDownloader {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Best single-file mp4 (audio and video muxed), written to the destination.
    pub fn command_args(instruction: &DownloadInstruction) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["--quiet", "--no-playlist", "-f", "b[ext=mp4]", "-o"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(instruction.destination.clone().into_os_string());
        args.push(instruction.url.clone().into());
        args
    }

    pub async fn download(&self, instruction: &DownloadInstruction) -> Result<(), DownloadError> {
        if let Some(parent) = instruction.destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let output = tokio::process::Command::new(&self.binary)
            .args(Self::command_args(instruction))
            .output()
            .await
            .map_err(DownloadError::NotFound)?;

        if !output.status.success() {
            return Err(DownloadError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        if !instruction.destination.exists() {
            return Err(DownloadError::MissingOutput(
                instruction.destination.to_string_lossy().to_string(),
            ));
        }

        Ok(())
    }
}

/// Fetch every planned video in order. A failed download is logged and skipped.
pub async fn run_downloads(
    downloader: &VideoDownloader,
    plan: &[DownloadInstruction],
) -> DownloadSummary {
    let mut summary = DownloadSummary::default();

    for instruction in plan {
        log_info!(
            "downloading {} -> {}",
            instruction.url,
            instruction.destination.display()
        );
        match downloader.download(instruction).await {
            Ok(()) => summary.succeeded += 1,
            Err(err) => {
                log_error!("failed to download {}: {err}", instruction.video_code);
                summary.failed += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MergedFragment;

    fn fragment() -> MergedFragment {
        MergedFragment {
            start_time: 0.0,
            end_time: 1.0,
            labels: vec!["happy".into()],
            annotators_count: 1,
            annotators: vec!["A".into()],
            agreement_ratio: None,
        }
    }

    fn instruction(dir: &Path) -> DownloadInstruction {
        DownloadInstruction {
            video_code: "abc".into(),
            url: video_url("abc"),
            destination: dir.join("videos").join("abc.mp4"),
        }
    }

    #[test]
    fn plans_only_missing_videos_with_fragments() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("have.mp4"), b"").unwrap();
        let results = vec![
            VideoConsensus::new("have", vec![fragment()]),
            VideoConsensus::empty("nothing-kept"),
            VideoConsensus::new("need", vec![fragment()]),
        ];

        let plan = plan_downloads(&results, dir.path());
        assert_eq!(
            plan,
            vec![DownloadInstruction {
                video_code: "need".into(),
                url: "https://youtu.be/need".into(),
                destination: dir.path().join("need.mp4"),
            }]
        );
    }

    #[test]
    fn builds_downloader_arguments() {
        let args: Vec<String> = VideoDownloader::command_args(&instruction(Path::new("media")))
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        let position = |flag: &str| args.iter().position(|a| a == flag).unwrap();
        assert!(args[position("-o") + 1].ends_with("abc.mp4"));
        assert_eq!(args.last().unwrap(), "https://youtu.be/abc");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn missing_binary_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let download = instruction(dir.path());

        let err = VideoDownloader::new(dir.path().join("no-such-downloader"))
            .download(&download)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::NotFound(_)));
        assert!(download.destination.parent().unwrap().is_dir());
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "current_thread")]
    async fn non_zero_exit_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = VideoDownloader::new("false")
            .download(&instruction(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DownloadError::ExecutionFailed {
                exit_code: Some(1),
                ..
            }
        ));
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "current_thread")]
    async fn success_without_output_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = VideoDownloader::new("true")
            .download(&instruction(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::MissingOutput(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failures_do_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let plan = vec![instruction(dir.path()), instruction(dir.path())];

        let summary = run_downloads(
            &VideoDownloader::new(dir.path().join("no-such-downloader")),
            &plan,
        )
        .await;
        assert_eq!(
            summary,
            DownloadSummary {
                succeeded: 0,
                failed: 2
            }
        );
    }
}
