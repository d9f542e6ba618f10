//! Cutting fragments out of source videos with the external `ffmpeg` binary.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::cutting::plan::CutInstruction;

#[derive(Debug, thiserror::Error)]
pub enum CutError {
    #[error("ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("source video not found: {0}")]
    VideoNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct FfmpegCutter {
    binary: PathBuf,
}

impl Default for FfmpegCutter {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegCutter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments for a stream-copy cut of `instruction`.
    pub fn command_args(instruction: &CutInstruction) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-y", "-loglevel", "error", "-ss"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(format!("{:.3}", instruction.start).into());
        args.push("-i".into());
        args.push(instruction.source.clone().into_os_string());
        args.push("-t".into());
        args.push(format!("{:.3}", instruction.duration()).into());
        args.push("-c".into());
        args.push("copy".into());
        args.push(instruction.destination.clone().into_os_string());
        args
    }

    pub async fn cut(&self, instruction: &CutInstruction) -> Result<(), CutError> {
        if !instruction.source.exists() {
            return Err(CutError::VideoNotFound(
                instruction.source.to_string_lossy().to_string(),
            ));
        }

        if let Some(parent) = instruction.destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let output = tokio::process::Command::new(&self.binary)
            .args(Self::command_args(instruction))
            .output()
            .await
            .map_err(CutError::NotFound)?;

        if !output.status.success() {
            return Err(CutError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(())
    }
}
