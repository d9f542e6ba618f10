use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::consensus::ConsensusConfig;
use crate::error::ConsensusError;

pub const DEFAULT_SETTINGS_FILE: &str = "config.json";

/// Run settings, read from a JSON file and then overridden from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub videos_dir: PathBuf,
    pub fragments_dir: PathBuf,
    pub match_labels: bool,
    pub max_fragment_size: f64,
    pub acceptance_threshold: f64,
    /// Seconds added on both sides of a fragment when cutting
    pub cut_margin: f64,
    pub cut_fragments: bool,
    pub ffmpeg_path: PathBuf,
    /// Fetch source videos missing from `videos_dir` before cutting
    pub download_missing: bool,
    pub downloader_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let consensus = ConsensusConfig::default();
        Self {
            input_dir: PathBuf::from("annotations"),
            output_file: PathBuf::from("consensus.json"),
            videos_dir: PathBuf::from("videos"),
            fragments_dir: PathBuf::from("fragments"),
            match_labels: consensus.match_labels,
            max_fragment_size: consensus.max_fragment_size,
            acceptance_threshold: consensus.acceptance_threshold,
            cut_margin: 0.0,
            cut_fragments: false,
            ffmpeg_path: PathBuf::from("ffmpeg"),
            download_missing: false,
            downloader_path: PathBuf::from("yt-dlp"),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from [`DEFAULT_SETTINGS_FILE`] when no path is given.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
        };

        if !path.exists() {
            if explicit {
                bail!("Settings file {} does not exist", path.display());
            }
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    pub fn consensus_config(&self) -> ConsensusConfig {
        ConsensusConfig {
            match_labels: self.match_labels,
            max_fragment_size: self.max_fragment_size,
            acceptance_threshold: self.acceptance_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), ConsensusError> {
        self.consensus_config().validate()?;
        if !self.cut_margin.is_finite() {
            return Err(ConsensusError::NonFiniteValue { field: "cutMargin" });
        }
        if self.cut_margin < 0.0 {
            return Err(ConsensusError::NegativeCutMargin(self.cut_margin));
        }
        Ok(())
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}
