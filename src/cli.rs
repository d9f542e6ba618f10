use std::path::PathBuf;

use clap::Parser;

use crate::settings::Settings;

pub fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Debug, Default, Parser)]
#[command(
    name = "fragment-consensus",
    about = "Merge annotators' labeled intervals into consensus video fragments",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Settings file (JSON); defaults to ./config.json when present
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding one annotation JSON file per annotator session
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Where to write the consensus JSON
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory containing source videos named <video-code>.mp4
    #[arg(long = "videos-dir", value_name = "DIR")]
    pub videos_dir: Option<PathBuf>,

    /// Directory that receives cut fragments
    #[arg(long = "fragments-dir", value_name = "DIR")]
    pub fragments_dir: Option<PathBuf>,

    /// Only merge events that share a label
    #[arg(long = "match-labels", value_parser = clap::value_parser!(bool))]
    pub match_labels: Option<bool>,

    /// Events longer than this many seconds are ignored
    #[arg(long = "max-fragment-size", value_name = "SECS")]
    pub max_fragment_size: Option<f64>,

    /// Minimum fraction of annotators (0-1) a fragment needs to be kept
    #[arg(long = "acceptance-threshold", value_name = "RATIO")]
    pub acceptance_threshold: Option<f64>,

    /// Seconds of padding added around each cut fragment
    #[arg(long = "cut-margin", value_name = "SECS")]
    pub cut_margin: Option<f64>,

    /// Cut the source videos into consensus fragments with ffmpeg
    #[arg(long = "cut", value_parser = clap::value_parser!(bool))]
    pub cut_fragments: Option<bool>,

    /// ffmpeg binary to invoke
    #[arg(long = "ffmpeg", value_name = "PATH")]
    pub ffmpeg_path: Option<PathBuf>,

    /// Download source videos missing from the videos directory
    #[arg(long = "download-missing", value_parser = clap::value_parser!(bool))]
    pub download_missing: Option<bool>,

    /// Video downloader binary to invoke (yt-dlp compatible)
    #[arg(long = "downloader", value_name = "PATH")]
    pub downloader_path: Option<PathBuf>,

    /// Abort on the first unreadable file or invalid event instead of skipping it
    #[arg(long = "strict")]
    pub strict: bool,

    /// Write the effective settings to FILE and exit
    #[arg(long = "save-config", value_name = "FILE")]
    pub save_config: Option<PathBuf>,
}

impl CliArgs {
    /// Override `settings` with every value given on the command line.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.input_dir {
            settings.input_dir = dir.clone();
        }
        if let Some(path) = &self.output {
            settings.output_file = path.clone();
        }
        if let Some(dir) = &self.videos_dir {
            settings.videos_dir = dir.clone();
        }
        if let Some(dir) = &self.fragments_dir {
            settings.fragments_dir = dir.clone();
        }
        if let Some(value) = self.match_labels {
            settings.match_labels = value;
        }
        if let Some(value) = self.max_fragment_size {
            settings.max_fragment_size = value;
        }
        if let Some(value) = self.acceptance_threshold {
            settings.acceptance_threshold = value;
        }
        if let Some(value) = self.cut_margin {
            settings.cut_margin = value;
        }
        if let Some(value) = self.cut_fragments {
            settings.cut_fragments = value;
        }
        if let Some(path) = &self.ffmpeg_path {
            settings.ffmpeg_path = path.clone();
        }
        if let Some(value) = self.download_missing {
            settings.download_missing = value;
        }
        if let Some(path) = &self.downloader_path {
            settings.downloader_path = path.clone();
        }
    }
}
