pub mod cli;
pub mod consensus;
pub mod cutting;
pub mod download;
pub mod error;
pub mod ingest;
pub mod models;
pub mod output;
pub mod settings;
mod utils;

use anyhow::{bail, Context, Result};

pub use cli::CliArgs;
pub use consensus::{build_consensus, ConsensusConfig};
pub use error::ConsensusError;
pub use models::{EventRecord, MergedFragment, VideoAnnotationSet, VideoConsensus};
pub use settings::Settings;

use cutting::{plan_cuts, run_cuts, FfmpegCutter};
use download::{plan_downloads, run_downloads, VideoDownloader};

/// Initialize logging (reads RUST_LOG env var). Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

/// Resolve settings from the settings file and `args`, validated.
pub fn resolve_settings(args: &CliArgs) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

/// Full run: ingest annotation files, build consensus, write it, then optionally
/// fetch missing source videos and cut them into fragments.
pub async fn run(args: CliArgs) -> Result<()> {
    init_logging();

    let settings = resolve_settings(&args)?;

    if let Some(path) = &args.save_config {
        settings.persist(path)?;
        log::info!("Settings written to {}", path.display());
        return Ok(());
    }

    log::info!(
        "Building consensus from {} (match labels: {}, max fragment size: {}s, threshold: {})",
        settings.input_dir.display(),
        settings.match_labels,
        settings.max_fragment_size,
        settings.acceptance_threshold
    );

    let report = ingest::ingest_dir(&settings.input_dir, args.strict)?;
    let results = build_consensus(&report.videos, &settings.consensus_config())?;

    let fragments: usize = results.iter().map(|video| video.fragments_count).sum();
    output::write_results(&settings.output_file, &results)?;
    log::info!(
        "Wrote {} fragments across {} videos to {}",
        fragments,
        results.len(),
        settings.output_file.display()
    );

    let mut failed_downloads = 0;
    if settings.download_missing {
        let plan = plan_downloads(&results, &settings.videos_dir);
        let downloader = VideoDownloader::new(&settings.downloader_path);
        let summary = run_downloads(&downloader, &plan).await;
        log::info!(
            "Downloaded {} of {} missing videos into {}",
            summary.succeeded,
            plan.len(),
            settings.videos_dir.display()
        );
        failed_downloads = summary.failed;
    }

    if !settings.cut_fragments {
        if failed_downloads > 0 {
            bail!("{failed_downloads} video downloads failed");
        }
        return Ok(());
    }

    let plan = plan_cuts(
        &results,
        &settings.videos_dir,
        &settings.fragments_dir,
        settings.cut_margin,
    );
    let cutter = FfmpegCutter::new(&settings.ffmpeg_path);
    let summary = run_cuts(&cutter, &plan).await;
    log::info!(
        "Cut {} of {} fragments into {}",
        summary.succeeded,
        plan.len(),
        settings.fragments_dir.display()
    );

    if summary.failed > 0 {
        bail!(
            "{} of {} fragment cuts failed ({} video downloads failed)",
            summary.failed,
            plan.len(),
            failed_downloads
        );
    }
    if failed_downloads > 0 {
        bail!("{failed_downloads} video downloads failed");
    }

    Ok(())
}
