pub mod ffmpeg;
pub mod plan;

pub use ffmpeg::{CutError, FfmpegCutter};
pub use plan::{cut_window, plan_cuts, CutInstruction};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CutSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Run every cut in order. A failed cut is logged and does not stop the rest.
pub async fn run_cuts(cutter: &FfmpegCutter, plan: &[CutInstruction]) -> CutSummary {
    let mut summary = CutSummary::default();

    for instruction in plan {
        log_info!(
            "cutting {} fragment {} [{:.3}, {:.3}] -> {}",
            instruction.video_code,
            instruction.index,
            instruction.start,
            instruction.end,
            instruction.destination.display()
        );
        match cutter.cut(instruction).await {
            Ok(()) => summary.succeeded += 1,
            Err(err) => {
                log_error!(
                    "failed to cut {} fragment {}: {err}",
                    instruction.video_code,
                    instruction.index
                );
                summary.failed += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test(flavor = "current_thread")]
    async fn failures_do_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let plan: Vec<CutInstruction> = (0..2)
            .map(|index| CutInstruction {
                video_code: "missing".into(),
                index,
                source: dir.path().join("missing.mp4"),
                destination: PathBuf::from("unused.mp4"),
                start: 0.0,
                end: 1.0,
            })
            .collect();

        let summary = run_cuts(&FfmpegCutter::default(), &plan).await;
        assert_eq!(
            summary,
            CutSummary {
                succeeded: 0,
                failed: 2
            }
        );
    }
}
