//! Chapter finalization -- failure policy and archive packaging.

use std::path::Path;

use crate::archive::pack_async;
use crate::error::{DownloadError, PageFetchError};
use crate::types::{ChapterReport, DownloadOutcome, Event};

use super::context::ChapterContext;

/// Pages that made it and pages that did not
#[derive(Debug, Default)]
pub(super) struct PageTally {
    pub(super) fetched: usize,
    pub(super) failures: Vec<PageFetchError>,
}

impl PageTally {
    pub(super) fn from_outcomes(outcomes: Vec<DownloadOutcome>) -> Self {
        let mut tally = PageTally::default();
        for outcome in outcomes {
            match outcome {
                DownloadOutcome::Fetched { .. } => tally.fetched += 1,
                DownloadOutcome::Failed(error) => tally.failures.push(error),
            }
        }
        tally
            .failures
            .sort_by(|a, b| a.file_name.cmp(&b.file_name));
        tally
    }

    pub(super) fn total(&self) -> usize {
        self.fetched + self.failures.len()
    }
}

/// Decide whether the fetched pages are enough to archive the chapter.
///
/// No fetched page at all is always a failure. Otherwise the chapter fails only when the
/// share of failed pages is strictly greater than `max_failure_ratio`.
pub(super) fn check_failure_policy(
    chapter_id: &str,
    tally: &PageTally,
    max_failure_ratio: f64,
) -> Result<(), DownloadError> {
    let total = tally.total();
    let failed = tally.failures.len();

    if tally.fetched == 0 {
        return Err(DownloadError::NoPagesFetched {
            chapter_id: chapter_id.to_string(),
            total,
        });
    }

    if failed > 0 && (failed as f64 / total as f64) > max_failure_ratio {
        return Err(DownloadError::TooManyFailures {
            chapter_id: chapter_id.to_string(),
            failed,
            total,
        });
    }

    Ok(())
}

/// Apply the failure policy, then pack the scratch directory into the chapter archive.
pub(super) async fn finalize_chapter(
    ctx: &ChapterContext<'_>,
    tally: PageTally,
    scratch: &Path,
) -> Result<ChapterReport, DownloadError> {
    let chapter_id = ctx.chapter_id();

    if !tally.failures.is_empty() {
        tracing::warn!(
            chapter_id,
            failed = tally.failures.len(),
            fetched = tally.fetched,
            total = tally.total(),
            "chapter downloaded with some failures"
        );
    }
    check_failure_policy(chapter_id, &tally, ctx.config.max_failure_ratio)?;

    ctx.emit(Event::Packaging {
        chapter_id: chapter_id.to_string(),
        pages: tally.fetched,
    });

    let destination = ctx.config.output_dir.join(&ctx.request.display_name);
    let archive = pack_async(scratch.to_path_buf(), destination)
        .await
        .map_err(|source| DownloadError::Packaging {
            chapter_id: chapter_id.to_string(),
            source,
        })?;

    Ok(ChapterReport {
        chapter_id: chapter_id.to_string(),
        archive,
        pages_total: tally.total(),
        pages_fetched: tally.fetched,
        failures: tally.failures,
    })
}
