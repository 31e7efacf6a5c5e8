//! Chapter download -- image-server resolution, page fetching and archive packaging.
//!
//! Split into focused submodules:
//! - [`context`] - Page source trait, per-chapter state, scratch directory
//! - [`orchestration`] - Chapter lifecycle
//! - [`pages`] - Bounded-concurrency page fetching
//! - [`finalization`] - Failure policy and packaging

mod context;
mod finalization;
mod orchestration;
mod pages;


use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::DownloadConfig;
use crate::error::DownloadError;
use crate::types::{ChapterReport, Event};

pub use context::{ChapterRequest, PageSource};

use context::ChapterContext;
use orchestration::run_chapter;

/// Downloads chapters into `.cbz` archives
///
/// Cheap to clone; clones share the page source and event channel.
#[derive(Clone)]
pub struct ChapterDownloader {
    source: Arc<dyn PageSource>,
    config: Arc<DownloadConfig>,
    event_tx: broadcast::Sender<Event>,
}

impl std::fmt::Debug for ChapterDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChapterDownloader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChapterDownloader {
    /// Create a downloader fetching through `source` and reporting on `event_tx`
    pub fn new(
        source: Arc<dyn PageSource>,
        config: Arc<DownloadConfig>,
        event_tx: broadcast::Sender<Event>,
    ) -> Self {
        Self {
            source,
            config,
            event_tx,
        }
    }

    /// Download settings in use
    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Download one chapter to `{output_dir}/{display_name}.cbz`
    ///
    /// Individual page failures are reported in the returned [`ChapterReport`]. The chapter
    /// fails as a whole if the image server cannot be resolved, no page could be fetched,
    /// too many pages failed, or the archive cannot be written. No archive is left behind on
    /// failure, and the scratch directory is removed in every case.
    pub async fn download(&self, request: &ChapterRequest) -> Result<ChapterReport, DownloadError> {
        let ctx = ChapterContext {
            request,
            source: &self.source,
            config: &self.config,
            event_tx: &self.event_tx,
        };

        tracing::info!(
            chapter_id = %request.chapter_id,
            name = %request.display_name,
            "starting chapter download"
        );
        ctx.emit(Event::ChapterQueued {
            chapter_id: request.chapter_id.clone(),
            name: request.display_name.clone(),
        });

        match run_chapter(&ctx).await {
            Ok(report) => {
                tracing::info!(
                    chapter_id = %report.chapter_id,
                    archive = %report.archive.display(),
                    pages = report.pages_fetched,
                    failed = report.failed_count(),
                    "chapter archived"
                );
                ctx.emit(Event::ChapterComplete {
                    chapter_id: report.chapter_id.clone(),
                    path: report.archive.clone(),
                    pages_fetched: report.pages_fetched,
                    pages_failed: if report.failures.is_empty() {
                        None
                    } else {
                        Some(report.failed_count())
                    },
                });
                Ok(report)
            }
            Err(e) => {
                tracing::error!(
                    chapter_id = %request.chapter_id,
                    stage = %e.stage(),
                    error = %e,
                    "chapter download failed"
                );
                ctx.emit(Event::ChapterFailed {
                    chapter_id: request.chapter_id.clone(),
                    stage: e.stage(),
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}
