//! Chapter download orchestration -- top-level lifecycle for a single chapter.

use crate::error::{DownloadError, PackagingError};
use crate::types::{ChapterReport, Event};

use super::context::{ChapterContext, create_scratch};
use super::finalization::{PageTally, finalize_chapter};
use super::pages::fetch_pages;

/// Core chapter task -- drives one chapter through its stages.
///
/// Phases:
/// 1. Resolve the image server (fatal on any error)
/// 2. Fetch all pages into a private scratch directory under the concurrency cap (fatal if
///    a page cannot be written there)
/// 3. Apply the failure policy and pack the fetched pages
/// 4. Remove the scratch directory (also on every failure path)
pub(super) async fn run_chapter(ctx: &ChapterContext<'_>) -> Result<ChapterReport, DownloadError> {
    let chapter_id = ctx.chapter_id();

    // Phase 1: image server
    ctx.emit(Event::ResolvingServer {
        chapter_id: chapter_id.to_string(),
    });
    let server = ctx
        .source
        .image_server(chapter_id)
        .await
        .map_err(|source| DownloadError::ServerResolution {
            chapter_id: chapter_id.to_string(),
            source,
        })?;

    let total = server.page_files(ctx.config.quality).len();
    if total == 0 {
        return Err(DownloadError::EmptyChapter {
            chapter_id: chapter_id.to_string(),
        });
    }
    tracing::info!(chapter_id, pages = total, "image server resolved");

    // Phase 2: pages
    tokio::fs::create_dir_all(&ctx.config.output_dir)
        .await
        .map_err(|source| DownloadError::Packaging {
            chapter_id: chapter_id.to_string(),
            source: PackagingError::CreateDir {
                path: ctx.config.output_dir.clone(),
                source,
            },
        })?;
    let scratch = create_scratch(ctx.config.scratch_parent())
        .await
        .map_err(|source| DownloadError::Packaging {
            chapter_id: chapter_id.to_string(),
            source,
        })?;
    let result = match fetch_pages(ctx, &server, scratch.path()).await {
        // Phase 3: policy and archive
        Ok(outcomes) => {
            finalize_chapter(ctx, PageTally::from_outcomes(outcomes), scratch.path()).await
        }
        Err(source) => Err(DownloadError::Packaging {
            chapter_id: chapter_id.to_string(),
            source,
        }),
    };

    // Phase 4: scratch cleanup
    if let Err(e) = scratch.close() {
        tracing::warn!(chapter_id, error = %e, "failed to remove scratch directory");
    }

    result
}
