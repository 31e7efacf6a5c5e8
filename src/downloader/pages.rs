//! Page fetching -- bounded-concurrency fan-out over a chapter's page files.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};

use crate::error::{PackagingError, PageFetchError};
use crate::models::AtHomeServer;
use crate::types::{DownloadOutcome, Event};
use crate::utils::{sanitize_file_name, url_file_name};

use super::context::ChapterContext;

/// Fetch every listed page into `scratch`, at most `max_concurrent_pages` at a time.
///
/// Returns once every fetch has settled, one outcome per page in completion order. A page
/// that could not be retrieved is recorded and the remaining pages carry on. A page that
/// could not be written to `scratch` fails the whole chapter, but only after every
/// in-flight fetch has settled.
pub(super) async fn fetch_pages(
    ctx: &ChapterContext<'_>,
    server: &AtHomeServer,
    scratch: &Path,
) -> Result<Vec<DownloadOutcome>, PackagingError> {
    let quality = ctx.config.quality;
    let files = server.page_files(quality);
    let total = files.len();
    let completed = AtomicUsize::new(0);
    let completed = &completed;
    let concurrency = ctx.config.max_concurrent_pages.max(1);

    tracing::debug!(
        chapter_id = ctx.chapter_id(),
        pages = total,
        concurrency,
        quality = quality.url_segment(),
        "fetching pages"
    );

    let results: Vec<Result<DownloadOutcome, PackagingError>> = stream::iter(files)
        .map(|file| {
            let url = server.page_url(quality, file);
            async move {
                let outcome = fetch_page(ctx, &url, file, scratch).await?;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;

                match &outcome {
                    DownloadOutcome::Fetched { file_name, .. } => {
                        ctx.emit(Event::PageFetched {
                            chapter_id: ctx.chapter_id().to_string(),
                            file_name: file_name.clone(),
                            completed: done,
                            total,
                        });
                    }
                    DownloadOutcome::Failed(error) => {
                        tracing::warn!(
                            chapter_id = ctx.chapter_id(),
                            file = %error.file_name,
                            error = %error.reason,
                            "page failed, leaving it out of the archive"
                        );
                        ctx.emit(Event::PageFailed {
                            chapter_id: ctx.chapter_id().to_string(),
                            file_name: error.file_name.clone(),
                            error: error.reason.clone(),
                        });
                    }
                }
                Ok::<_, PackagingError>(outcome)
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    results.into_iter().collect()
}

/// Fetch one page and store it in `scratch` under the last segment of its URL
///
/// A retrieval failure is a page outcome; a scratch write failure is an error.
async fn fetch_page(
    ctx: &ChapterContext<'_>,
    url: &str,
    listed_name: &str,
    scratch: &Path,
) -> Result<DownloadOutcome, PackagingError> {
    let file_name = url_file_name(url).unwrap_or_else(|| sanitize_file_name(listed_name));

    let bytes = match ctx.source.fetch_page(url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Ok(DownloadOutcome::Failed(PageFetchError {
                file_name,
                reason: e.to_string(),
            }));
        }
    };

    let size_bytes = bytes.len() as u64;
    let path = scratch.join(&file_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| PackagingError::File { path, source })?;

    tracing::trace!(chapter_id = ctx.chapter_id(), file = %file_name, size_bytes, "page stored");
    Ok(DownloadOutcome::Fetched {
        file_name,
        size_bytes,
    })
}
