//! Chapter download context -- page source trait, shared per-chapter state, scratch directory.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::broadcast;

use crate::config::DownloadConfig;
use crate::error::{ClientError, PackagingError};
use crate::models::AtHomeServer;
use crate::query::at_home_endpoint;
use crate::transport::Transport;
use crate::types::Event;

/// Prefix of per-chapter scratch directories
const SCRATCH_PREFIX: &str = ".manga-dl-";

/// Abstraction over the image-server endpoint and page fetching, enabling testability.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Resolve the image server holding a chapter's pages
    async fn image_server(&self, chapter_id: &str) -> Result<AtHomeServer, ClientError>;

    /// Fetch the bytes of one page image
    async fn fetch_page(&self, url: &str) -> Result<Vec<u8>, ClientError>;
}

#[async_trait::async_trait]
impl PageSource for Transport {
    async fn image_server(&self, chapter_id: &str) -> Result<AtHomeServer, ClientError> {
        self.get_json("resolve image server", &at_home_endpoint(chapter_id), &[])
            .await
    }

    async fn fetch_page(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let parsed = url::Url::parse(url).map_err(|e| ClientError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let response = self.get("fetch page", &parsed, &[]).await?;
        Ok(response.body)
    }
}

/// What to download and what to call the result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterRequest {
    /// Chapter id
    pub chapter_id: String,
    /// Archive file name without extension
    pub display_name: String,
}

impl ChapterRequest {
    /// Request a chapter archived as `{output_dir}/{display_name}.cbz`
    pub fn new(chapter_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Shared context for a single chapter download, reducing parameter passing between helpers.
pub(super) struct ChapterContext<'a> {
    pub(super) request: &'a ChapterRequest,
    pub(super) source: &'a Arc<dyn PageSource>,
    pub(super) config: &'a DownloadConfig,
    pub(super) event_tx: &'a broadcast::Sender<Event>,
}

impl ChapterContext<'_> {
    pub(super) fn chapter_id(&self) -> &str {
        &self.request.chapter_id
    }

    /// Emit an event; having no subscribers is fine
    pub(super) fn emit(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}

/// Create a private scratch directory for one chapter
///
/// The directory and everything in it is removed when the returned handle is dropped, on
/// success and failure alike.
pub(super) async fn create_scratch(parent: &Path) -> Result<TempDir, PackagingError> {
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| PackagingError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;

    tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(parent)
        .map_err(|source| PackagingError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })
}
