//! Core types and events

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::PageFetchError;

/// Image quality variant served by the image server
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageQuality {
    /// Original quality pages
    #[default]
    Data,
    /// Re-compressed, reduced quality pages
    DataSaver,
}

impl ImageQuality {
    /// Path segment of this variant in an image URL
    pub fn url_segment(self) -> &'static str {
        match self {
            ImageQuality::Data => "data",
            ImageQuality::DataSaver => "data-saver",
        }
    }
}

/// Stages of a single chapter download
///
/// `ResolvingServer -> Downloading -> Packaging -> Done`; any stage may end in a failure,
/// which is reported together with the stage it happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterStage {
    /// Fetching image-server info for the chapter
    ResolvingServer,
    /// Fetching page images
    Downloading,
    /// Writing the archive
    Packaging,
    /// Archive finalized
    Done,
}

impl std::fmt::Display for ChapterStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChapterStage::ResolvingServer => "resolving server",
            ChapterStage::Downloading => "downloading",
            ChapterStage::Packaging => "packaging",
            ChapterStage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Per-page result of a chapter download
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Page fetched and written to the scratch directory
    Fetched {
        /// Server-side file name
        file_name: String,
        /// Number of bytes written
        size_bytes: u64,
    },
    /// Page could not be fetched or stored
    Failed(PageFetchError),
}

impl DownloadOutcome {
    /// Whether the page made it into the scratch directory
    pub fn is_fetched(&self) -> bool {
        matches!(self, DownloadOutcome::Fetched { .. })
    }
}

/// Summary of a successfully archived chapter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterReport {
    /// Chapter identifier
    pub chapter_id: String,
    /// Final archive path
    pub archive: PathBuf,
    /// Number of page files listed by the image server
    pub pages_total: usize,
    /// Number of pages written into the archive
    pub pages_fetched: usize,
    /// Pages left out of the archive
    pub failures: Vec<PageFetchError>,
}

impl ChapterReport {
    /// Number of pages that failed to download
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

/// Progress events emitted by the client
///
/// Subscribe via [`MangaClient::subscribe`](crate::MangaClient::subscribe). The library itself
/// never prints; rendering progress is left to the subscriber.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A chapter download started
    ChapterQueued {
        /// Chapter ID
        chapter_id: String,
        /// Display name used for the archive
        name: String,
    },

    /// Image-server info is being requested
    ResolvingServer {
        /// Chapter ID
        chapter_id: String,
    },

    /// One page image was stored
    PageFetched {
        /// Chapter ID
        chapter_id: String,
        /// Server-side file name
        file_name: String,
        /// Pages completed so far (fetched or failed)
        completed: usize,
        /// Total pages in the chapter
        total: usize,
    },

    /// One page image failed
    PageFailed {
        /// Chapter ID
        chapter_id: String,
        /// Server-side file name
        file_name: String,
        /// Failure reason
        error: String,
    },

    /// All page fetches settled; the archive is being written
    Packaging {
        /// Chapter ID
        chapter_id: String,
        /// Pages going into the archive
        pages: usize,
    },

    /// Archive finalized
    ChapterComplete {
        /// Chapter ID
        chapter_id: String,
        /// Final archive path
        path: PathBuf,
        /// Pages in the archive
        pages_fetched: usize,
        /// Pages left out
        #[serde(skip_serializing_if = "Option::is_none")]
        pages_failed: Option<usize>,
    },

    /// Chapter download failed
    ChapterFailed {
        /// Chapter ID
        chapter_id: String,
        /// Stage the failure happened in
        stage: ChapterStage,
        /// Error message
        error: String,
    },
}
