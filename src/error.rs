//! Error types for manga-dl
//!
//! This module provides the error taxonomy for the library:
//! - [`ClientError`] - the single kind surfaced by the HTTP transport
//! - [`DownloadError`] - chapter-level failures, tagged with the failing stage
//! - [`PageFetchError`] - per-page failures, recorded but never fatal
//! - [`PackagingError`] - scratch and archive I/O failures
//!
//! Display messages carry the operation and its target identifier only; the
//! underlying transport cause is reachable through [`std::error::Error::source`].

use std::path::PathBuf;
use thiserror::Error;

use crate::types::ChapterStage;

/// Result type alias for manga-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for manga-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "api.base_url")
        key: Option<String>,
    },

    /// Catalog API request failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Chapter download failed
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Archive packaging failed outside of a chapter download
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Errors surfaced by the HTTP transport.
///
/// Every variant names the `operation` that was attempted (e.g. "list manga")
/// and the `target` it was attempted against (an endpoint path or image URL).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection-level failure that persisted through the retry budget
    #[error("{operation} failed for {target}: could not reach the server")]
    Transport {
        /// Operation being performed
        operation: String,
        /// Endpoint or URL being requested
        target: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success HTTP status
    #[error("{operation} failed for {target}: HTTP {status}")]
    Status {
        /// Operation being performed
        operation: String,
        /// Endpoint or URL being requested
        target: String,
        /// HTTP status code returned by the server
        status: u16,
        /// Underlying error produced from the status
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded into the expected record
    #[error("{operation} returned an unexpected response for {target}")]
    Decode {
        /// Operation being performed
        operation: String,
        /// Endpoint or URL being requested
        target: String,
        /// Underlying decoding error
        #[source]
        source: serde_json::Error,
    },

    /// A request URL could not be built
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL (or URL fragment) that failed to parse
        url: String,
        /// Why it failed
        reason: String,
    },
}

impl ClientError {
    /// HTTP status code, if the server answered with an error status
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error is connection-level (as opposed to an HTTP status)
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }
}

/// Chapter-level download failures.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Image-server resolution failed; nothing was downloaded
    #[error("chapter {chapter_id}: could not resolve image server ({source})")]
    ServerResolution {
        /// Chapter being downloaded
        chapter_id: String,
        /// The client error from the image-server endpoint
        #[source]
        source: ClientError,
    },

    /// The image server listed no page files for the chapter
    #[error("chapter {chapter_id} has no page files")]
    EmptyChapter {
        /// Chapter being downloaded
        chapter_id: String,
    },

    /// Every page fetch failed
    #[error("chapter {chapter_id}: all {total} pages failed to download")]
    NoPagesFetched {
        /// Chapter being downloaded
        chapter_id: String,
        /// Number of page files attempted
        total: usize,
    },

    /// More pages failed than the configured failure ratio allows
    #[error("chapter {chapter_id}: {failed} of {total} pages failed to download")]
    TooManyFailures {
        /// Chapter being downloaded
        chapter_id: String,
        /// Pages that failed
        failed: usize,
        /// Pages attempted
        total: usize,
    },

    /// Scratch handling or archive packaging failed
    #[error("chapter {chapter_id}: {source}")]
    Packaging {
        /// Chapter being downloaded
        chapter_id: String,
        /// The packaging failure
        #[source]
        source: PackagingError,
    },
}

impl DownloadError {
    /// The stage of the chapter state machine in which this failure occurred
    pub fn stage(&self) -> ChapterStage {
        match self {
            DownloadError::ServerResolution { .. } => ChapterStage::ResolvingServer,
            DownloadError::EmptyChapter { .. }
            | DownloadError::NoPagesFetched { .. }
            | DownloadError::TooManyFailures { .. } => ChapterStage::Downloading,
            DownloadError::Packaging { .. } => ChapterStage::Packaging,
        }
    }

    /// Chapter the failure belongs to
    pub fn chapter_id(&self) -> &str {
        match self {
            DownloadError::ServerResolution { chapter_id, .. }
            | DownloadError::EmptyChapter { chapter_id }
            | DownloadError::NoPagesFetched { chapter_id, .. }
            | DownloadError::TooManyFailures { chapter_id, .. }
            | DownloadError::Packaging { chapter_id, .. } => chapter_id,
        }
    }
}

/// Failure to retrieve one page image.
///
/// Recorded in the chapter report and excluded from the archive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("page {file_name}: {reason}")]
pub struct PageFetchError {
    /// Server-side file name of the page
    pub file_name: String,
    /// Human-readable failure reason
    pub reason: String,
}

/// Filesystem failures while writing scratch files or finalizing the archive.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// Failed to create a directory
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write or read a file
    #[error("failed to access {path}: {source}")]
    File {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The zip writer failed
    #[error("failed to write archive {path}: {source}")]
    Archive {
        /// Archive being written
        path: PathBuf,
        /// Underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// Renaming the finished archive into place failed
    #[error("failed to finalize archive at {path}: {source}")]
    Finalize {
        /// Destination path of the archive
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The destination path has no file name to attach the extension to
    #[error("invalid archive destination {path}")]
    InvalidDestination {
        /// The offending destination
        path: PathBuf,
    },

    /// The blocking packaging task panicked or was cancelled
    #[error("packaging task failed: {0}")]
    Task(String),
}
