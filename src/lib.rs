//! # manga-dl
//!
//! Client library for a REST manga catalog: search titles, list chapters and download
//! chapters as `.cbz` archives.
//!
//! ## Design Philosophy
//!
//! manga-dl is designed to be:
//! - **Library-first** - No CLI or UI; selection of titles and chapters is left to the caller
//! - **Explicitly constructed** - One [`MangaClient`] per configuration, no global state
//! - **Event-driven** - Consumers subscribe to download events instead of parsing logs
//! - **Tolerant where it is safe** - Unknown tag names and single bad pages degrade the
//!   result instead of failing it
//!
//! ## Quick Start
//!
//! ```no_run
//! use manga_dl::{ChapterRange, Config, MangaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MangaClient::new(Config::default())?;
//!
//!     // Subscribe to events
//!     let mut events = client.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let titles = client
//!         .search_titles("Jujutsu Kaisen", ["Action"], Vec::<String>::new(), &[])
//!         .await?;
//!     let manga = &titles[0];
//!     let chapters = client.chapters(&manga.id, "en").await?;
//!
//!     for result in client
//!         .download_chapters(manga, ChapterRange::new(Some(1), Some(3)).apply(&chapters))
//!         .await
//!     {
//!         match result {
//!             Ok(report) => println!("{}", report.archive.display()),
//!             Err(e) => eprintln!("{e}"),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// CBZ archive packaging
pub mod archive;
/// Catalog client entry point
pub mod client;
/// Configuration types
pub mod config;
/// Chapter download (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Catalog records and wire mapping
pub mod models;
/// Paginated collection fetching
pub mod paginator;
/// Catalog query building
pub mod query;
/// Retry logic with exponential backoff
pub mod retry;
/// Tag name resolution
pub mod tags;
/// Shared HTTP transport
pub mod transport;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use client::MangaClient;
pub use config::{ApiConfig, Config, DownloadConfig, RetryConfig};
pub use downloader::{ChapterDownloader, ChapterRequest, PageSource};
pub use error::{ClientError, DownloadError, Error, PackagingError, PageFetchError, Result};
pub use models::{AtHomeServer, Chapter, ContentRating, Envelope, Manga, Record, Tag};
pub use query::{CatalogFilter, ChapterRange, TagSelection};
pub use types::{ChapterReport, ChapterStage, DownloadOutcome, Event, ImageQuality};
