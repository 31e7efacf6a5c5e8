//! Basic download example
//!
//! This example demonstrates the core functionality of manga-dl:
//! - Creating a client instance
//! - Subscribing to events
//! - Searching the catalog and picking a title
//! - Downloading a range of chapters as `.cbz` archives
//!
//! Usage:
//!
//! ```bash
//! cargo run --example basic_download -- "Jujutsu Kaisen" 1 1 3
//! ```
//!
//! Arguments are the title to search for, the 1-based index of the title to pick and an
//! optional 1-based inclusive chapter range. Set `RUST_LOG=manga_dl=debug` for request logs.

use manga_dl::config::{Config, DownloadConfig};
use manga_dl::{ChapterRange, Event, MangaClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("manga_dl=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let title = args.next().unwrap_or_else(|| "Jujutsu Kaisen".to_string());
    let pick: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let from = args.next().and_then(|a| a.parse().ok());
    let to = args.next().and_then(|a| a.parse().ok());

    // Build configuration
    let config = Config {
        download: DownloadConfig {
            output_dir: "output".into(),
            max_concurrent_pages: 5,
            ..Default::default()
        },
        ..Default::default()
    };

    // Create client instance
    let client = MangaClient::new(config)?;

    // Subscribe to events
    let mut events = client.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::ChapterQueued { name, .. } => {
                    println!("Downloading {}", name);
                }
                Event::PageFetched {
                    completed, total, ..
                } => {
                    println!("  page {}/{}", completed, total);
                }
                Event::PageFailed {
                    file_name, error, ..
                } => {
                    println!("  page {} failed: {}", file_name, error);
                }
                Event::ChapterComplete { path, .. } => {
                    println!("Saved {}", path.display());
                }
                Event::ChapterFailed { stage, error, .. } => {
                    println!("Failed while {}: {}", stage, error);
                }
                _ => {}
            }
        }
    });

    // Search and list
    let titles = client
        .search_titles(&title, Vec::<String>::new(), Vec::<String>::new(), &[])
        .await?;
    for (i, manga) in titles.iter().enumerate() {
        println!("{:>3}. {}", i + 1, manga.display_title("en"));
    }
    let Some(manga) = pick.checked_sub(1).and_then(|i| titles.get(i)) else {
        println!("No title at index {}", pick);
        return Ok(());
    };

    let chapters = client.chapters(&manga.id, &client.config().download.language).await?;
    println!(
        "{} has {} chapters",
        manga.display_title("en"),
        chapters.len()
    );

    // Download the selected range
    let selected = ChapterRange::new(from, to).apply(&chapters);
    let results = client.download_chapters(manga, selected).await;
    let failed = results.iter().filter(|r| r.is_err()).count();
    println!("{} chapters downloaded, {} failed", results.len() - failed, failed);

    Ok(())
}
