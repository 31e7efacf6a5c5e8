//! End-to-end tests against the public catalog API
//!
//! These tests need network access and depend on live catalog content.
//! All tests are marked #[ignore] to prevent running in normal CI.
//!
//! # Running the tests
//!
//! ```bash
//! cargo test --test e2e_live -- --ignored --nocapture
//! ```

mod common;

use common::{archive_entries, create_live_client};
use manga_dl::ChapterRange;

#[tokio::test]
#[ignore]
async fn live_tag_vocabulary_contains_known_tags() {
    let (client, _temp_dir) = create_live_client();

    let selection = client
        .resolve_tags(["Oneshot"], ["Military"])
        .await
        .unwrap();

    assert_eq!(
        selection.included,
        vec![common::ONESHOT_TAG.to_string()]
    );
    assert_eq!(
        selection.excluded,
        vec![common::MILITARY_TAG.to_string()]
    );
}

#[tokio::test]
#[ignore]
async fn live_search_and_download_first_chapter() {
    let (client, _temp_dir) = create_live_client();

    let titles = client
        .search_titles("Jujutsu Kaisen", Vec::<&str>::new(), Vec::<&str>::new(), &[])
        .await
        .unwrap();
    assert!(!titles.is_empty(), "search should find at least one title");

    let manga = &titles[0];
    let chapters = client.chapters(&manga.id, "en").await.unwrap();
    let readable: Vec<_> = chapters.into_iter().filter(|c| !c.is_external()).collect();
    assert!(!readable.is_empty(), "title should have hosted chapters");

    let results = client
        .download_chapters(manga, ChapterRange::new(Some(1), Some(1)).apply(&readable))
        .await;
    let report = results[0].as_ref().unwrap();

    println!(
        "downloaded {} ({} pages, {} failed)",
        report.archive.display(),
        report.pages_fetched,
        report.failed_count()
    );
    assert_eq!(archive_entries(&report.archive).len(), report.pages_fetched);
}
