//! Catalog client
//!
//! [`MangaClient`] is the entry point of the library. It owns the single [`Transport`] and
//! hands it to the paginator, the tag resolver and the chapter downloader.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::downloader::{ChapterDownloader, ChapterRequest, PageSource};
use crate::error::{DownloadError, Result};
use crate::models::{AtHomeServer, Chapter, ContentRating, Manga};
use crate::paginator::Paginator;
use crate::query::{
    CatalogFilter, MANGA_ENDPOINT, TagSelection, chapter_feed_endpoint, chapter_feed_query,
};
use crate::tags::TagResolver;
use crate::transport::Transport;
use crate::types::{ChapterReport, Event};
use crate::utils::chapter_display_name;

/// Buffered events per subscriber before it starts lagging
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Catalog client (cloneable; clones share the connection pool, tag cache and event channel)
#[derive(Clone)]
pub struct MangaClient {
    config: Arc<Config>,
    transport: Transport,
    paginator: Paginator,
    tags: TagResolver,
    downloader: ChapterDownloader,
    event_tx: broadcast::Sender<Event>,
}

impl std::fmt::Debug for MangaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MangaClient")
            .field("base_url", &self.transport.base_url().as_str())
            .field("output_dir", &self.config.download.output_dir)
            .finish_non_exhaustive()
    }
}

impl MangaClient {
    /// Create a client from `config`
    ///
    /// No request is made until the first operation.
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use manga_dl::{Config, MangaClient};
    ///
    /// # async fn example() -> manga_dl::Result<()> {
    /// let client = MangaClient::new(Config::default())?;
    /// let titles = client
    ///     .search_titles("Jujutsu Kaisen", &["Action"], &[] as &[&str], &[])
    ///     .await?;
    /// for manga in &titles {
    ///     println!("{} ({})", manga.display_title("en"), manga.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let transport = Transport::new(&config.api, config.retry.clone())?;
        let paginator = Paginator::new(transport.clone());
        let tags = TagResolver::new(paginator.clone());
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let source: Arc<dyn PageSource> = Arc::new(transport.clone());
        let downloader =
            ChapterDownloader::new(source, Arc::new(config.download.clone()), event_tx.clone());

        tracing::debug!(base_url = %transport.base_url(), "client created");

        Ok(Self {
            config: Arc::new(config),
            transport,
            paginator,
            tags,
            downloader,
            event_tx,
        })
    }

    /// Subscribe to download events
    ///
    /// Each subscriber receives every event emitted after it subscribed. A subscriber that
    /// falls more than 1000 events behind receives `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Map tag names (English) to ids; unknown names are dropped
    pub async fn resolve_tags<I, E>(&self, included: I, excluded: E) -> Result<TagSelection>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(self.tags.resolve_tags(included, excluded).await?)
    }

    /// Every title matching `filter`, in the server's order
    pub async fn search(&self, filter: &CatalogFilter) -> Result<Vec<Manga>> {
        let query = filter.to_query(self.config.api.page_size);
        let titles = self.paginator.fetch_all(MANGA_ENDPOINT, &query).await?;
        tracing::info!(title = filter.title_query(), results = titles.len(), "search finished");
        Ok(titles)
    }

    /// Search by title and tag names
    ///
    /// The tag vocabulary is only fetched when tag names are given.
    pub async fn search_titles<I, E>(
        &self,
        title: &str,
        included_tags: I,
        excluded_tags: E,
        content_ratings: &[ContentRating],
    ) -> Result<Vec<Manga>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let tags = self.resolve_tags(included_tags, excluded_tags).await?;
        let filter = CatalogFilter::builder(title)
            .tags(tags)
            .content_ratings(content_ratings.iter().copied())
            .build();
        self.search(&filter).await
    }

    /// Chapters of a title translated to `language`, in ascending chapter order
    ///
    /// The order is the one the server declares; chapter numbers are not re-sorted here.
    pub async fn chapters(&self, manga_id: &str, language: &str) -> Result<Vec<Chapter>> {
        let query = chapter_feed_query(language, self.config.api.chapter_page_size);
        let chapters = self
            .paginator
            .fetch_all(&chapter_feed_endpoint(manga_id), &query)
            .await?;
        Ok(chapters)
    }

    /// Image-server info of a chapter
    pub async fn image_server(&self, chapter_id: &str) -> Result<AtHomeServer> {
        Ok(PageSource::image_server(&self.transport, chapter_id).await?)
    }

    /// Download request for `chapter`, named after it and its title
    pub fn chapter_request(&self, manga: &Manga, chapter: &Chapter) -> ChapterRequest {
        ChapterRequest::new(
            chapter.id.clone(),
            chapter_display_name(manga, chapter, &self.config.download.language),
        )
    }

    /// Download one chapter into `{output_dir}/{chapter name}.cbz`
    pub async fn download_chapter(
        &self,
        manga: &Manga,
        chapter: &Chapter,
    ) -> Result<ChapterReport> {
        let request = self.chapter_request(manga, chapter);
        Ok(self.downloader.download(&request).await?)
    }

    /// Download chapters one after another
    ///
    /// A failed chapter does not stop the rest; there is one result per chapter, in order.
    pub async fn download_chapters(
        &self,
        manga: &Manga,
        chapters: &[Chapter],
    ) -> Vec<std::result::Result<ChapterReport, DownloadError>> {
        let mut results = Vec::with_capacity(chapters.len());
        for chapter in chapters {
            if chapter.is_external() {
                tracing::warn!(chapter_id = %chapter.id, "chapter is hosted externally");
            }
            let request = self.chapter_request(manga, chapter);
            results.push(self.downloader.download(&request).await);
        }

        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(
            manga_id = %manga.id,
            chapters = results.len(),
            failed,
            "chapter batch finished"
        );
        results
    }
}
