//! Catalog query building
//!
//! [`CatalogFilter`] is built once and turned into query parameters for the catalog search
//! endpoint. Array parameters use the `name[]` convention and repeat once per value.

use std::collections::BTreeSet;

use crate::models::ContentRating;
use crate::transport::Query;

/// Catalog search endpoint
pub const MANGA_ENDPOINT: &str = "manga";

/// Tag vocabulary endpoint
pub const TAG_ENDPOINT: &str = "manga/tag";

/// Chapter feed endpoint of one title
pub fn chapter_feed_endpoint(manga_id: &str) -> String {
    format!("manga/{}/feed", manga_id)
}

/// Image-server endpoint of one chapter
pub fn at_home_endpoint(chapter_id: &str) -> String {
    format!("at-home/server/{}", chapter_id)
}

/// Tag ids to include in and exclude from a search
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSelection {
    /// Ids every result must carry
    pub included: Vec<String>,
    /// Ids no result may carry
    pub excluded: Vec<String>,
}

impl TagSelection {
    /// No tag filtering
    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.excluded.is_empty()
    }
}

/// Immutable catalog search filter
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    title_query: String,
    included_tag_ids: BTreeSet<String>,
    excluded_tag_ids: BTreeSet<String>,
    content_ratings: BTreeSet<ContentRating>,
    language: Option<String>,
}

impl CatalogFilter {
    /// Start building a filter for titles matching `title_query`
    pub fn builder(title_query: impl Into<String>) -> CatalogFilterBuilder {
        CatalogFilterBuilder {
            filter: CatalogFilter {
                title_query: title_query.into(),
                ..Default::default()
            },
        }
    }

    /// Title text searched for
    pub fn title_query(&self) -> &str {
        &self.title_query
    }

    /// Tag ids every result must carry
    pub fn included_tag_ids(&self) -> &BTreeSet<String> {
        &self.included_tag_ids
    }

    /// Tag ids no result may carry
    pub fn excluded_tag_ids(&self) -> &BTreeSet<String> {
        &self.excluded_tag_ids
    }

    /// Accepted content ratings; empty means the server default
    pub fn content_ratings(&self) -> &BTreeSet<ContentRating> {
        &self.content_ratings
    }

    /// Required translation language, if any
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Query parameters for the search endpoint, with `limit` as the page size
    pub fn to_query(&self, limit: usize) -> Query {
        let mut query: Query = vec![
            ("title".to_string(), self.title_query.clone()),
            ("limit".to_string(), limit.to_string()),
        ];
        query.extend(
            self.included_tag_ids
                .iter()
                .map(|id| ("includedTags[]".to_string(), id.clone())),
        );
        query.extend(
            self.excluded_tag_ids
                .iter()
                .map(|id| ("excludedTags[]".to_string(), id.clone())),
        );
        query.extend(
            self.content_ratings
                .iter()
                .map(|rating| ("contentRating[]".to_string(), rating.as_str().to_string())),
        );
        if let Some(language) = &self.language {
            query.push((
                "availableTranslatedLanguage[]".to_string(),
                language.clone(),
            ));
        }
        query
    }
}

/// Builder for [`CatalogFilter`]
#[derive(Clone, Debug)]
pub struct CatalogFilterBuilder {
    filter: CatalogFilter,
}

impl CatalogFilterBuilder {
    /// Add resolved tag ids
    pub fn tags(mut self, tags: TagSelection) -> Self {
        self.filter.included_tag_ids.extend(tags.included);
        self.filter.excluded_tag_ids.extend(tags.excluded);
        self
    }

    /// Require a tag id
    pub fn include_tag(mut self, id: impl Into<String>) -> Self {
        self.filter.included_tag_ids.insert(id.into());
        self
    }

    /// Reject a tag id
    pub fn exclude_tag(mut self, id: impl Into<String>) -> Self {
        self.filter.excluded_tag_ids.insert(id.into());
        self
    }

    /// Accept these content ratings
    pub fn content_ratings(mut self, ratings: impl IntoIterator<Item = ContentRating>) -> Self {
        self.filter.content_ratings.extend(ratings);
        self
    }

    /// Only titles with chapters translated to `language`
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.filter.language = Some(language.into());
        self
    }

    /// Finish building
    pub fn build(self) -> CatalogFilter {
        self.filter
    }
}

/// Query parameters for a title's chapter feed in `language`, in ascending chapter order
pub fn chapter_feed_query(language: &str, limit: usize) -> Query {
    vec![
        ("translatedLanguage[]".to_string(), language.to_string()),
        ("order[volume]".to_string(), "asc".to_string()),
        ("order[chapter]".to_string(), "asc".to_string()),
        ("limit".to_string(), limit.to_string()),
    ]
}

/// 1-based inclusive slice of an ordered chapter list
///
/// Bounds past the end are clamped; a range starting after its end selects nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChapterRange {
    /// First chapter index (1-based), None = from the start
    pub from: Option<usize>,
    /// Last chapter index (1-based, inclusive), None = to the end
    pub to: Option<usize>,
}

impl ChapterRange {
    /// Range covering `from..=to`
    pub fn new(from: Option<usize>, to: Option<usize>) -> Self {
        Self { from, to }
    }

    /// Select the covered items
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.from.unwrap_or(1).max(1) - 1;
        let end = self.to.unwrap_or(items.len()).min(items.len());
        if start >= end {
            return &[];
        }
        &items[start..end]
    }
}
