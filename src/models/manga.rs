use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContentRating, LocalizedString, Record, RecordKind, Relationship, Tag};

/// A title in the catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Manga {
    /// Catalog-wide unique id
    pub id: String,
    /// Always "manga"
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Descriptive attributes
    pub attributes: MangaAttributes,
    /// Authors, artists, cover art and related titles
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Descriptive attributes of a title
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaAttributes {
    #[serde(default, deserialize_with = "super::localized_or_empty")]
    pub title: LocalizedString,
    #[serde(default)]
    pub alt_titles: Vec<LocalizedString>,
    #[serde(default, deserialize_with = "super::localized_or_empty")]
    pub description: LocalizedString,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub last_volume: Option<String>,
    #[serde(default)]
    pub last_chapter: Option<String>,
    #[serde(default)]
    pub publication_demographic: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub content_rating: Option<ContentRating>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub available_translated_languages: Vec<Option<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Manga {
    /// Title in `language`, falling back to alternate titles, then to English, then to any title
    pub fn display_title(&self, language: &str) -> String {
        let attrs = &self.attributes;
        attrs
            .title
            .get(language)
            .or_else(|| attrs.alt_titles.iter().find_map(|alt| alt.get(language)))
            .or_else(|| attrs.title.get("en"))
            .or_else(|| attrs.title.values().next())
            .cloned()
            .unwrap_or_else(|| self.id.clone())
    }

    /// Languages the title has chapters in
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .available_translated_languages
            .iter()
            .flatten()
            .map(String::as_str)
    }
}

impl Record for Manga {
    const KIND: RecordKind = RecordKind::Manga;

    fn id(&self) -> &str {
        &self.id
    }
}
