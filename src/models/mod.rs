//! Catalog records and the wire envelopes that carry them
//!
//! The API speaks camelCase JSON; the structs here map it onto snake_case fields with serde.
//! Collection endpoints wrap their records in an [`Envelope`]; the paginator is generic over
//! the record type through the [`Record`] trait, so the record kind is fixed at compile time.

mod at_home;
mod chapter;
mod manga;
mod tag;

pub use at_home::{AtHomeChapter, AtHomeServer};
pub use chapter::{Chapter, ChapterAttributes};
pub use manga::{Manga, MangaAttributes};
pub use tag::{Tag, TagAttributes};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Language code -> text
pub type LocalizedString = BTreeMap<String, String>;

/// A record type returned by a collection endpoint
pub trait Record: DeserializeOwned + Send + 'static {
    /// Which kind of record this is
    const KIND: RecordKind;

    /// Catalog-wide unique identifier
    fn id(&self) -> &str;
}

/// Kinds of records served by collection endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A title in the catalog
    Manga,
    /// One chapter of a title
    Chapter,
    /// A tag from the tag vocabulary
    Tag,
}

impl RecordKind {
    /// Lowercase name, as used in the `type` field of records
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Manga => "manga",
            RecordKind::Chapter => "chapter",
            RecordKind::Tag => "tag",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a collection response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// "ok" on success
    #[serde(default)]
    pub result: String,
    /// "collection" for list endpoints
    #[serde(default)]
    pub response: String,
    /// Records on this page
    pub data: Vec<T>,
    /// Page size the server applied
    pub limit: usize,
    /// Offset of the first record on this page
    pub offset: usize,
    /// Size of the whole result set
    pub total: usize,
}

impl<T> Envelope<T> {
    /// Offsets of the pages that follow this one, in ascending order
    ///
    /// Empty when this page already reaches `total`, or when the server reports a zero limit.
    pub fn remaining_offsets(&self) -> Vec<usize> {
        if self.limit == 0 {
            return Vec::new();
        }
        (self.offset.saturating_add(self.limit)..self.total)
            .step_by(self.limit)
            .collect()
    }
}

/// A reference from one record to another
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Referenced record id
    pub id: String,
    /// Referenced record type (e.g. "author", "cover_art")
    #[serde(rename = "type")]
    pub kind: String,
    /// Relation to the referencing record, for related titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
}

/// Content rating classification of a title
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRating {
    /// Suitable for everyone
    Safe,
    /// Mild mature themes
    Suggestive,
    /// Sexual themes
    Erotica,
    /// Explicit content
    Pornographic,
}

impl ContentRating {
    /// Every rating, mildest first
    pub const ALL: [ContentRating; 4] = [
        ContentRating::Safe,
        ContentRating::Suggestive,
        ContentRating::Erotica,
        ContentRating::Pornographic,
    ];

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            ContentRating::Safe => "safe",
            ContentRating::Suggestive => "suggestive",
            ContentRating::Erotica => "erotica",
            ContentRating::Pornographic => "pornographic",
        }
    }
}

impl std::fmt::Display for ContentRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentRating::ALL
            .into_iter()
            .find(|rating| rating.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown content rating '{}'", s))
    }
}

/// Deserialize a localized map that the API sends as `[]` when it is empty
pub(crate) fn localized_or_empty<'de, D>(deserializer: D) -> Result<LocalizedString, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(LocalizedString),
        List(Vec<serde_json::Value>),
    }

    Ok(match Option::<MapOrList>::deserialize(deserializer)? {
        Some(MapOrList::Map(map)) => map,
        Some(MapOrList::List(_)) | None => LocalizedString::new(),
    })
}
