use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordKind, Relationship};

/// One chapter of a title
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chapter {
    /// Catalog-wide unique id
    pub id: String,
    /// Always "chapter"
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Descriptive attributes
    pub attributes: ChapterAttributes,
    /// Owning title, scanlation group, uploader
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Descriptive attributes of a chapter
///
/// `chapter` is the server's chapter number as text; it may be missing or non-numeric
/// ("Oneshot", "10.5"), so lists keep the server's declared order instead of sorting on it.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAttributes {
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub translated_language: String,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub readable_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: u32,
}

impl Chapter {
    /// Chapter number as listed, or "Oneshot" when the server has none
    pub fn number(&self) -> &str {
        self.attributes.chapter.as_deref().unwrap_or("Oneshot")
    }

    /// Chapter title, empty when the server has none
    pub fn title(&self) -> &str {
        self.attributes.title.as_deref().unwrap_or_default()
    }

    /// Hosted elsewhere; the image server has no pages for it
    pub fn is_external(&self) -> bool {
        self.attributes.external_url.is_some()
    }
}

impl Record for Chapter {
    const KIND: RecordKind = RecordKind::Chapter;

    fn id(&self) -> &str {
        &self.id
    }
}
