use serde::{Deserialize, Serialize};

use super::{LocalizedString, Record, RecordKind, Relationship};

/// An entry of the tag vocabulary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    /// Catalog-wide unique id
    pub id: String,
    /// Always "tag"
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Localized names and grouping
    pub attributes: TagAttributes,
    /// Related records
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Localized names and grouping of a tag
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TagAttributes {
    #[serde(default, deserialize_with = "super::localized_or_empty")]
    pub name: LocalizedString,
    #[serde(default, deserialize_with = "super::localized_or_empty")]
    pub description: LocalizedString,
    /// "genre", "theme", "format" or "content"
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub version: u32,
}

impl Tag {
    /// Name in `language`, if the tag has one
    pub fn name(&self, language: &str) -> Option<&str> {
        self.attributes.name.get(language).map(String::as_str)
    }
}

impl Record for Tag {
    const KIND: RecordKind = RecordKind::Tag;

    fn id(&self) -> &str {
        &self.id
    }
}
