//! Tag name to id resolution
//!
//! The vocabulary is fetched once per client and kept for its lifetime. Names are matched
//! exactly against the English name of each tag. Names with no match are dropped, so a
//! stale or mistyped tag name widens the search instead of failing it.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::error::ClientError;
use crate::models::Tag;
use crate::paginator::Paginator;
use crate::query::{TAG_ENDPOINT, TagSelection};

/// Language whose tag names are matched
const TAG_NAME_LANGUAGE: &str = "en";

/// Resolves human-readable tag names to catalog ids
#[derive(Clone, Debug)]
pub struct TagResolver {
    paginator: Paginator,
    vocabulary: Arc<OnceCell<Vec<Tag>>>,
}

impl TagResolver {
    /// Create a resolver; nothing is fetched until the first resolution
    pub fn new(paginator: Paginator) -> Self {
        Self {
            paginator,
            vocabulary: Arc::new(OnceCell::new()),
        }
    }

    /// Full tag vocabulary, fetched on first use
    ///
    /// A failed fetch is not cached; the next call tries again.
    pub async fn vocabulary(&self) -> Result<&[Tag], ClientError> {
        let tags = self
            .vocabulary
            .get_or_try_init(|| async {
                let tags: Vec<Tag> = self.paginator.fetch_all(TAG_ENDPOINT, &[]).await?;
                tracing::debug!(count = tags.len(), "tag vocabulary loaded");
                Ok::<_, ClientError>(tags)
            })
            .await?;
        Ok(tags.as_slice())
    }

    /// Map tag names to ids for inclusion and exclusion
    ///
    /// Ids come back in vocabulary order. Unknown names are logged and skipped.
    pub async fn resolve_tags<I, E>(
        &self,
        included: I,
        excluded: E,
    ) -> Result<TagSelection, ClientError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let included: Vec<String> = included.into_iter().map(|n| n.as_ref().to_string()).collect();
        let excluded: Vec<String> = excluded.into_iter().map(|n| n.as_ref().to_string()).collect();

        if included.is_empty() && excluded.is_empty() {
            return Ok(TagSelection::default());
        }

        let vocabulary = self.vocabulary().await?;
        let selection = TagSelection {
            included: ids_for(vocabulary, &included),
            excluded: ids_for(vocabulary, &excluded),
        };

        for name in included.iter().chain(excluded.iter()) {
            if !vocabulary
                .iter()
                .any(|tag| tag.name(TAG_NAME_LANGUAGE) == Some(name.as_str()))
            {
                tracing::warn!(tag = %name, "unknown tag name ignored");
            }
        }

        Ok(selection)
    }
}

fn ids_for(vocabulary: &[Tag], names: &[String]) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|tag| {
            tag.name(TAG_NAME_LANGUAGE)
                .is_some_and(|name| names.iter().any(|wanted| wanted == name))
        })
        .map(|tag| tag.id.clone())
        .collect()
}
