//! Aggregation of paginated collection responses
//!
//! The first page is requested on its own to learn `limit` and `total`. All remaining pages
//! are then requested at once and appended in offset order, whatever order they complete in.
//! A failing page fails the whole listing: callers index into the result, so a list with a
//! hole in it is worse than no list.

use futures::future::try_join_all;

use crate::error::ClientError;
use crate::models::{Envelope, Record};
use crate::transport::{Query, Transport};

/// Fetches every page of a collection endpoint
#[derive(Clone, Debug)]
pub struct Paginator {
    transport: Transport,
}

impl Paginator {
    /// Create a paginator on top of a shared transport
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch a single page, overriding the `offset` of `base` when one is given
    pub async fn fetch_page<T: Record>(
        &self,
        endpoint: &str,
        base: &[(String, String)],
        offset: Option<usize>,
    ) -> Result<Envelope<T>, ClientError> {
        let query = with_offset(base, offset);
        let operation = format!("list {}", T::KIND);
        self.transport.get_json(&operation, endpoint, &query).await
    }

    /// Fetch every record of `endpoint`, in the server's order
    ///
    /// # Errors
    /// Returns the first error of any page request; no partial list is returned.
    pub async fn fetch_all<T: Record>(
        &self,
        endpoint: &str,
        base: &[(String, String)],
    ) -> Result<Vec<T>, ClientError> {
        let first: Envelope<T> = self.fetch_page(endpoint, base, None).await?;
        let offsets = first.remaining_offsets();
        let total = first.total;
        let mut items = first.data;

        if offsets.is_empty() {
            return Ok(items);
        }

        tracing::debug!(
            endpoint,
            kind = T::KIND.as_str(),
            total,
            limit = first.limit,
            extra_pages = offsets.len(),
            "fetching remaining pages"
        );

        // try_join_all keeps input order and drops the in-flight requests on the first error
        let pages = try_join_all(
            offsets
                .iter()
                .map(|&offset| self.fetch_page::<T>(endpoint, base, Some(offset))),
        )
        .await?;

        for page in pages {
            items.extend(page.data);
        }

        if items.len() != total {
            tracing::warn!(
                endpoint,
                expected = total,
                received = items.len(),
                "record count differs from reported total"
            );
        }

        Ok(items)
    }
}

fn with_offset(base: &[(String, String)], offset: Option<usize>) -> Query {
    match offset {
        Some(offset) => base
            .iter()
            .filter(|(key, _)| key != "offset")
            .cloned()
            .chain(std::iter::once(("offset".to_string(), offset.to_string())))
            .collect(),
        None => base.to_vec(),
    }
}
