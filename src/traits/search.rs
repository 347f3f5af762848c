//! Search trait for filtered collection queries.

use async_trait::async_trait;

use crate::client::KitsuClient;
use crate::error::Result;
use crate::jsonapi::Document;
use crate::pagination::Page;
use crate::query::SearchQuery;
use crate::traits::Resource;

/// Search a resource collection with filters and pagination.
///
/// Searches always return a list; an empty result is not an error. Use
/// [`search_first`](Search::search_first) when only the best match is
/// wanted.
///
/// # Example
///
/// ```ignore
/// use kitsuapi::{Anime, KitsuClient, Search, SearchQuery, Season};
///
/// let client = KitsuClient::new()?;
///
/// // Free-text search
/// let results = Anime::search(&client, "cowboy bebop").await?;
///
/// // Filtered search, one page
/// let query = SearchQuery::default().season(Season::Spring).season_year(2022).limit(5);
/// let page = Anime::search_page(&client, &query).await?;
/// ```
#[async_trait]
pub trait Search: Resource {
    /// Filter key that carries the free-text part of a query.
    const TEXT_FILTER: &'static str = "text";

    /// Fetch one page of results.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects a filter.
    async fn search_page(client: &KitsuClient, query: &SearchQuery) -> Result<Page<Self>> {
        let params = query.to_params(Self::TEXT_FILTER);
        tracing::debug!(kind = Self::KIND, ?params, "searching");

        let document: Document<Vec<Self>> = client.get_json(Self::PATH, &params).await?;
        Ok(Page::from_document(document))
    }

    /// Search by free text, returning the first page of matches.
    async fn search(client: &KitsuClient, text: &str) -> Result<Vec<Self>> {
        let page = Self::search_page(client, &SearchQuery::new(text)).await?;
        Ok(page.items)
    }

    /// Return the best match for a query, or `None` if nothing matched.
    ///
    /// The request is sent with `page[limit]=1`.
    async fn search_first(client: &KitsuClient, query: &SearchQuery) -> Result<Option<Self>> {
        let query = query.clone().limit(1);
        let page = Self::search_page(client, &query).await?;
        Ok(page.items.into_iter().next())
    }
}
