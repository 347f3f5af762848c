//! Related-resource fetching.
//!
//! Related collections (an anime's episodes, a manga's chapters) live at
//! the URL in `relationships.<name>.links.related`. Results are followed
//! through `links.next` and memoised on the parent instance. Links are
//! only followed on the client's API host.

use std::future::Future;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;

use crate::client::{KitsuClient, NO_QUERY};
use crate::error::Result;
use crate::jsonapi::{Document, Relationships};
use crate::pagination::Page;
use crate::traits::resource_path;

/// Page size requested for related collections.
pub(crate) const RELATED_PAGE_SIZE: u32 = 20;

/// Maximum pages to follow (safety limit).
const MAX_PAGES: u32 = 1000;

/// Where to fetch a relationship from.
///
/// Uses the `related` link when the API supplied one, else
/// `<parent_path>/<id>/<segment>`.
pub(crate) fn related_target(
    parent_path: &str,
    parent_id: &str,
    relationships: &Relationships,
    name: &str,
    segment: &str,
) -> Result<String> {
    match relationships.get(name).and_then(|r| r.links.related.clone()) {
        Some(link) => Ok(link),
        None => Ok(format!("{}/{}", resource_path(parent_path, parent_id)?, segment)),
    }
}

/// Fetch every page of a related collection.
pub(crate) async fn fetch_all<T: DeserializeOwned>(
    client: &KitsuClient,
    target: &str,
) -> Result<Vec<T>> {
    fetch_pages(client, target, MAX_PAGES).await
}

#[tracing::instrument(skip(client))]
async fn fetch_pages<T: DeserializeOwned>(
    client: &KitsuClient,
    target: &str,
    max_pages: u32,
) -> Result<Vec<T>> {
    let limit = RELATED_PAGE_SIZE.to_string();
    let first: Document<Vec<T>> = client.follow_json(target, &[("page[limit]", limit)]).await?;
    let mut page = Page::from_document(first);
    let mut items = Vec::new();
    let mut fetched = 1;

    loop {
        let next = page.links.next.take();
        items.extend(page.items);

        let Some(next) = next else {
            break;
        };

        if fetched >= max_pages {
            tracing::warn!(
                "Reached pagination limit of {} pages for {}, stopping",
                max_pages,
                target
            );
            break;
        }

        let document: Document<Vec<T>> = client.follow_json(&next, NO_QUERY).await?;
        page = Page::from_document(document);
        fetched += 1;
    }

    tracing::debug!(count = items.len(), "fetched related resources");
    Ok(items)
}

/// Fetch a to-one relationship. `None` when the API returns `data: null`.
#[tracing::instrument(skip(client))]
pub(crate) async fn fetch_one<T: DeserializeOwned>(
    client: &KitsuClient,
    target: &str,
) -> Result<Option<T>> {
    let document: Document<Option<T>> = client.follow_json(target, NO_QUERY).await?;
    Ok(document.data)
}

/// Return the memoised value, running `fetch` only on first use.
///
/// A failed fetch leaves the cell empty so the next call retries.
pub(crate) async fn memoised<'a, T, F>(cell: &'a OnceLock<Vec<T>>, fetch: F) -> Result<&'a [T]>
where
    F: Future<Output = Result<Vec<T>>>,
{
    if let Some(items) = cell.get() {
        return Ok(items);
    }
    let items = fetch.await?;
    Ok(cell.get_or_init(|| items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::KitsuError;
    use crate::jsonapi::{Links, Relationship};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_related_target_prefers_link() {
        let mut relationships = Relationships::new();
        relationships.insert(
            "streamingLinks".to_string(),
            Relationship {
                links: Links {
                    related: Some("https://kitsu.io/api/edge/anime/1/streaming-links".to_string()),
                    ..Default::default()
                },
            },
        );

        assert_eq!(
            related_target("anime", "1", &relationships, "streamingLinks", "streaming-links")
                .unwrap(),
            "https://kitsu.io/api/edge/anime/1/streaming-links"
        );
        assert_eq!(
            related_target("anime", "1", &relationships, "episodes", "episodes").unwrap(),
            "anime/1/episodes"
        );
    }

    #[test]
    fn test_related_target_rejects_unaddressable_parent() {
        let relationships = Relationships::new();
        let err = related_target("anime", "..", &relationships, "episodes", "episodes").unwrap_err();
        assert!(matches!(err, KitsuError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_fetch_pages_stops_at_page_limit() {
        let mock_server = MockServer::start().await;
        let looping = format!("{}/anime/1/episodes", mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/anime/1/episodes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [1, 2],
                "links": {"next": looping}
            })))
            .expect(3)
            .mount(&mock_server)
            .await;

        let client =
            KitsuClient::with_config(ClientConfig::default().with_base_url(mock_server.uri()))
                .unwrap();
        let items: Vec<u32> = fetch_pages(&client, "anime/1/episodes", 3).await.unwrap();
        assert_eq!(items, vec![1, 2, 1, 2, 1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_all_refuses_links_to_other_hosts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/1/episodes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [1],
                "links": {"next": "https://elsewhere.example/anime/1/episodes?page%5Boffset%5D=20"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client =
            KitsuClient::with_config(ClientConfig::default().with_base_url(mock_server.uri()))
                .unwrap();
        let err = fetch_all::<u32>(&client, "anime/1/episodes").await.unwrap_err();
        assert!(matches!(err, KitsuError::ForeignLink { .. }));
    }

    #[tokio::test]
    async fn test_memoised_runs_fetch_once() {
        let cell = OnceLock::new();
        let first = memoised(&cell, async { Ok(vec![1, 2]) }).await.unwrap();
        assert_eq!(first, &[1, 2]);

        let second = memoised(&cell, async { Ok(vec![9]) }).await.unwrap();
        assert_eq!(second, &[1, 2]);
    }

    #[tokio::test]
    async fn test_memoised_does_not_cache_errors() {
        let cell: OnceLock<Vec<i32>> = OnceLock::new();
        let result = memoised(&cell, async { Err(crate::KitsuError::Timeout) }).await;
        assert!(result.is_err());
        assert!(cell.get().is_none());
    }
}
