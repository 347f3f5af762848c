//! Kitsu API client.
//!
//! Low-level HTTP client that handles headers, status mapping and raw
//! requests. Entity-specific operations are implemented via traits on the
//! model types and as convenience methods on [`KitsuClient`].

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{KitsuError, Result};
use crate::jsonapi::ErrorDocument;

/// Media type used by the JSON:API specification.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Query for requests that take no parameters.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

/// Low-level Kitsu API client.
///
/// Sends JSON:API requests and maps failed responses to [`KitsuError`].
/// Resource lookups are exposed through the `Get`, `Search` and `Trending`
/// traits on the model types, and through `get_*`/`search_*`/`trending_*`
/// methods on this struct.
///
/// Clones share the same underlying session; closing any clone closes them
/// all.
///
/// # Example
///
/// ```no_run
/// use kitsuapi::KitsuClient;
///
/// # async fn example() -> kitsuapi::Result<()> {
/// let client = KitsuClient::new()?;
/// let anime = client.get_anime("1").await?;
/// println!("{}", anime.title().unwrap_or("untitled"));
/// client.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct KitsuClient {
    http: Arc<RwLock<Option<Client>>>,
    base_url: Arc<Url>,
}

impl std::fmt::Debug for KitsuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KitsuClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl KitsuClient {
    /// Create a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Self::with_http_client(http, &config.base_url)
    }

    /// Create a client around an existing [`reqwest::Client`].
    ///
    /// JSON:API headers are still attached to every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so joins append to it
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        Ok(Self {
            http: Arc::new(RwLock::new(Some(http))),
            base_url: Arc::new(base_url),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Release the underlying HTTP session.
    ///
    /// Requests made after closing fail with [`KitsuError::Closed`].
    /// Closing an already closed client does nothing.
    pub async fn close(&self) {
        if self.http.write().await.take().is_some() {
            tracing::debug!("closed Kitsu client session");
        }
    }

    /// Whether [`close`](Self::close) has been called.
    pub async fn is_closed(&self) -> bool {
        self.http.read().await.is_none()
    }

    /// Resolve a path or absolute URL against the base URL.
    ///
    /// Absolute URLs (such as JSON:API `related` and `next` links) are
    /// returned unchanged.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        match Url::parse(path) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(self.base_url.join(path.trim_start_matches('/'))?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Response> {
        let url = self.url_for(path)?;
        let http = self.session().await?;

        let response = http
            .get(url)
            .headers(json_api_headers())
            .query(query)
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Kitsu response");
        Self::check_response(response).await
    }

    /// Make a GET request and decode the JSON body.
    ///
    /// Use `serde_json::Value` as `T` to get the raw document.
    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.get(path, query).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Decode the JSON at a link taken from a response body.
    ///
    /// Only links on the base URL's origin are followed.
    pub(crate) async fn follow_json<T, Q>(&self, link: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url_for(link)?;
        if url.origin() != self.base_url.origin() {
            tracing::warn!(%url, "not following link to another host");
            return Err(KitsuError::ForeignLink { link: link.to_string() });
        }
        self.get_json(url.as_str(), query).await
    }

    async fn session(&self) -> Result<Client> {
        self.http.read().await.clone().ok_or(KitsuError::Closed)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, body))
    }
}

fn json_api_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_API_MEDIA_TYPE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API_MEDIA_TYPE));
    headers
}

/// Map a failed response to the matching error variant.
fn error_for_status(status: StatusCode, body: String) -> KitsuError {
    let first = serde_json::from_str::<ErrorDocument>(&body)
        .ok()
        .and_then(|doc| doc.errors.into_iter().next());

    let title = first.as_ref().and_then(|e| e.title.clone());
    let detail = first
        .and_then(|e| e.detail.or(e.title))
        .unwrap_or_else(|| {
            if body.is_empty() {
                format!("HTTP {status}")
            } else {
                body.clone()
            }
        });

    match status {
        StatusCode::BAD_REQUEST => KitsuError::BadRequest { title, detail },
        StatusCode::NOT_FOUND => KitsuError::NotFound { title, detail },
        _ => KitsuError::Api {
            status: status.as_u16(),
            detail,
            body,
        },
    }
}
