//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::{KitsuClient, NO_QUERY};
use crate::error::Result;
use crate::jsonapi::Document;
use crate::traits::{resource_path, Resource};

/// Fetch a single resource by ID.
///
/// Implemented for every [`Resource`].
///
/// # Example
///
/// ```ignore
/// use kitsuapi::{Anime, Get, KitsuClient};
///
/// let client = KitsuClient::new()?;
/// let anime = Anime::get(&client, "1").await?;
/// assert_eq!(anime.id, "1");
/// ```
#[async_trait]
pub trait Get: Sized {
    /// Fetch the resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`KitsuError::InvalidArgument`](crate::KitsuError::InvalidArgument)
    /// for an empty, `.` or `..` ID without sending a request,
    /// [`KitsuError::NotFound`](crate::KitsuError::NotFound) if no resource
    /// has this ID, or another error if the request fails.
    async fn get(client: &KitsuClient, id: &str) -> Result<Self>;
}

#[async_trait]
impl<T: Resource> Get for T {
    #[tracing::instrument(skip(client), fields(kind = T::KIND))]
    async fn get(client: &KitsuClient, id: &str) -> Result<Self> {
        let path = resource_path(T::PATH, id)?;
        let document: Document<T> = client.get_json(&path, NO_QUERY).await?;
        Ok(document.data)
    }
}
