//! Trending trait.

use async_trait::async_trait;

use crate::client::{KitsuClient, NO_QUERY};
use crate::error::Result;
use crate::jsonapi::Document;
use crate::traits::Resource;

/// Fetch the resources currently trending on Kitsu.
#[async_trait]
pub trait Trending: Resource {
    /// Fetch the trending list. The list may be empty.
    async fn trending(client: &KitsuClient) -> Result<Vec<Self>> {
        let path = format!("trending/{}", Self::PATH);
        let document: Document<Vec<Self>> = client.get_json(&path, NO_QUERY).await?;
        Ok(document.data)
    }
}
