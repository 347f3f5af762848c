//! Category model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::KitsuClient;
use crate::decode;
use crate::error::Result;
use crate::jsonapi::{Links, Relationships};
use crate::models::Image;
use crate::traits::{Get, Resource};

/// A category (genre or theme tag) applied to anime and manga.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "decode::id")]
    pub id: String,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub attributes: CategoryAttributes,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub relationships: Relationships,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub links: Links,
}

/// Attributes of a [`Category`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAttributes {
    #[serde(default, deserialize_with = "decode::datetime")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::datetime")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "decode::string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "decode::string")]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "decode::boolean")]
    pub nsfw: Option<bool>,

    /// Number of sub-categories.
    #[serde(default, deserialize_with = "decode::uint")]
    pub child_count: Option<u32>,

    /// Number of anime and manga tagged with this category.
    #[serde(default, deserialize_with = "decode::uint")]
    pub total_media_count: Option<u64>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub image: Option<Image>,
}

impl Category {
    pub fn title(&self) -> Option<&str> {
        self.attributes.title.as_deref()
    }
}

impl Resource for Category {
    const KIND: &'static str = "categories";
    const PATH: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }
}

impl KitsuClient {
    /// Get a category by ID.
    pub async fn get_category(&self, id: &str) -> Result<Category> {
        Category::get(self, id).await
    }
}
