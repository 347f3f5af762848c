//! Manga model and lookups.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::KitsuClient;
use crate::decode;
use crate::error::Result;
use crate::jsonapi::{Links, Relationships};
use crate::models::related;
use crate::models::{
    AgeRating, Category, Chapter, Image, ImageSize, MangaSubtype, Status, Titles, SITE_URL,
};
use crate::pagination::Page;
use crate::query::SearchQuery;
use crate::traits::{Get, Resource, Search, Trending};

/// A manga, light novel, or other print work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manga {
    #[serde(deserialize_with = "decode::id")]
    pub id: String,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub attributes: MangaAttributes,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub relationships: Relationships,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub links: Links,

    #[serde(skip)]
    chapters_cache: OnceLock<Vec<Chapter>>,

    #[serde(skip)]
    categories_cache: OnceLock<Vec<Category>>,
}

/// Attributes of a [`Manga`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaAttributes {
    #[serde(default, deserialize_with = "decode::datetime")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::datetime")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::string")]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "decode::string")]
    pub synopsis: Option<String>,

    #[serde(default, deserialize_with = "decode::string")]
    pub description: Option<String>,

    #[serde(default)]
    pub titles: Titles,

    #[serde(default, deserialize_with = "decode::string")]
    pub canonical_title: Option<String>,

    #[serde(default, deserialize_with = "decode::string_list")]
    pub abbreviated_titles: Vec<String>,

    #[serde(default, deserialize_with = "decode::float")]
    pub average_rating: Option<f64>,

    #[serde(default, deserialize_with = "decode::string_map")]
    pub rating_frequencies: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "decode::uint")]
    pub user_count: Option<u64>,

    #[serde(default, deserialize_with = "decode::uint")]
    pub favorites_count: Option<u64>,

    #[serde(default, deserialize_with = "decode::date")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "decode::date")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "decode::datetime")]
    pub next_release: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::uint")]
    pub popularity_rank: Option<u32>,

    #[serde(default, deserialize_with = "decode::uint")]
    pub rating_rank: Option<u32>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub age_rating: Option<AgeRating>,

    #[serde(default, deserialize_with = "decode::string")]
    pub age_rating_guide: Option<String>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub subtype: Option<MangaSubtype>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub status: Option<Status>,

    #[serde(default, deserialize_with = "decode::string")]
    pub tba: Option<String>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub poster_image: Option<Image>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub cover_image: Option<Image>,

    #[serde(default, deserialize_with = "decode::uint")]
    pub chapter_count: Option<u32>,

    #[serde(default, deserialize_with = "decode::uint")]
    pub volume_count: Option<u32>,

    /// Magazine the work was serialized in.
    #[serde(default, deserialize_with = "decode::string")]
    pub serialization: Option<String>,

    #[serde(default, deserialize_with = "decode::string")]
    pub manga_type: Option<String>,
}

impl Manga {
    /// Display title: the first non-empty localized title.
    pub fn title(&self) -> Option<&str> {
        self.attributes.titles.first()
    }

    /// English title if available, then romanized Japanese, then any.
    pub fn preferred_title(&self) -> Option<&str> {
        self.attributes.titles.preferred()
    }

    pub fn canonical_title(&self) -> Option<&str> {
        self.attributes.canonical_title.as_deref()
    }

    pub fn average_rating(&self) -> Option<f64> {
        self.attributes.average_rating
    }

    /// Link to the manga's page on the Kitsu website.
    pub fn url(&self) -> Option<String> {
        self.attributes
            .slug
            .as_ref()
            .map(|slug| format!("{SITE_URL}/manga/{slug}"))
    }

    pub fn poster_image(&self, size: ImageSize) -> Option<&str> {
        self.attributes.poster_image.as_ref().and_then(|i| i.url(size))
    }

    pub fn cover_image(&self, size: ImageSize) -> Option<&str> {
        self.attributes.cover_image.as_ref().and_then(|i| i.url(size))
    }

    /// Fetch all chapters, following pagination.
    pub async fn chapters(&self, client: &KitsuClient) -> Result<&[Chapter]> {
        let target = self.related("chapters", "chapters")?;
        related::memoised(&self.chapters_cache, related::fetch_all(client, &target)).await
    }

    /// Fetch the categories this manga is tagged with.
    pub async fn categories(&self, client: &KitsuClient) -> Result<&[Category]> {
        let target = self.related("categories", "categories")?;
        related::memoised(&self.categories_cache, related::fetch_all(client, &target)).await
    }

    fn related(&self, name: &str, segment: &str) -> Result<String> {
        related::related_target(Self::PATH, &self.id, &self.relationships, name, segment)
    }
}

impl Resource for Manga {
    const KIND: &'static str = "manga";
    const PATH: &'static str = "manga";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Search for Manga {}

impl Trending for Manga {}

impl KitsuClient {
    /// Get a manga by ID.
    pub async fn get_manga(&self, id: &str) -> Result<Manga> {
        Manga::get(self, id).await
    }

    /// Search manga by title text.
    pub async fn search_manga(&self, text: &str) -> Result<Vec<Manga>> {
        Manga::search(self, text).await
    }

    /// Search manga with filters, returning one page.
    pub async fn search_manga_with(&self, query: &SearchQuery) -> Result<Page<Manga>> {
        Manga::search_page(self, query).await
    }

    /// Get the manga trending this week.
    pub async fn trending_manga(&self) -> Result<Vec<Manga>> {
        Manga::trending(self).await
    }
}
