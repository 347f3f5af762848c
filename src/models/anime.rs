//! Anime model and lookups.

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
    AgeRating, AnimeSubtype, Category, Episode, Image, ImageSize, Status, StreamingLink, Titles,
    SITE_URL,
};
use crate::pagination::Page;
use crate::query::SearchQuery;
use crate::traits::{Get, Resource, Search, Trending};

/// An anime.
///
/// Related collections (episodes, categories, streaming links) are not part
/// of the resource payload; fetch them with the async accessors, which
/// remember the result for the lifetime of this instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anime {
    /// The Kitsu ID (numeric, sent as a string).
    #[serde(deserialize_with = "decode::id")]
    pub id: String,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub attributes: AnimeAttributes,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub relationships: Relationships,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub links: Links,

    #[serde(skip)]
    episodes_cache: OnceLock<Vec<Episode>>,

    #[serde(skip)]
    categories_cache: OnceLock<Vec<Category>>,

    #[serde(skip)]
    streaming_links_cache: OnceLock<Vec<StreamingLink>>,
}

/// Attributes of an [`Anime`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeAttributes {
    #[serde(default, deserialize_with = "decode::datetime")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::datetime")]
    pub updated_at: Option<DateTime<Utc>>,

    /// URL-safe unique name (e.g. `cowboy-bebop`).
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

    /// Average rating out of 100.
    #[serde(default, deserialize_with = "decode::float")]
    pub average_rating: Option<f64>,

    /// Rating (2-20 scale) to number of ratings.
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
    pub subtype: Option<AnimeSubtype>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub status: Option<Status>,

    /// Free-text release estimate for unreleased titles.
    #[serde(default, deserialize_with = "decode::string")]
    pub tba: Option<String>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub poster_image: Option<Image>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub cover_image: Option<Image>,

    #[serde(default, deserialize_with = "decode::uint")]
    pub episode_count: Option<u32>,

    /// Length of each episode in minutes.
    #[serde(default, deserialize_with = "decode::uint")]
    pub episode_length: Option<u32>,

    /// Total runtime in minutes.
    #[serde(default, deserialize_with = "decode::uint")]
    pub total_length: Option<u32>,

    #[serde(default, deserialize_with = "decode::string")]
    pub youtube_video_id: Option<String>,

    #[serde(default, deserialize_with = "decode::string")]
    pub show_type: Option<String>,

    #[serde(default, deserialize_with = "decode::boolean")]
    pub nsfw: Option<bool>,
}

impl Anime {
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

    /// Link to the anime's page on the Kitsu website.
    pub fn url(&self) -> Option<String> {
        self.attributes
            .slug
            .as_ref()
            .map(|slug| format!("{SITE_URL}/anime/{slug}"))
    }

    /// URL of the poster image in the given size.
    pub fn poster_image(&self, size: ImageSize) -> Option<&str> {
        self.attributes.poster_image.as_ref().and_then(|i| i.url(size))
    }

    /// URL of the cover image in the given size.
    pub fn cover_image(&self, size: ImageSize) -> Option<&str> {
        self.attributes.cover_image.as_ref().and_then(|i| i.url(size))
    }

    /// Fetch all episodes.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let anime = client.get_anime("1").await?;
    /// for episode in anime.episodes(&client).await? {
    ///     println!("{:?} {:?}", episode.attributes.number, episode.title());
    /// }
    /// ```
    pub async fn episodes(&self, client: &KitsuClient) -> Result<&[Episode]> {
        let target = self.related("episodes", "episodes")?;
        related::memoised(&self.episodes_cache, related::fetch_all(client, &target)).await
    }

    /// Fetch the categories this anime is tagged with.
    pub async fn categories(&self, client: &KitsuClient) -> Result<&[Category]> {
        let target = self.related("categories", "categories")?;
        related::memoised(&self.categories_cache, related::fetch_all(client, &target)).await
    }

    /// Fetch the legal streaming sources for this anime.
    pub async fn streaming_links(&self, client: &KitsuClient) -> Result<&[StreamingLink]> {
        let target = self.related("streamingLinks", "streaming-links")?;
        related::memoised(&self.streaming_links_cache, related::fetch_all(client, &target)).await
    }

    fn related(&self, name: &str, segment: &str) -> Result<String> {
        related::related_target(Self::PATH, &self.id, &self.relationships, name, segment)
    }
}

impl Resource for Anime {
    const KIND: &'static str = "anime";
    const PATH: &'static str = "anime";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Search for Anime {}

impl Trending for Anime {}

impl KitsuClient {
    /// Get an anime by ID.
    pub async fn get_anime(&self, id: &str) -> Result<Anime> {
        Anime::get(self, id).await
    }

    /// Search anime by title text.
    pub async fn search_anime(&self, text: &str) -> Result<Vec<Anime>> {
        Anime::search(self, text).await
    }

    /// Search anime with filters, returning one page.
    pub async fn search_anime_with(&self, query: &SearchQuery) -> Result<Page<Anime>> {
        Anime::search_page(self, query).await
    }

    /// Get the anime trending this week.
    pub async fn trending_anime(&self) -> Result<Vec<Anime>> {
        Anime::trending(self).await
    }
}
