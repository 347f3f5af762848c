//! Kitsu API client library.
//!
//! An async Rust client for the [Kitsu](https://kitsu.io) anime and manga
//! database, which speaks JSON:API. Lookups are defined as traits
//! ([`Get`], [`Search`], [`Trending`]) that resource types implement, with
//! convenience methods on [`KitsuClient`] for the common calls.
//!
//! # Quick Start
//!
//! ```no_run
//! use kitsuapi::{KitsuClient, SearchQuery, Season};
//!
//! #[tokio::main]
//! async fn main() -> kitsuapi::Result<()> {
//!     let client = KitsuClient::new()?;
//!
//!     // Fetch by ID
//!     let anime = client.get_anime("1").await?;
//!     println!("{:?} {:?}", anime.title(), anime.url());
//!
//!     // Free-text search
//!     for manga in client.search_manga("one piece").await? {
//!         println!("{} {:?}", manga.id, manga.title());
//!     }
//!
//!     // Filtered search, one page
//!     let query = SearchQuery::default().season(Season::Spring).season_year(2022).limit(5);
//!     let page = client.search_anime_with(&query).await?;
//!     println!("{} of {:?}", page.len(), page.total);
//!
//!     // Related resources
//!     for episode in anime.episodes(&client).await? {
//!         println!("{:?}", episode.title());
//!     }
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Get`] - Fetch a single resource by ID
//! - [`Search`] - Filtered, paginated collection queries
//! - [`Trending`] - The weekly trending list
//!
//! Every model implements [`Resource`], naming its endpoint and JSON:API
//! type.
//!
//! # Configuration
//!
//! [`ClientConfig::from_env`] reads:
//!
//! - `KITSU_API_URL` (optional) - Base URL (defaults to `https://kitsu.io/api/edge`)
//! - `KITSU_TIMEOUT_SECS` (optional) - Total request timeout (defaults to 30)
//! - `KITSU_CONNECT_TIMEOUT_SECS` (optional) - Connect timeout (defaults to 20)

pub mod cli;
mod client;
mod config;
mod decode;
mod error;
pub mod jsonapi;
mod models;
mod output;
mod pagination;
mod query;
mod traits;

// Re-export core types
pub use client::{KitsuClient, JSON_API_MEDIA_TYPE};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{KitsuError, Result};
pub use output::PrettyPrint;
pub use pagination::Page;
pub use query::{clamp_limit, SearchQuery, MAX_PAGE_LIMIT, MIN_PAGE_LIMIT};

// Re-export traits
pub use traits::{Get, Resource, Search, Trending};

// Re-export models
pub use models::{
    // Enums
    AgeRating,
    AnimeSubtype,
    MangaSubtype,
    Season,
    Status,
    // Shared types
    Image,
    ImageSize,
    Titles,
    SITE_URL,
    // Anime types
    Anime,
    AnimeAttributes,
    Episode,
    EpisodeAttributes,
    StreamingLink,
    StreamingLinkAttributes,
    // Manga types
    Chapter,
    ChapterAttributes,
    Manga,
    MangaAttributes,
    // Other resources
    Category,
    CategoryAttributes,
    Character,
    CharacterAttributes,
};
