//! Episode model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::KitsuClient;
use crate::decode;
use crate::error::Result;
use crate::jsonapi::{Links, Relationships};
use crate::models::related;
use crate::models::{Anime, Image, Titles};
use crate::traits::{Get, Resource};

/// One episode of an anime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    #[serde(deserialize_with = "decode::id")]
    pub id: String,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub attributes: EpisodeAttributes,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub relationships: Relationships,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub links: Links,
}

/// Attributes of an [`Episode`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeAttributes {
    #[serde(default, deserialize_with = "decode::datetime")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::datetime")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub titles: Titles,

    #[serde(default, deserialize_with = "decode::string")]
    pub canonical_title: Option<String>,

    #[serde(default, deserialize_with = "decode::string")]
    pub synopsis: Option<String>,

    /// Season the episode belongs to.
    #[serde(default, deserialize_with = "decode::uint")]
    pub season_number: Option<u32>,

    /// Absolute episode number.
    #[serde(default, deserialize_with = "decode::uint")]
    pub number: Option<u32>,

    /// Episode number within its season.
    #[serde(default, deserialize_with = "decode::uint")]
    pub relative_number: Option<u32>,

    #[serde(default, deserialize_with = "decode::date")]
    pub airdate: Option<NaiveDate>,

    /// Runtime in minutes.
    #[serde(default, deserialize_with = "decode::uint")]
    pub length: Option<u32>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub thumbnail: Option<Image>,
}

impl Episode {
    /// Display title: the canonical title, else the first non-empty one.
    pub fn title(&self) -> Option<&str> {
        self.attributes
            .canonical_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.attributes.titles.first())
    }

    /// Fetch the anime this episode belongs to.
    pub async fn media(&self, client: &KitsuClient) -> Result<Option<Anime>> {
        let target = related::related_target(
            Self::PATH,
            &self.id,
            &self.relationships,
            "media",
            "media",
        )?;
        related::fetch_one(client, &target).await
    }
}

impl Resource for Episode {
    const KIND: &'static str = "episodes";
    const PATH: &'static str = "episodes";

    fn id(&self) -> &str {
        &self.id
    }
}

impl KitsuClient {
    /// Get an episode by ID.
    pub async fn get_episode(&self, id: &str) -> Result<Episode> {
        Episode::get(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_deserialize() {
        let json = r#"{
            "id": "7",
            "type": "episodes",
            "links": {"self": "https://kitsu.io/api/edge/episodes/7"},
            "attributes": {
                "createdAt": "2013-02-20T16:00:25.722Z",
                "titles": {"en_jp": "Asteroid Blues", "ja_jp": "アステロイド・ブルース"},
                "canonicalTitle": "Asteroid Blues",
                "seasonNumber": 1,
                "number": 1,
                "relativeNumber": 1,
                "airdate": "1998-10-24",
                "length": 25,
                "thumbnail": {"original": "https://media.kitsu.io/episodes/thumbnails/7/original.jpg"}
            }
        }"#;
        let episode: Episode = serde_json::from_str(json).unwrap();
        assert_eq!(episode.id, "7");
        assert_eq!(episode.title(), Some("Asteroid Blues"));
        assert_eq!(episode.attributes.number, Some(1));
        assert_eq!(episode.attributes.airdate, NaiveDate::from_ymd_opt(1998, 10, 24));
        assert!(episode.attributes.thumbnail.unwrap().original.is_some());
    }

    #[test]
    fn test_episode_minimal() {
        let episode: Episode = serde_json::from_str(r#"{"id": 8, "attributes": null}"#).unwrap();
        assert_eq!(episode.id, "8");
        assert!(episode.title().is_none());
        assert!(episode.attributes.length.is_none());
        assert!(episode.attributes.thumbnail.is_none());
    }
}
