//! Character model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::KitsuClient;
use crate::decode;
use crate::error::Result;
use crate::jsonapi::{Links, Relationships};
use crate::models::{Image, ImageSize, Titles, SITE_URL};
use crate::pagination::Page;
use crate::query::SearchQuery;
use crate::traits::{Get, Resource, Search};

/// A character appearing in anime or manga.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    #[serde(deserialize_with = "decode::id")]
    pub id: String,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub attributes: CharacterAttributes,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub relationships: Relationships,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub links: Links,
}

/// Attributes of a [`Character`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterAttributes {
    #[serde(default, deserialize_with = "decode::datetime")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::datetime")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::string")]
    pub slug: Option<String>,

    /// Localized names.
    #[serde(default)]
    pub names: Titles,

    #[serde(default, deserialize_with = "decode::string")]
    pub canonical_name: Option<String>,

    #[serde(default, deserialize_with = "decode::string_list")]
    pub other_names: Vec<String>,

    #[serde(default, deserialize_with = "decode::string")]
    pub name: Option<String>,

    /// MyAnimeList character ID.
    #[serde(default, deserialize_with = "decode::uint")]
    pub mal_id: Option<u64>,

    /// HTML description.
    #[serde(default, deserialize_with = "decode::string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub image: Option<Image>,
}

impl Character {
    /// Display name: canonical name, then `name`, then the first localized
    /// name.
    pub fn name(&self) -> Option<&str> {
        let attrs = &self.attributes;
        attrs
            .canonical_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| attrs.name.as_deref().filter(|n| !n.is_empty()))
            .or_else(|| attrs.names.first())
    }

    /// Link to the character's page on the Kitsu website.
    pub fn url(&self) -> Option<String> {
        self.attributes
            .slug
            .as_ref()
            .map(|slug| format!("{SITE_URL}/character/{slug}"))
    }

    /// URL of the character image in the given size.
    pub fn image(&self, size: ImageSize) -> Option<&str> {
        self.attributes.image.as_ref().and_then(|i| i.url(size))
    }
}

impl Resource for Character {
    const KIND: &'static str = "characters";
    const PATH: &'static str = "characters";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Search for Character {
    const TEXT_FILTER: &'static str = "name";
}

impl KitsuClient {
    /// Get a character by ID.
    pub async fn get_character(&self, id: &str) -> Result<Character> {
        Character::get(self, id).await
    }

    /// Search characters by name.
    pub async fn search_characters(&self, name: &str) -> Result<Vec<Character>> {
        Character::search(self, name).await
    }

    /// Search characters with paging options, returning one page.
    pub async fn search_characters_with(&self, query: &SearchQuery) -> Result<Page<Character>> {
        Character::search_page(self, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_deserialize() {
        let json = r#"{
            "id": "1",
            "type": "characters",
            "attributes": {
                "slug": "spike-spiegel",
                "names": {"en": "Spike Spiegel", "ja_jp": "スパイク・スピーゲル"},
                "canonicalName": "Spike Spiegel",
                "otherNames": ["Swimming Bird"],
                "malId": 1,
                "description": "<p>Spike is a bounty hunter.</p>",
                "image": {"original": "https://media.kitsu.io/characters/images/1/original.jpg"}
            }
        }"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.name(), Some("Spike Spiegel"));
        assert_eq!(character.attributes.mal_id, Some(1));
        assert_eq!(character.attributes.other_names, vec!["Swimming Bird"]);
        assert_eq!(
            character.url().as_deref(),
            Some("https://kitsu.io/character/spike-spiegel")
        );
        assert!(character.image(ImageSize::Original).is_some());
        assert!(character.image(ImageSize::Tiny).is_none());
    }

    #[test]
    fn test_character_name_falls_back_to_names() {
        let json = r#"{"id": "2", "attributes": {"canonicalName": "", "names": {"ja_jp": "フェイ"}}}"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.name(), Some("フェイ"));
    }
}
