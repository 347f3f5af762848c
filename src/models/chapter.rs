//! Chapter model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::KitsuClient;
use crate::decode;
use crate::error::Result;
use crate::jsonapi::{Links, Relationships};
use crate::models::related;
use crate::models::{Image, Manga, Titles};
use crate::traits::{Get, Resource};

/// One chapter of a manga.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(deserialize_with = "decode::id")]
    pub id: String,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub attributes: ChapterAttributes,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub relationships: Relationships,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub links: Links,
}

/// Attributes of a [`Chapter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAttributes {
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

    #[serde(default, deserialize_with = "decode::uint")]
    pub volume_number: Option<u32>,

    #[serde(default, deserialize_with = "decode::uint")]
    pub number: Option<u32>,

    /// Publication date.
    #[serde(default, deserialize_with = "decode::date")]
    pub published: Option<NaiveDate>,

    /// Length in pages.
    #[serde(default, deserialize_with = "decode::uint")]
    pub length: Option<u32>,

    #[serde(default, deserialize_with = "decode::lenient")]
    pub thumbnail: Option<Image>,
}

impl Chapter {
    /// Display title: the canonical title, else the first non-empty one.
    pub fn title(&self) -> Option<&str> {
        self.attributes
            .canonical_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.attributes.titles.first())
    }

    /// Fetch the manga this chapter belongs to.
    pub async fn manga(&self, client: &KitsuClient) -> Result<Option<Manga>> {
        let target = related::related_target(
            Self::PATH,
            &self.id,
            &self.relationships,
            "manga",
            "manga",
        )?;
        related::fetch_one(client, &target).await
    }
}

impl Resource for Chapter {
    const KIND: &'static str = "chapters";
    const PATH: &'static str = "chapters";

    fn id(&self) -> &str {
        &self.id
    }
}

impl KitsuClient {
    /// Get a chapter by ID.
    pub async fn get_chapter(&self, id: &str) -> Result<Chapter> {
        Chapter::get(self, id).await
    }
}
