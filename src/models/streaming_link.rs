//! Streaming link model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::KitsuClient;
use crate::decode;
use crate::error::Result;
use crate::jsonapi::{Links, Relationships};
use crate::traits::{Get, Resource};

/// Where an anime can be watched legally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingLink {
    #[serde(deserialize_with = "decode::id")]
    pub id: String,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub attributes: StreamingLinkAttributes,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub relationships: Relationships,

    #[serde(default, deserialize_with = "decode::or_default")]
    pub links: Links,
}

/// Attributes of a [`StreamingLink`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingLinkAttributes {
    #[serde(default, deserialize_with = "decode::datetime")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::datetime")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decode::string")]
    pub url: Option<String>,

    /// Subtitle languages (e.g. `en`).
    #[serde(default, deserialize_with = "decode::string_list")]
    pub subs: Vec<String>,

    /// Dub languages (e.g. `ja`).
    #[serde(default, deserialize_with = "decode::string_list")]
    pub dubs: Vec<String>,
}

impl StreamingLink {
    pub fn url(&self) -> Option<&str> {
        self.attributes.url.as_deref()
    }

    /// Whether subtitles are offered in the given language.
    pub fn has_subs(&self, language: &str) -> bool {
        self.attributes.subs.iter().any(|s| s.eq_ignore_ascii_case(language))
    }

    /// Whether a dub is offered in the given language.
    pub fn has_dub(&self, language: &str) -> bool {
        self.attributes.dubs.iter().any(|d| d.eq_ignore_ascii_case(language))
    }
}

impl Resource for StreamingLink {
    const KIND: &'static str = "streamingLinks";
    const PATH: &'static str = "streaming-links";

    fn id(&self) -> &str {
        &self.id
    }
}

impl KitsuClient {
    /// Get a streaming link by ID.
    pub async fn get_streaming_link(&self, id: &str) -> Result<StreamingLink> {
        StreamingLink::get(self, id).await
    }
}
