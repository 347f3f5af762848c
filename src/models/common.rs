//! Types shared by several models.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::decode;

/// Public Kitsu website, used to build links to media pages.
pub const SITE_URL: &str = "https://kitsu.io";

/// Localized titles or names, in the order the API listed them.
///
/// Keys are locale codes such as `en`, `en_jp` or `ja_jp`. `null` entries
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Titles(Vec<(String, String)>);

impl Titles {
    /// The title for a locale, if present and non-empty.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, value)| key == locale && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    /// The first non-empty title, in API order.
    pub fn first(&self) -> Option<&str> {
        self.0
            .iter()
            .map(|(_, value)| value.as_str())
            .find(|value| !value.is_empty())
    }

    /// English if available, then romanized Japanese, then the first
    /// non-empty title.
    pub fn preferred(&self) -> Option<&str> {
        self.get("en")
            .or_else(|| self.get("en_jp"))
            .or_else(|| self.first())
    }

    /// Iterate over `(locale, title)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Titles {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Titles(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for Titles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for Titles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TitlesVisitor)
    }
}

/// Reads a locale map in document order. Any other shape yields no titles.
struct TitlesVisitor;

impl<'de> Visitor<'de> for TitlesVisitor {
    type Value = Titles;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of locale to title")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Titles, A::Error> {
        let mut entries = Vec::new();
        while let Some((locale, value)) = map.next_entry::<String, Value>()? {
            if let Value::String(title) = value {
                entries.push((locale, title));
            }
        }
        Ok(Titles(entries))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Titles, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Titles::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Titles, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_none<E: de::Error>(self) -> Result<Titles, E> {
        Ok(Titles::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Titles, E> {
        Ok(Titles::default())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Titles, E> {
        Ok(Titles::default())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Titles, E> {
        Ok(Titles::default())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Titles, E> {
        Ok(Titles::default())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Titles, E> {
        Ok(Titles::default())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Titles, E> {
        Ok(Titles::default())
    }
}

/// Image variant sizes offered by Kitsu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSize {
    Tiny,
    Small,
    Medium,
    Large,
    #[default]
    Original,
}

/// URLs of one image in its size variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "decode::string", skip_serializing_if = "Option::is_none")]
    pub tiny: Option<String>,
    #[serde(default, deserialize_with = "decode::string", skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, deserialize_with = "decode::string", skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "decode::string", skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, deserialize_with = "decode::string", skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

impl Image {
    /// URL of the given size variant.
    pub fn url(&self, size: ImageSize) -> Option<&str> {
        match size {
            ImageSize::Tiny => self.tiny.as_deref(),
            ImageSize::Small => self.small.as_deref(),
            ImageSize::Medium => self.medium.as_deref(),
            ImageSize::Large => self.large.as_deref(),
            ImageSize::Original => self.original.as_deref(),
        }
    }

    /// URL of the largest variant present.
    pub fn largest(&self) -> Option<&str> {
        self.original
            .as_deref()
            .or(self.large.as_deref())
            .or(self.medium.as_deref())
            .or(self.small.as_deref())
            .or(self.tiny.as_deref())
    }
}
