//! JSON:API envelope types.
//!
//! Kitsu wraps every payload in a JSON:API document:
//! `{data, included, meta, links}` on success and `{errors: [...]}` on
//! failure. Each resource in `data` carries `{id, type, attributes,
//! relationships, links}`; the model types in [`crate::models`] deserialize
//! directly from that resource shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode;
use crate::error::Result;
use crate::traits::Resource;

/// Links attached to a document, resource or relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Canonical URL of the object carrying these links.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// URL of a relationship's target collection or resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
    /// First page of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Previous page of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Next page of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Last page of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

/// One entry of a resource's `relationships` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub links: Links,
}

/// Relationships keyed by name (e.g. `episodes`, `streamingLinks`).
pub type Relationships = BTreeMap<String, Relationship>;

/// Document-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Total number of resources matching a collection request.
    #[serde(default, deserialize_with = "decode::uint")]
    pub count: Option<u64>,
}

/// A successful JSON:API document.
///
/// `D` is a single model for resource endpoints and `Vec<Model>` for
/// collection endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<D> {
    pub data: D,
    /// Side-loaded resources, kept raw until asked for by type.
    #[serde(default)]
    pub included: Vec<Value>,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub links: Links,
}

impl<D> Document<D> {
    /// Decode the included resources of type `T`.
    pub fn included_of<T: Resource>(&self) -> Result<Vec<T>> {
        included_of(&self.included)
    }
}

/// Decode the entries of `included` whose `type` matches `T`.
pub(crate) fn included_of<T: Resource>(included: &[Value]) -> Result<Vec<T>> {
    included
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some(T::KIND))
        .map(|item| Ok(serde_json::from_value(item.clone())?))
        .collect()
}

/// A failed JSON:API document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

/// One error reported by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorObject {
    #[serde(default, deserialize_with = "decode::string_lossy")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "decode::string_lossy")]
    pub detail: Option<String>,
    #[serde(default, deserialize_with = "decode::string_lossy")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "decode::string_lossy")]
    pub status: Option<String>,
}
