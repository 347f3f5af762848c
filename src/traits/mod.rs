//! Trait definitions for Kitsu operations.
//!
//! Each model type implements [`Resource`] to name its endpoint, and opts
//! into the lookups its endpoint supports.

use serde::de::DeserializeOwned;

use crate::error::{KitsuError, Result};

mod get;
mod search;
mod trending;

pub use get::Get;
pub use search::Search;
pub use trending::Trending;

/// A Kitsu resource type with its own endpoint.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// The JSON:API `type` of this resource (e.g. `"streamingLinks"`).
    const KIND: &'static str;

    /// The endpoint path relative to the API base (e.g. `"streaming-links"`).
    const PATH: &'static str;

    /// The resource ID.
    fn id(&self) -> &str;
}

/// Build `<path>/<id>`, rejecting ids that would not name a single resource.
///
/// `.` and `..` survive percent-encoding and would be resolved away by URL
/// joining, and an empty id addresses the collection.
pub(crate) fn resource_path(path: &str, id: &str) -> Result<String> {
    if id.trim().is_empty() || id == "." || id == ".." {
        return Err(KitsuError::InvalidArgument(format!(
            "'{id}' is not a valid {path} id"
        )));
    }
    Ok(format!("{}/{}", path, urlencoding::encode(id)))
}
