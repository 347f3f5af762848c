//! Pagination utilities for Kitsu collection responses.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::{KitsuClient, NO_QUERY};
use crate::error::Result;
use crate::jsonapi::{self, Document, Links};
use crate::traits::Resource;

/// A page of results from a collection endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages (if known).
    pub total: Option<u64>,
    /// Navigation links (`first`, `prev`, `next`, `last`).
    pub links: Links,
    /// Side-loaded resources requested with `include`.
    #[serde(skip)]
    pub included: Vec<Value>,
}

impl<T> Page<T> {
    /// Build a page from a collection document.
    #[must_use]
    pub fn from_document(document: Document<Vec<T>>) -> Self {
        Self {
            items: document.data,
            total: document.meta.count,
            links: document.links,
            included: document.included,
        }
    }

    /// Whether there is a next page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.links.next.is_some()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            links: self.links,
            included: self.included,
        }
    }

    /// Decode the side-loaded resources of type `U`.
    pub fn included<U: Resource>(&self) -> Result<Vec<U>> {
        jsonapi::included_of(&self.included)
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Fetch the page after this one, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`KitsuError::ForeignLink`](crate::KitsuError::ForeignLink)
    /// if the `next` link is not on the client's API host.
    pub async fn next_page(&self, client: &KitsuClient) -> Result<Option<Page<T>>> {
        match &self.links.next {
            Some(next) => {
                let document: Document<Vec<T>> = client.follow_json(next, NO_QUERY).await?;
                Ok(Some(Page::from_document(document)))
            }
            None => Ok(None),
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
