//! Query construction for collection endpoints.
//!
//! Kitsu uses bracketed parameter names: `filter[seasonYear]=2022`,
//! `page[limit]=5`, `page[offset]=10`.

use std::fmt::Display;

use crate::models::{AgeRating, AnimeSubtype, MangaSubtype, Season, Status};

/// Smallest page size the API accepts.
pub const MIN_PAGE_LIMIT: u32 = 1;

/// Largest page size the API accepts.
pub const MAX_PAGE_LIMIT: u32 = 20;

/// Filters and pagination for a search request.
///
/// # Example
///
/// ```
/// use kitsuapi::{SearchQuery, Season};
///
/// let query = SearchQuery::new("bebop")
///     .season(Season::Spring)
///     .season_year(1998)
///     .limit(50);
///
/// let params = query.to_params("text");
/// assert_eq!(params[0], ("filter[text]".to_string(), "bebop".to_string()));
/// assert!(params.contains(&("page[limit]".to_string(), "20".to_string())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    text: Option<String>,
    filters: Vec<(String, String)>,
    limit: Option<u32>,
    offset: Option<u32>,
    sort: Option<String>,
    include: Vec<String>,
}

impl SearchQuery {
    /// Create a free-text query.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set the free-text part of the query.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set `filter[<key>]`, replacing any previous value for the key.
    #[must_use]
    pub fn filter(mut self, key: &str, value: impl Display) -> Self {
        let value = value.to_string();
        match self.filters.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.filters.push((key.to_string(), value)),
        }
        self
    }

    /// Restrict to a broadcast season.
    #[must_use]
    pub fn season(self, season: Season) -> Self {
        self.filter("season", season)
    }

    /// Restrict to a season year.
    #[must_use]
    pub fn season_year(self, year: i32) -> Self {
        self.filter("seasonYear", year)
    }

    /// Restrict to a release status.
    #[must_use]
    pub fn status(self, status: Status) -> Self {
        self.filter("status", status)
    }

    /// Restrict to one or more age ratings.
    #[must_use]
    pub fn age_ratings(self, ratings: &[AgeRating]) -> Self {
        self.filter("ageRating", join(ratings))
    }

    /// Restrict anime searches to a format.
    #[must_use]
    pub fn anime_subtype(self, subtype: AnimeSubtype) -> Self {
        self.filter("subtype", subtype)
    }

    /// Restrict manga searches to a format.
    #[must_use]
    pub fn manga_subtype(self, subtype: MangaSubtype) -> Self {
        self.filter("subtype", subtype)
    }

    /// Restrict to media tagged with all of the given category slugs.
    #[must_use]
    pub fn categories<S: AsRef<str>>(self, slugs: &[S]) -> Self {
        let joined = slugs
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        self.filter("categories", joined)
    }

    /// Number of results per page, clamped to the API range.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of results to skip.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sort expression, e.g. `-averageRating`.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Side-load a relationship into the response's `included` list.
    #[must_use]
    pub fn include(mut self, relationship: impl Into<String>) -> Self {
        self.include.push(relationship.into());
        self
    }

    /// Render the query as request parameters.
    ///
    /// `text_filter` names the filter that carries the free text
    /// (`text` for media, `name` for characters).
    pub fn to_params(&self, text_filter: &str) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(text) = &self.text {
            params.push((format!("filter[{text_filter}]"), text.clone()));
        }
        for (key, value) in &self.filters {
            params.push((format!("filter[{key}]"), value.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("page[limit]".to_string(), clamp_limit(limit).to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("page[offset]".to_string(), offset.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if !self.include.is_empty() {
            params.push(("include".to_string(), self.include.join(",")));
        }

        params
    }
}

/// Clamp a page size into the range the API accepts.
pub fn clamp_limit(limit: u32) -> u32 {
    let clamped = limit.clamp(MIN_PAGE_LIMIT, MAX_PAGE_LIMIT);
    if clamped != limit {
        tracing::debug!(requested = limit, clamped, "page limit out of range");
    }
    clamped
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
