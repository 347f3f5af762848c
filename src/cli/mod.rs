//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the kitsuapi binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{AgeRating, Season, SearchQuery, Status};

/// Kitsu API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "kitsuapi", about = "Kitsu anime and manga API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// API base URL.
    #[arg(long, global = true, env = "KITSU_API_URL")]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single resource by ID.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// The resource ID.
        id: String,
    },

    /// Search anime, manga, or characters.
    Search {
        /// The type of resource to search.
        entity: Searchable,

        /// Free-text query (matched against names for characters).
        text: String,

        #[command(flatten)]
        filters: SearchFilters,
    },

    /// List what is trending this week.
    Trending {
        /// The type of media.
        entity: Media,
    },

    /// List the episodes of an anime.
    Episodes {
        /// The anime ID.
        id: String,
    },

    /// List the chapters of a manga.
    Chapters {
        /// The manga ID.
        id: String,
    },

    /// List the categories of an anime or manga.
    Categories {
        /// The type of media.
        entity: Media,

        /// The anime or manga ID.
        id: String,
    },

    /// List where an anime can be streamed.
    StreamingLinks {
        /// The anime ID.
        id: String,
    },
}

/// Filters and paging for `search`.
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct SearchFilters {
    /// Number of results (1-20).
    #[arg(long)]
    pub limit: Option<u32>,

    /// Number of results to skip.
    #[arg(long)]
    pub offset: Option<u32>,

    /// Broadcast season (spring, summer, fall, winter).
    #[arg(long)]
    pub season: Option<Season>,

    /// Broadcast year.
    #[arg(long)]
    pub season_year: Option<i32>,

    /// Release status (current, finished, tba, unreleased, upcoming).
    #[arg(long)]
    pub status: Option<Status>,

    /// Format (e.g. TV, movie for anime; manga, novel for manga).
    #[arg(long)]
    pub subtype: Option<String>,

    /// Age rating (G, PG, R, R18). Repeatable.
    #[arg(long = "age-rating")]
    pub age_ratings: Vec<AgeRating>,

    /// Category slug. Repeatable.
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

impl SearchFilters {
    /// Build a query for `text` with these filters applied.
    ///
    /// The subtype is passed through as given; the API rejects values that
    /// do not apply to the searched type.
    pub fn to_query(&self, text: &str) -> SearchQuery {
        let mut query = SearchQuery::new(text);

        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        if let Some(offset) = self.offset {
            query = query.offset(offset);
        }
        if let Some(season) = self.season {
            query = query.season(season);
        }
        if let Some(year) = self.season_year {
            query = query.season_year(year);
        }
        if let Some(status) = self.status {
            query = query.status(status);
        }
        if let Some(ref subtype) = self.subtype {
            query = query.filter("subtype", subtype);
        }
        if !self.age_ratings.is_empty() {
            query = query.age_ratings(&self.age_ratings);
        }
        if !self.categories.is_empty() {
            query = query.categories(&self.categories);
        }
        query
    }
}

/// Resource types that can be fetched by ID.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// An anime.
    Anime,
    /// A manga.
    Manga,
    /// A character.
    #[value(alias = "characters")]
    Character,
    /// An anime episode.
    #[value(alias = "episodes")]
    Episode,
    /// A manga chapter.
    #[value(alias = "chapters")]
    Chapter,
    /// A genre or theme category.
    #[value(alias = "categories")]
    Category,
    /// A legal streaming source.
    #[value(alias = "streaming-links")]
    StreamingLink,
}

/// Resource types that support text search.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Searchable {
    Anime,
    Manga,
    #[value(alias = "characters")]
    Character,
}

/// Media types.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Media {
    Anime,
    Manga,
}
