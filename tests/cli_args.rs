//! CLI argument parsing tests.

use clap::Parser;
use kitsuapi::cli::{Cli, Command, Entity, Media, SearchFilters, Searchable};
use kitsuapi::{AgeRating, Season, Status};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["kitsuapi", "get", "anime", "1"]);

    assert!(!cli.json);
    assert_eq!(cli.verbose, 0);
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Anime);
            assert_eq!(id, "1");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_kebab_case_entities() {
    let cli = Cli::parse_from(["kitsuapi", "get", "streaming-link", "2"]);
    match cli.command {
        Command::Get { entity, .. } => assert_eq!(entity, Entity::StreamingLink),
        _ => panic!("Expected Get command"),
    }

    let cli = Cli::parse_from(["kitsuapi", "get", "characters", "1"]);
    match cli.command {
        Command::Get { entity, .. } => assert_eq!(entity, Entity::Character),
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_search_with_filters() {
    let cli = Cli::parse_from([
        "kitsuapi",
        "search",
        "anime",
        "attack on titan",
        "--limit",
        "5",
        "--season",
        "spring",
        "--season-year",
        "2013",
        "--status",
        "finished",
        "--subtype",
        "TV",
        "--age-rating",
        "R",
        "--age-rating",
        "pg",
        "--category",
        "action",
    ]);

    match cli.command {
        Command::Search {
            entity,
            text,
            filters,
        } => {
            assert_eq!(entity, Searchable::Anime);
            assert_eq!(text, "attack on titan");
            assert_eq!(filters.limit, Some(5));
            assert_eq!(filters.season, Some(Season::Spring));
            assert_eq!(filters.season_year, Some(2013));
            assert_eq!(filters.status, Some(Status::Finished));
            assert_eq!(filters.subtype.as_deref(), Some("TV"));
            assert_eq!(filters.age_ratings, vec![AgeRating::R, AgeRating::PG]);
            assert_eq!(filters.categories, vec!["action"]);
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn test_cli_rejects_invalid_enum_value() {
    let result = Cli::try_parse_from(["kitsuapi", "search", "anime", "x", "--season", "monsoon"]);
    assert!(result.is_err());

    let result = Cli::try_parse_from(["kitsuapi", "search", "episode", "x"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_related_subcommands() {
    let cli = Cli::parse_from(["kitsuapi", "episodes", "1"]);
    assert!(matches!(cli.command, Command::Episodes { ref id } if id == "1"));

    let cli = Cli::parse_from(["kitsuapi", "streaming-links", "1"]);
    assert!(matches!(cli.command, Command::StreamingLinks { ref id } if id == "1"));

    let cli = Cli::parse_from(["kitsuapi", "categories", "manga", "38"]);
    match cli.command {
        Command::Categories { entity, id } => {
            assert_eq!(entity, Media::Manga);
            assert_eq!(id, "38");
        }
        _ => panic!("Expected Categories command"),
    }
}

#[test]
fn test_cli_global_flags() {
    let cli = Cli::parse_from([
        "kitsuapi",
        "trending",
        "manga",
        "--json",
        "-vv",
        "--base-url",
        "http://localhost:9000/api/edge",
    ]);

    assert!(cli.json);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000/api/edge"));
    assert!(matches!(cli.command, Command::Trending { entity: Media::Manga }));
}

#[test]
fn test_search_filters_to_query() {
    let filters = SearchFilters {
        limit: Some(50),
        offset: Some(20),
        season: Some(Season::Fall),
        age_ratings: vec![AgeRating::G, AgeRating::PG],
        categories: vec!["comedy".to_string(), "school".to_string()],
        ..Default::default()
    };

    let params = filters.to_query("k-on").to_params("text");
    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("filter[text]"), Some("k-on"));
    assert_eq!(get("filter[season]"), Some("fall"));
    assert_eq!(get("filter[ageRating]"), Some("G,PG"));
    assert_eq!(get("filter[categories]"), Some("comedy,school"));
    assert_eq!(get("page[limit]"), Some("20"));
    assert_eq!(get("page[offset]"), Some("20"));
    assert_eq!(get("filter[subtype]"), None);
}
