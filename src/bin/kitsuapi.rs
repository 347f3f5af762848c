//! Kitsu API CLI binary.
//!
//! A command-line interface for browsing the Kitsu anime and manga database.

use clap::Parser;
use kitsuapi::cli::{Cli, Command, Entity, Media, Searchable};
use kitsuapi::{
    Anime, Category, Chapter, Character, ClientConfig, Episode, Get, KitsuClient, Manga, Page,
    PrettyPrint, Search, StreamingLink,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Check KITSU_API_URL and the KITSU_*_SECS environment variables");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&client, cli).await;
    client.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "kitsuapi=debug",
        _ => "kitsuapi=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(cli: &Cli) -> kitsuapi::Result<KitsuClient> {
    let mut config = ClientConfig::from_env()?;
    if let Some(ref base_url) = cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    KitsuClient::with_config(config)
}

async fn run(client: &KitsuClient, cli: Cli) -> kitsuapi::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, json).await,
        Command::Search {
            entity,
            text,
            filters,
        } => {
            let query = filters.to_query(&text);
            match entity {
                Searchable::Anime => {
                    let page = Anime::search_page(client, &query).await?;
                    output_page(&page, json, |x| AnimeRow::from(x))
                }
                Searchable::Manga => {
                    let page = Manga::search_page(client, &query).await?;
                    output_page(&page, json, |x| MangaRow::from(x))
                }
                Searchable::Character => {
                    let page = Character::search_page(client, &query).await?;
                    output_page(&page, json, |x| CharacterRow::from(x))
                }
            }
        }
        Command::Trending { entity } => match entity {
            Media::Anime => {
                let anime = client.trending_anime().await?;
                output_list(&anime, json, |x| AnimeRow::from(x))
            }
            Media::Manga => {
                let manga = client.trending_manga().await?;
                output_list(&manga, json, |x| MangaRow::from(x))
            }
        },
        Command::Episodes { id } => {
            let anime = client.get_anime(&id).await?;
            output_list(anime.episodes(client).await?, json, |x| EpisodeRow::from(x))
        }
        Command::Chapters { id } => {
            let manga = client.get_manga(&id).await?;
            output_list(manga.chapters(client).await?, json, |x| ChapterRow::from(x))
        }
        Command::Categories { entity, id } => match entity {
            Media::Anime => {
                let anime = client.get_anime(&id).await?;
                output_list(anime.categories(client).await?, json, |x| CategoryRow::from(x))
            }
            Media::Manga => {
                let manga = client.get_manga(&id).await?;
                output_list(manga.categories(client).await?, json, |x| CategoryRow::from(x))
            }
        },
        Command::StreamingLinks { id } => {
            let anime = client.get_anime(&id).await?;
            output_list(anime.streaming_links(client).await?, json, |x| StreamingLinkRow::from(x))
        }
    }
}

async fn handle_get(
    client: &KitsuClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> kitsuapi::Result<()> {
    match entity {
        Entity::Anime => output_single(&Anime::get(client, id).await?, json),
        Entity::Manga => output_single(&Manga::get(client, id).await?, json),
        Entity::Character => output_single(&Character::get(client, id).await?, json),
        Entity::Episode => output_single(&Episode::get(client, id).await?, json),
        Entity::Chapter => output_single(&Chapter::get(client, id).await?, json),
        Entity::Category => output_single(&Category::get(client, id).await?, json),
        Entity::StreamingLink => output_single(&StreamingLink::get(client, id).await?, json),
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> kitsuapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> kitsuapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else if items.is_empty() {
        println!("No results");
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> kitsuapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    output_list(&page.items, json, to_row)?;
    if !json && !page.is_empty() {
        match page.total {
            Some(total) => println!("\n{} of {} total results", page.len(), total),
            None if page.has_more() => println!("\n{} results (more available)", page.len()),
            None => {}
        }
    }
    Ok(())
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct AnimeRow {
    id: String,
    title: String,
    #[tabled(rename = "type")]
    subtype: String,
    episodes: String,
    rating: String,
}

impl From<&Anime> for AnimeRow {
    fn from(a: &Anime) -> Self {
        Self {
            id: a.id.clone(),
            title: or_dash(a.title()),
            subtype: or_dash(a.attributes.subtype),
            episodes: or_dash(a.attributes.episode_count),
            rating: or_dash(a.average_rating()),
        }
    }
}

#[derive(Tabled)]
struct MangaRow {
    id: String,
    title: String,
    #[tabled(rename = "type")]
    subtype: String,
    chapters: String,
    rating: String,
}

impl From<&Manga> for MangaRow {
    fn from(m: &Manga) -> Self {
        Self {
            id: m.id.clone(),
            title: or_dash(m.title()),
            subtype: or_dash(m.attributes.subtype),
            chapters: or_dash(m.attributes.chapter_count),
            rating: or_dash(m.average_rating()),
        }
    }
}

#[derive(Tabled)]
struct CharacterRow {
    id: String,
    name: String,
    url: String,
}

impl From<&Character> for CharacterRow {
    fn from(c: &Character) -> Self {
        Self {
            id: c.id.clone(),
            name: or_dash(c.name()),
            url: or_dash(c.url()),
        }
    }
}

#[derive(Tabled)]
struct EpisodeRow {
    id: String,
    number: String,
    title: String,
    aired: String,
}

impl From<&Episode> for EpisodeRow {
    fn from(e: &Episode) -> Self {
        Self {
            id: e.id.clone(),
            number: or_dash(e.attributes.number),
            title: or_dash(e.title()),
            aired: or_dash(e.attributes.airdate),
        }
    }
}

#[derive(Tabled)]
struct ChapterRow {
    id: String,
    volume: String,
    number: String,
    title: String,
}

impl From<&Chapter> for ChapterRow {
    fn from(c: &Chapter) -> Self {
        Self {
            id: c.id.clone(),
            volume: or_dash(c.attributes.volume_number),
            number: or_dash(c.attributes.number),
            title: or_dash(c.title()),
        }
    }
}

#[derive(Tabled)]
struct CategoryRow {
    id: String,
    title: String,
    slug: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.clone(),
            title: or_dash(c.title()),
            slug: or_dash(c.attributes.slug.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct StreamingLinkRow {
    id: String,
    url: String,
    subs: String,
    dubs: String,
}

impl From<&StreamingLink> for StreamingLinkRow {
    fn from(s: &StreamingLink) -> Self {
        Self {
            id: s.id.clone(),
            url: or_dash(s.url()),
            subs: s.attributes.subs.join(", "),
            dubs: s.attributes.dubs.join(", "),
        }
    }
}
