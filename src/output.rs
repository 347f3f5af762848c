//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Anime, Category, Chapter, Character, Episode, Manga, StreamingLink};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

/// Header line followed by a divider at least 30 wide.
fn header(label: &str, name: &str) -> Vec<String> {
    let header = format!("{}: {}", label, name);
    let divider = "─".repeat(header.chars().count().max(30));
    vec![header, divider]
}

fn push_opt<T: std::fmt::Display>(lines: &mut Vec<String>, label: &str, value: Option<T>) {
    if let Some(value) = value {
        lines.push(format!("{:<16}{}", format!("{}:", label), value));
    }
}

fn rating(value: Option<f64>) -> Option<String> {
    value.map(|r| format!("{:.2}/100", r))
}

impl PrettyPrint for Anime {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Anime", self.title().unwrap_or(&self.id));

        lines.push(format!("{:<16}{}", "ID:", self.id));
        push_opt(&mut lines, "Canonical", self.canonical_title());
        push_opt(&mut lines, "Type", attrs.subtype);
        push_opt(&mut lines, "Status", attrs.status);
        push_opt(&mut lines, "Episodes", attrs.episode_count);
        push_opt(&mut lines, "Ep. Length", attrs.episode_length.map(|m| format!("{} min", m)));
        push_opt(&mut lines, "Started", attrs.start_date);
        push_opt(&mut lines, "Ended", attrs.end_date);
        push_opt(&mut lines, "Age Rating", attrs.age_rating);
        push_opt(&mut lines, "Rating", rating(attrs.average_rating));
        push_opt(&mut lines, "Popularity", attrs.popularity_rank.map(|r| format!("#{}", r)));
        push_opt(&mut lines, "URL", self.url());

        lines.join("\n")
    }
}

impl PrettyPrint for Manga {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Manga", self.title().unwrap_or(&self.id));

        lines.push(format!("{:<16}{}", "ID:", self.id));
        push_opt(&mut lines, "Canonical", self.canonical_title());
        push_opt(&mut lines, "Type", attrs.subtype);
        push_opt(&mut lines, "Status", attrs.status);
        push_opt(&mut lines, "Chapters", attrs.chapter_count);
        push_opt(&mut lines, "Volumes", attrs.volume_count);
        push_opt(&mut lines, "Serialization", attrs.serialization.as_deref());
        push_opt(&mut lines, "Started", attrs.start_date);
        push_opt(&mut lines, "Ended", attrs.end_date);
        push_opt(&mut lines, "Rating", rating(attrs.average_rating));
        push_opt(&mut lines, "URL", self.url());

        lines.join("\n")
    }
}

impl PrettyPrint for Character {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Character", self.name().unwrap_or(&self.id));

        lines.push(format!("{:<16}{}", "ID:", self.id));
        if !attrs.other_names.is_empty() {
            lines.push(format!("{:<16}{}", "Also Known As:", attrs.other_names.join(", ")));
        }
        push_opt(&mut lines, "MAL ID", attrs.mal_id);
        push_opt(&mut lines, "URL", self.url());

        lines.join("\n")
    }
}

impl PrettyPrint for Episode {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Episode", self.title().unwrap_or(&self.id));

        lines.push(format!("{:<16}{}", "ID:", self.id));
        push_opt(&mut lines, "Season", attrs.season_number);
        push_opt(&mut lines, "Number", attrs.number);
        push_opt(&mut lines, "Aired", attrs.airdate);
        push_opt(&mut lines, "Length", attrs.length.map(|m| format!("{} min", m)));

        lines.join("\n")
    }
}

impl PrettyPrint for Chapter {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Chapter", self.title().unwrap_or(&self.id));

        lines.push(format!("{:<16}{}", "ID:", self.id));
        push_opt(&mut lines, "Volume", attrs.volume_number);
        push_opt(&mut lines, "Number", attrs.number);
        push_opt(&mut lines, "Published", attrs.published);
        push_opt(&mut lines, "Pages", attrs.length);

        lines.join("\n")
    }
}

impl PrettyPrint for Category {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Category", self.title().unwrap_or(&self.id));

        lines.push(format!("{:<16}{}", "ID:", self.id));
        push_opt(&mut lines, "Slug", attrs.slug.as_deref());
        push_opt(&mut lines, "Media", attrs.total_media_count);
        if attrs.nsfw == Some(true) {
            lines.push(format!("{:<16}yes", "NSFW:"));
        }
        push_opt(&mut lines, "Description", attrs.description.as_deref());

        lines.join("\n")
    }
}

impl PrettyPrint for StreamingLink {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Streaming Link", &self.id);

        push_opt(&mut lines, "URL", self.url());
        if !attrs.subs.is_empty() {
            lines.push(format!("{:<16}{}", "Subs:", attrs.subs.join(", ")));
        }
        if !attrs.dubs.is_empty() {
            lines.push(format!("{:<16}{}", "Dubs:", attrs.dubs.join(", ")));
        }

        lines.join("\n")
    }
}
