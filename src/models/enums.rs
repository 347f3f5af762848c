//! Categorical attribute values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KitsuError;

macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// All values, in API documentation order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value as sent to and received from the API.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = KitsuError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| {
                        KitsuError::InvalidArgument(format!(
                            "'{}' is not a valid {}",
                            s,
                            stringify!($name)
                        ))
                    })
            }
        }
    };
}

api_enum! {
    /// Audience age rating.
    AgeRating {
        /// General audiences.
        G => "G",
        /// Parental guidance suggested.
        PG => "PG",
        /// Restricted.
        R => "R",
        /// Explicit.
        R18 => "R18",
    }
}

api_enum! {
    /// Release status of an anime or manga.
    Status {
        Current => "current",
        Finished => "finished",
        Tba => "tba",
        Unreleased => "unreleased",
        Upcoming => "upcoming",
    }
}

api_enum! {
    /// Broadcast season.
    Season {
        Spring => "spring",
        Summer => "summer",
        Fall => "fall",
        Winter => "winter",
    }
}

api_enum! {
    /// Anime format.
    AnimeSubtype {
        Ona => "ONA",
        Ova => "OVA",
        Tv => "TV",
        Movie => "movie",
        Music => "music",
        Special => "special",
    }
}

api_enum! {
    /// Manga format.
    MangaSubtype {
        Doujin => "doujin",
        Manga => "manga",
        Manhua => "manhua",
        Manhwa => "manhwa",
        Novel => "novel",
        /// Original English-language manga.
        Oel => "oel",
        Oneshot => "oneshot",
    }
}
