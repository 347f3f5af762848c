//! Kitsu resource model types.

mod anime;
mod category;
mod chapter;
mod character;
mod common;
mod enums;
mod episode;
mod manga;
pub(crate) mod related;
mod streaming_link;

pub use anime::*;
pub use category::*;
pub use chapter::*;
pub use character::*;
pub use common::*;
pub use enums::*;
pub use episode::*;
pub use manga::*;
pub use streaming_link::*;
