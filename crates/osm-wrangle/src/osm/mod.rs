//! OSM element model and tag key handling.

mod element;
mod key;

pub use element::{ElementKind, OsmElement, RawElement};
pub use key::{has_problem_chars, screen_tag, TagKey, TagScreen};
