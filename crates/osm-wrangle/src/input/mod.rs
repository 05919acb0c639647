//! Streaming input over OSM XML extracts.

mod reader;
mod source;

pub use reader::{open_extract, ElementReader, FileSource, OsmElements};
pub use source::{HashingReader, SourceMetadata};
