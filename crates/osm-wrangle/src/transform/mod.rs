//! Record transformer: reshapes nodes and ways into nested JSON documents.

mod document;
mod engine;
mod shape;

pub use document::{Document, ValueChange, CREATED_FIELDS};
pub use engine::{output_path, RecordTransformer, TransformOptions, TransformSummary};
pub use shape::{RecordShaper, Shaped};
