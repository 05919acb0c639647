//! Error types for the osm-wrangle library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for osm-wrangle operations.
#[derive(Debug, Error)]
pub enum WrangleError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML in the source extract.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute syntax inside an XML start tag.
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// A required attribute is absent from an element.
    #[error("<{element}> element is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A review or correction sheet is missing an expected column.
    #[error("Missing column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error saving or loading the tag cache.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl WrangleError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WrangleError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a missing-attribute error.
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        WrangleError::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }
}

/// Result type alias for osm-wrangle operations.
pub type Result<T> = std::result::Result<T, WrangleError>;
