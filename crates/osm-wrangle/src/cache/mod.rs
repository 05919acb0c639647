//! Tag key/value cache shared between the structure and content audits.
//!
//! The structure audit records every distinct value seen for every tag key and
//! persists the result, so the content audit can run without a second scan of
//! the extract.
//!
//! ```text
//! data/
//! ├── qc.osm          # Source extract
//! └── tagKV.json      # Tag cache
//! ```

mod persistence;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::input::SourceMetadata;

pub use persistence::{cache_path, DEFAULT_CACHE_FILE};

/// Tag key → set of distinct observed values.
pub type TagValues = BTreeMap<String, BTreeSet<String>>;

/// Persisted snapshot of all observed tag key/value pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCache {
    /// The extract the tags were read from, when known.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<SourceMetadata>,
    /// Observed values per key.
    pub tags: TagValues,
}

impl TagCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            source: None,
            tags: TagValues::new(),
        }
    }

    /// Set the source metadata.
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    /// Record a value for a key; duplicates are ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.entry(key.into()).or_default().insert(value.into());
    }

    /// Distinct values recorded for a key.
    pub fn values(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.tags.get(key)
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.tags.len()
    }

    /// Number of distinct (key, value) pairs.
    pub fn pair_count(&self) -> usize {
        self.tags.values().map(BTreeSet::len).sum()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for TagCache {
    fn default() -> Self {
        Self::new()
    }
}
