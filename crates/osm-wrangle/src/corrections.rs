//! Correction table read from the reviewed audit sheet.
//!
//! The sheet is the content audit output with a fourth `Correction` column
//! filled in by hand. Rows whose correction is blank mean "leave as is".

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, WrangleError};

const TAG_K: &str = "Tag K";
const TAG_VALUE: &str = "Tag Value";
const CORRECTION: &str = "Correction";

/// (key identifier, original value) → replacement value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionTable {
    entries: HashMap<String, HashMap<String, String>>,
}

impl CorrectionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the reviewed sheet from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| WrangleError::io(path, e))?;
        let table = Self::from_reader(file, path)?;
        info!(path = %path.display(), corrections = table.len(), "loaded correction table");
        Ok(table)
    }

    /// Read a reviewed sheet; `origin` is only used in error messages.
    pub fn from_reader<R: Read>(source: R, origin: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| WrangleError::MissingColumn {
                    path: origin.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let key_col = column(TAG_K)?;
        let value_col = column(TAG_VALUE)?;
        let correction_col = column(CORRECTION)?;

        let mut table = Self::new();
        for result in reader.records() {
            let record = result?;
            let correction = record.get(correction_col).unwrap_or("").trim();
            if correction.is_empty() {
                continue;
            }

            let key = record.get(key_col).unwrap_or("");
            let value = record.get(value_col).unwrap_or("");
            debug!(key, value, correction, "correction");
            table.insert(key, value, correction);
        }

        Ok(table)
    }

    /// Add or replace a correction.
    pub fn insert(
        &mut self,
        identifier: impl Into<String>,
        value: impl Into<String>,
        correction: impl Into<String>,
    ) {
        self.entries
            .entry(identifier.into())
            .or_default()
            .insert(value.into(), correction.into());
    }

    /// Replacement for a value under a key identifier, if one was recorded.
    pub fn lookup(&self, identifier: &str, value: &str) -> Option<&str> {
        self.entries
            .get(identifier)
            .and_then(|values| values.get(value))
            .map(String::as_str)
    }

    /// Number of corrections.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// True if the table holds no corrections.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
