//! Persistence for the tag cache - save/load JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, WrangleError};

use super::TagCache;

/// Default cache file name, written next to the extract.
pub const DEFAULT_CACHE_FILE: &str = "tagKV.json";

impl TagCache {
    /// Save the cache to a JSON file.
    ///
    /// Keys and values are written in sorted order and no timestamps are
    /// stored, so the same extract always produces the same bytes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use osm_wrangle::TagCache;
    /// # fn example(cache: &TagCache) -> osm_wrangle::Result<()> {
    /// cache.save("tagKV.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    WrangleError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            WrangleError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| {
            WrangleError::Persistence(format!("Failed to serialize tag cache: {}", e))
        })?;
        writer.flush().map_err(|e| WrangleError::io(path, e))?;

        Ok(())
    }

    /// Load a cache from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            WrangleError::Persistence(format!(
                "Failed to open file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        let cache: TagCache = serde_json::from_reader(reader).map_err(|e| {
            WrangleError::Persistence(format!(
                "Failed to parse tag cache '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(cache)
    }
}

/// Default cache path for an extract: `tagKV.json` in the same directory.
///
/// # Example
///
/// ```
/// use osm_wrangle::cache::cache_path;
///
/// let path = cache_path("data/qc.osm");
/// assert_eq!(path.to_string_lossy(), "data/tagKV.json");
/// ```
pub fn cache_path(extract: impl AsRef<Path>) -> PathBuf {
    let parent = extract.as_ref().parent().unwrap_or(Path::new("."));
    parent.join(DEFAULT_CACHE_FILE)
}
