//! CLI command implementations.

pub mod content;
pub mod structure;
pub mod transform;

use std::path::PathBuf;

use osm_wrangle::RuleSet;

/// Built-in rule tables, or the ones in `path`.
fn load_rules(path: Option<PathBuf>) -> Result<RuleSet, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => RuleSet::load(path)?,
        None => RuleSet::default(),
    })
}
