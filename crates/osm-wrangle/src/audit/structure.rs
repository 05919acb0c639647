//! Structure audit: one streaming pass over the extract.
//!
//! Validates element attributes, tracks node references, counts elements and
//! contributors, and builds the tag cache for the content audit.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::TagCache;
use crate::error::Result;
use crate::input::{open_extract, ElementReader};
use crate::osm::{screen_tag, ElementKind, RawElement, TagScreen};
use crate::validation::{InvalidEntry, ValidationEngine};

/// Everything the structure audit found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    /// Elements that failed attribute validation.
    pub invalid_entries: Vec<InvalidEntry>,
    /// `nd` references to node ids not defined earlier in the file.
    pub unknown_node_refs: BTreeSet<String>,
    /// Count of every element name seen.
    pub element_counts: BTreeMap<String, usize>,
    /// Number of distinct contributor `uid`s.
    pub unique_users: usize,
    /// Observed tag key/value pairs.
    pub tag_cache: TagCache,
}

impl StructureReport {
    /// Total number of elements read.
    pub fn total_elements(&self) -> usize {
        self.element_counts.values().sum()
    }

    /// Count for one element name.
    pub fn count_of(&self, name: &str) -> usize {
        self.element_counts.get(name).copied().unwrap_or(0)
    }
}

/// Mutable state accumulated during the pass.
#[derive(Default)]
struct AuditState {
    invalid_entries: Vec<InvalidEntry>,
    node_ids: HashSet<String>,
    unknown_node_refs: BTreeSet<String>,
    element_counts: BTreeMap<String, usize>,
    users: HashSet<String>,
    tag_cache: TagCache,
}

/// Runs the structure audit.
pub struct StructureAuditor {
    validation: ValidationEngine,
}

impl StructureAuditor {
    /// Create an auditor with the default validators.
    pub fn new() -> Self {
        Self {
            validation: ValidationEngine::new(),
        }
    }

    /// Audit an extract on disk. The returned cache carries the file's metadata.
    pub fn audit(&self, path: impl AsRef<Path>) -> Result<StructureReport> {
        let path = path.as_ref();
        info!(path = %path.display(), "auditing extract structure");

        let mut reader = open_extract(path)?;
        let mut state = AuditState::default();
        self.run(&mut reader, &mut state)?;

        let source = reader.into_metadata(path);
        state.tag_cache = state.tag_cache.with_source(source);

        Ok(self.finish(state))
    }

    /// Audit any buffered XML source.
    pub fn audit_reader<R: BufRead>(&self, source: R) -> Result<StructureReport> {
        let mut reader = ElementReader::new(source);
        let mut state = AuditState::default();
        self.run(&mut reader, &mut state)?;
        Ok(self.finish(state))
    }

    fn run<R: BufRead>(&self, reader: &mut ElementReader<R>, state: &mut AuditState) -> Result<()> {
        while let Some(element) = reader.next_element()? {
            self.inspect(&element, state)?;
        }
        Ok(())
    }

    fn inspect(&self, element: &RawElement, state: &mut AuditState) -> Result<()> {
        *state.element_counts.entry(element.name.clone()).or_insert(0) += 1;

        let kind = element.kind();
        let invalid = self.validation.validate(element)?;

        match kind {
            ElementKind::Node | ElementKind::Way | ElementKind::Relation => {
                state.users.insert(element.require("uid")?.to_string());
                if kind == ElementKind::Node && invalid.is_none() {
                    state.node_ids.insert(element.require("id")?.to_string());
                }
            }
            ElementKind::Nd => {
                let node_ref = element.require("ref")?;
                if !state.node_ids.contains(node_ref) {
                    state.unknown_node_refs.insert(node_ref.to_string());
                }
            }
            ElementKind::Tag => {
                if let TagScreen::Accepted { key, value } =
                    screen_tag(element.require("k")?, element.require("v")?)
                {
                    state.tag_cache.insert(key, value);
                }
            }
            ElementKind::Other(_) => {}
        }

        if let Some(entry) = invalid {
            debug!(element = %entry.element, reason = %entry.describe(), "invalid element");
            state.invalid_entries.push(entry);
        }

        Ok(())
    }

    fn finish(&self, state: AuditState) -> StructureReport {
        let report = StructureReport {
            invalid_entries: state.invalid_entries,
            unknown_node_refs: state.unknown_node_refs,
            element_counts: state.element_counts,
            unique_users: state.users.len(),
            tag_cache: state.tag_cache,
        };

        info!(
            elements = report.total_elements(),
            invalid = report.invalid_entries.len(),
            unknown_refs = report.unknown_node_refs.len(),
            users = report.unique_users,
            tag_keys = report.tag_cache.key_count(),
            "structure audit complete"
        );

        report
    }
}

impl Default for StructureAuditor {
    fn default() -> Self {
        Self::new()
    }
}
