//! Record transformer: extract in, newline-delimited JSON out.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::corrections::CorrectionTable;
use crate::error::{Result, WrangleError};
use crate::input::{open_extract, ElementReader, OsmElements};
use crate::rules::RuleSet;

use super::document::Document;
use super::shape::{RecordShaper, Shaped};

/// Output switches for the transformer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Drop elements whose address is outside the home area.
    pub qc_only: bool,
    /// Indent each JSON document.
    pub pretty: bool,
}

/// Counts from one transformer run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSummary {
    /// Top-level elements read.
    pub elements_read: usize,
    /// Documents written.
    pub documents_written: usize,
    /// Nodes and ways dropped by the QC-only filter.
    pub filtered: usize,
    /// Tag values changed by a correction or street normalization.
    pub values_corrected: usize,
    /// Distinct original → corrected values.
    pub corrected: BTreeMap<String, String>,
}

/// Applies corrections and reshapes nodes and ways into JSON documents.
pub struct RecordTransformer {
    rules: RuleSet,
    corrections: CorrectionTable,
    options: TransformOptions,
}

impl RecordTransformer {
    /// Create a transformer.
    pub fn new(rules: RuleSet, corrections: CorrectionTable) -> Self {
        Self {
            rules,
            corrections,
            options: TransformOptions::default(),
        }
    }

    /// Set output options.
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Transform an extract on disk into an NDJSON file.
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<TransformSummary> {
        let input = input.as_ref();
        let output = output.as_ref();
        info!(
            input = %input.display(),
            output = %output.display(),
            qc_only = self.options.qc_only,
            "transforming extract"
        );

        let elements = open_extract(input)?.grouped();
        let file = File::create(output).map_err(|e| WrangleError::io(output, e))?;
        let mut writer = BufWriter::new(file);

        let summary = self.transform(elements, &mut writer)?;
        writer.flush().map_err(|e| WrangleError::io(output, e))?;
        Ok(summary)
    }

    /// Transform any buffered XML source, writing documents to `writer`.
    pub fn transform_reader<R: BufRead, W: Write>(&self, source: R, writer: W) -> Result<TransformSummary> {
        self.transform(ElementReader::new(source).grouped(), writer)
    }

    fn transform<R: BufRead, W: Write>(
        &self,
        mut elements: OsmElements<R>,
        mut writer: W,
    ) -> Result<TransformSummary> {
        let shaper = RecordShaper::new(&self.corrections, &self.rules, self.options.qc_only);
        let mut summary = TransformSummary::default();

        while let Some(element) = elements.next_group()? {
            summary.elements_read += 1;

            match shaper.shape(&element)? {
                Shaped::Emit(doc) => {
                    record_changes(&mut summary, &doc);
                    self.write_document(&mut writer, &doc)?;
                    summary.documents_written += 1;
                }
                Shaped::Filtered(doc) => {
                    debug!(id = doc.field("id").unwrap_or_default(), "outside home area");
                    summary.filtered += 1;
                }
                Shaped::Ignored => {}
            }
        }

        info!(
            read = summary.elements_read,
            written = summary.documents_written,
            filtered = summary.filtered,
            corrected = summary.values_corrected,
            "transform complete"
        );

        Ok(summary)
    }

    fn write_document<W: Write>(&self, writer: &mut W, doc: &Document) -> Result<()> {
        if self.options.pretty {
            serde_json::to_writer_pretty(&mut *writer, doc)?;
        } else {
            serde_json::to_writer(&mut *writer, doc)?;
        }
        writer
            .write_all(b"\n")
            .map_err(|e| WrangleError::Persistence(format!("Failed to write document: {}", e)))
    }
}

fn record_changes(summary: &mut TransformSummary, doc: &Document) {
    for change in &doc.changes {
        debug!(key = %change.key, from = %change.original, to = %change.corrected, "corrected value");
        summary.values_corrected += 1;
        summary
            .corrected
            .insert(change.original.clone(), change.corrected.clone());
    }
}

/// Default output path: `<input>.json`, or `<input>_qc.json` in QC-only mode.
///
/// ```
/// use osm_wrangle::transform::output_path;
///
/// assert_eq!(output_path("qc.osm", false).to_string_lossy(), "qc.osm.json");
/// assert_eq!(output_path("qc.osm", true).to_string_lossy(), "qc.osm_qc.json");
/// ```
pub fn output_path(input: impl AsRef<Path>, qc_only: bool) -> PathBuf {
    let mut name = input.as_ref().as_os_str().to_owned();
    name.push(if qc_only { "_qc.json" } else { ".json" });
    PathBuf::from(name)
}
