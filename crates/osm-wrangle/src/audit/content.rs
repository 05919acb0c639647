//! Content audit: heuristic checks on tag values, written out for manual review.
//!
//! Every value that trips a rule becomes one row of the review sheet
//! (`Comment,Tag K,Tag Value`). A reviewer adds a fourth `Correction` column
//! and the edited sheet feeds the record transformer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache::TagCache;
use crate::error::{Result, WrangleError};
use crate::input::open_extract;
use crate::osm::{screen_tag, TagKey, TagScreen};
use crate::rules::{PostcodeCheck, RuleSet};
use crate::validation::is_integer;

/// Default review sheet file name.
pub const DEFAULT_REVIEW_FILE: &str = "mapcontentAudit.csv";

/// Where the content audit gets its tag values from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSource {
    /// Scan the raw extract (tags of `node` and `way` elements).
    Xml(PathBuf),
    /// Load a cache written by the structure audit.
    Cache(PathBuf),
}

impl TagSource {
    /// Load the tag values.
    pub fn load(&self) -> Result<TagCache> {
        match self {
            TagSource::Cache(path) => {
                info!(path = %path.display(), "loading tag cache");
                TagCache::load(path)
            }
            TagSource::Xml(path) => {
                info!(path = %path.display(), "collecting tags from extract");
                collect_tags(path)
            }
        }
    }
}

/// Collect tag values from the `node` and `way` elements of an extract.
fn collect_tags(path: &Path) -> Result<TagCache> {
    let mut elements = open_extract(path)?.grouped();
    let mut cache = TagCache::new();

    while let Some(element) = elements.next_group()? {
        if !element.kind().is_shaped() {
            continue;
        }
        for tag in element.tags() {
            if let TagScreen::Accepted { key, value } = screen_tag(tag.require("k")?, tag.require("v")?)
            {
                cache.insert(key, value);
            }
        }
    }

    let source = elements.into_elements().into_metadata(path);
    Ok(cache.with_source(source))
}

/// Reason a value was flagged for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditComment {
    /// Street value contains words that aren't part of a street name.
    HasProblemWords,
    /// Street value contains punctuation that isn't part of a street name.
    HasProblemChars,
    /// Postcode is a number outside the accepted range.
    PostcodeOutOfRange,
    /// Postcode isn't a number.
    NotANumber,
    /// Value is entirely lower case.
    LowerCase,
    /// Value looks like a variant of the value sorted just before it.
    Duplicate,
    /// Anything else non-numeric: check the spelling.
    SpellingCheck,
}

impl AuditComment {
    /// Text written to the Comment column.
    pub fn label(&self) -> &'static str {
        match self {
            AuditComment::HasProblemWords => "Has problem words",
            AuditComment::HasProblemChars => "Has problem chars",
            AuditComment::PostcodeOutOfRange => "Not a Quezon City postcode",
            AuditComment::NotANumber => "Not a Number",
            AuditComment::LowerCase => "Lower Case",
            AuditComment::Duplicate => "Duplicate",
            AuditComment::SpellingCheck => "Spelling Check",
        }
    }
}

impl std::fmt::Display for AuditComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the review sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRow {
    #[serde(rename = "Comment")]
    pub comment: String,
    /// Key identifier, not the full key.
    #[serde(rename = "Tag K")]
    pub tag_k: String,
    #[serde(rename = "Tag Value")]
    pub tag_value: String,
}

impl AuditRow {
    /// Create a row.
    pub fn new(comment: AuditComment, tag_k: impl Into<String>, tag_value: impl Into<String>) -> Self {
        Self {
            comment: comment.label().to_string(),
            tag_k: tag_k.into(),
            tag_value: tag_value.into(),
        }
    }
}

/// Result of a content audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentAudit {
    /// Flagged values, grouped by key.
    pub rows: Vec<AuditRow>,
    /// Keys skipped for having more than two colon-delimited segments.
    pub skipped_keys: Vec<String>,
    /// Number of distinct values examined.
    pub values_checked: usize,
}

/// Applies the content heuristics to a tag cache.
pub struct ContentAuditor {
    rules: RuleSet,
}

impl ContentAuditor {
    /// Create an auditor with the given rule tables.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Audit every key in the cache.
    pub fn audit(&self, cache: &TagCache) -> ContentAudit {
        let mut audit = ContentAudit::default();

        for (key, values) in &cache.tags {
            let Some(tag_key) = TagKey::parse(key) else {
                warn!(key = %key, "ignoring key with more than two identifiers");
                audit.skipped_keys.push(key.clone());
                continue;
            };

            debug!(key = %key, values = values.len(), "checking values");
            audit.values_checked += values.len();
            audit
                .rows
                .extend(self.audit_values(tag_key.identifier(), values.iter().map(String::as_str)));
        }

        info!(
            keys = cache.key_count(),
            skipped = audit.skipped_keys.len(),
            flagged = audit.rows.len(),
            "content audit complete"
        );

        audit
    }

    /// Audit the distinct values of one key identifier.
    ///
    /// Values are visited in sort-key order because the duplicate check only
    /// compares each value against the last non-duplicate before it.
    pub fn audit_values<'a>(
        &self,
        identifier: &str,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Vec<AuditRow> {
        let mut sorted: Vec<(String, &str)> = values
            .into_iter()
            .map(|v| (self.rules.sort_key(identifier, v), v))
            .collect();
        sorted.sort();

        let mut rows = Vec::new();
        let mut previous: Option<String> = None;

        for (key, value) in sorted {
            let (mut comment, numeric) = self.classify(identifier, value);

            match &previous {
                Some(prev) if comment.is_none() && !numeric && key.contains(prev.as_str()) => {
                    comment = Some(AuditComment::Duplicate);
                }
                _ => previous = Some(key),
            }

            if comment.is_none() && !numeric {
                comment = Some(AuditComment::SpellingCheck);
            }

            if let Some(comment) = comment {
                rows.push(AuditRow::new(comment, identifier, value));
            }
        }

        rows
    }

    /// Apply the per-identifier rule; returns the comment (if any) and whether
    /// the value counts as numeric for the later rules.
    fn classify(&self, identifier: &str, value: &str) -> (Option<AuditComment>, bool) {
        match identifier {
            "street" => (self.audit_street(value), false),
            "postcode" => {
                let comment = match self.rules.postcodes().check(value) {
                    PostcodeCheck::Valid => None,
                    PostcodeCheck::OutOfRange => Some(AuditComment::PostcodeOutOfRange),
                    PostcodeCheck::NotANumber => Some(AuditComment::NotANumber),
                };
                (comment, true)
            }
            _ => {
                let numeric = is_integer(value);
                if !numeric && value.to_lowercase() == value {
                    (Some(AuditComment::LowerCase), false)
                } else {
                    (None, numeric)
                }
            }
        }
    }

    fn audit_street(&self, value: &str) -> Option<AuditComment> {
        if self.rules.has_problem_words(value) {
            Some(AuditComment::HasProblemWords)
        } else if self.rules.has_problem_chars(value) {
            Some(AuditComment::HasProblemChars)
        } else {
            None
        }
    }
}

impl Default for ContentAuditor {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

/// Write the review sheet. Rows that fail to serialize are logged and skipped;
/// returns the number of rows written.
pub fn write_review(path: impl AsRef<Path>, rows: &[AuditRow]) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| WrangleError::io(path, e))?;
    let written = write_review_to(BufWriter::new(file), rows)?;
    info!(path = %path.display(), rows = written, "wrote review sheet");
    Ok(written)
}

/// Write review rows, with header, to any writer.
///
/// Each row is encoded on its own, so a row that fails to encode or write
/// leaves the rest of the sheet intact. A failure on the header or the final
/// flush is an error.
pub fn write_review_to<W: Write>(mut writer: W, rows: &[AuditRow]) -> Result<usize> {
    let header = encode_record(|w| w.write_record(["Comment", "Tag K", "Tag Value"]))?;
    writer
        .write_all(&header)
        .map_err(|e| WrangleError::Persistence(format!("Failed to write review header: {}", e)))?;

    let mut written = 0;
    for row in rows {
        let result = encode_record(|w| w.serialize(row))
            .and_then(|bytes| writer.write_all(&bytes).map_err(csv::Error::from));
        match result {
            Ok(()) => written += 1,
            Err(e) => warn!(row = ?row, error = %e, "ignored review row"),
        }
    }

    writer
        .flush()
        .map_err(|e| WrangleError::Persistence(format!("Failed to flush review sheet: {}", e)))?;
    Ok(written)
}

/// Encode one CSV record into its own buffer.
fn encode_record<F>(write: F) -> csv::Result<Vec<u8>>
where
    F: FnOnce(&mut csv::Writer<Vec<u8>>) -> csv::Result<()>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    write(&mut csv_writer)?;
    csv_writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comments(rows: &[AuditRow]) -> Vec<(&str, &str)> {
        rows.iter()
            .map(|r| (r.tag_value.as_str(), r.comment.as_str()))
            .collect()
    }

    #[test]
    fn test_street_rules() {
        let auditor = ContentAuditor::default();
        let rows = auditor.audit_values(
            "street",
            [
                "4th Avenue, corner C. Cordero",
                "537 EDSA, Cubao",
                "15th",
                "15th Avenue",
            ],
        );

        assert_eq!(
            comments(&rows),
            vec![
                ("15th", "Spelling Check"),
                ("15th Avenue", "Duplicate"),
                ("4th Avenue, corner C. Cordero", "Has problem words"),
                ("537 EDSA, Cubao", "Has problem chars"),
            ]
        );
        assert!(rows.iter().all(|r| r.tag_k == "street"));
    }

    #[test]
    fn test_street_alias_makes_duplicate() {
        let auditor = ContentAuditor::default();
        let rows = auditor.audit_values("street", ["Quirino Highway", "Quirino Hiway"]);
        assert_eq!(
            comments(&rows),
            vec![
                ("Quirino Highway", "Spelling Check"),
                ("Quirino Hiway", "Duplicate"),
            ]
        );
    }

    #[test]
    fn test_postcode_rules() {
        let auditor = ContentAuditor::default();
        let rows = auditor.audit_values("postcode", ["1101", "2000", "QC"]);
        assert_eq!(
            comments(&rows),
            vec![("2000", "Not a Quezon City postcode"), ("QC", "Not a Number")]
        );
    }

    #[test]
    fn test_wide_integers_are_numbers() {
        let auditor = ContentAuditor::default();

        let rows = auditor.audit_values("postcode", ["99999999999999999999"]);
        assert_eq!(
            comments(&rows),
            vec![("99999999999999999999", "Not a Quezon City postcode")]
        );

        let rows = auditor.audit_values("phone", ["99999999999999999999"]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_lower_case_and_numbers() {
        let auditor = ContentAuditor::default();
        let rows = auditor.audit_values("amenity", ["cafe", "42", "Bank"]);
        assert_eq!(
            comments(&rows),
            vec![("Bank", "Spelling Check"), ("cafe", "Lower Case")]
        );
    }

    #[test]
    fn test_duplicate_compares_against_last_kept_value() {
        let auditor = ContentAuditor::default();
        let rows = auditor.audit_values("name", ["Alpha", "Alpha One", "Alpha One Two"]);
        assert_eq!(
            comments(&rows),
            vec![
                ("Alpha", "Spelling Check"),
                ("Alpha One", "Duplicate"),
                ("Alpha One Two", "Duplicate"),
            ]
        );
    }

    #[test]
    fn test_audit_skips_deep_keys() {
        let mut cache = TagCache::new();
        cache.insert("addr:street", "Katipunan Avenue");
        cache.insert("name:en:old", "Old Name");

        let audit = ContentAuditor::default().audit(&cache);
        assert_eq!(audit.skipped_keys, vec!["name:en:old".to_string()]);
        assert_eq!(audit.values_checked, 1);
        assert_eq!(audit.rows.len(), 1);
        assert_eq!(audit.rows[0].tag_k, "street");
    }

    #[test]
    fn test_review_sheet_format() {
        let rows = vec![
            AuditRow::new(AuditComment::SpellingCheck, "street", "15th"),
            AuditRow::new(AuditComment::HasProblemChars, "street", "537 EDSA, Cubao"),
        ];
        let mut out = Vec::new();
        let written = write_review_to(&mut out, &rows).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Comment,Tag K,Tag Value\n\
             Spelling Check,street,15th\n\
             Has problem chars,street,\"537 EDSA, Cubao\"\n"
        );
    }

    /// Writer that fails on one chosen call to `write`.
    struct FailingWriter {
        out: Vec<u8>,
        calls: usize,
        fail_on: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.calls += 1;
            if self.calls == self.fail_on {
                return Err(std::io::Error::other("disk full"));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_row_is_skipped() {
        let rows = vec![
            AuditRow::new(AuditComment::SpellingCheck, "street", "15th"),
            AuditRow::new(AuditComment::LowerCase, "amenity", "cafe"),
            AuditRow::new(AuditComment::NotANumber, "postcode", "QC"),
        ];
        let mut writer = FailingWriter {
            out: Vec::new(),
            calls: 0,
            fail_on: 3,
        };

        let written = write_review_to(&mut writer, &rows).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(writer.out).unwrap(),
            "Comment,Tag K,Tag Value\n\
             Spelling Check,street,15th\n\
             Not a Number,postcode,QC\n"
        );
    }

    #[test]
    fn test_failed_header_is_an_error() {
        let mut writer = FailingWriter {
            out: Vec::new(),
            calls: 0,
            fail_on: 1,
        };
        let rows = vec![AuditRow::new(AuditComment::SpellingCheck, "street", "15th")];
        assert!(write_review_to(&mut writer, &rows).is_err());
    }
}
