//! Integration tests for the content audit and the review sheet.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use osm_wrangle::audit::{write_review, AuditComment, AuditRow};
use osm_wrangle::cache::DEFAULT_CACHE_FILE;
use osm_wrangle::{ContentAuditor, RuleConfig, TagSource, WrangleConfig, Wrangler};

const FIXTURE: &str = "tests/fixtures/diliman.osm";

fn flagged<'a>(rows: &'a [AuditRow], tag_k: &str) -> Vec<(&'a str, &'a str)> {
    rows.iter()
        .filter(|r| r.tag_k == tag_k)
        .map(|r| (r.tag_value.as_str(), r.comment.as_str()))
        .collect()
}

/// Run the structure audit in a temp dir and return the cache path.
fn cached_fixture(dir: &TempDir) -> PathBuf {
    let extract = dir.path().join("diliman.osm");
    fs::copy(FIXTURE, &extract).expect("Failed to copy fixture");
    Wrangler::new()
        .audit_structure(&extract)
        .expect("Structure audit failed");
    dir.path().join(DEFAULT_CACHE_FILE)
}

// =============================================================================
// Rules Over A Real Cache
// =============================================================================

#[test]
fn test_rows_from_cache() {
    let dir = TempDir::new().unwrap();
    let cache = TagSource::Cache(cached_fixture(&dir)).load().unwrap();
    let audit = ContentAuditor::default().audit(&cache);

    assert_eq!(
        flagged(&audit.rows, "street"),
        vec![
            ("15th", "Spelling Check"),
            ("anonas st", "Spelling Check"),
            ("Katipunan Ave.", "Spelling Check"),
            ("Quirino Hiway", "Spelling Check"),
        ]
    );
    assert_eq!(
        flagged(&audit.rows, "postcode"),
        vec![("2000", "Not a Quezon City postcode")]
    );
    assert_eq!(
        flagged(&audit.rows, "amenity"),
        vec![("bank", "Lower Case"), ("cafe", "Lower Case")]
    );
    assert_eq!(audit.skipped_keys, vec!["name:en:old".to_string()]);
    assert_eq!(audit.rows.len(), 13);
}

#[test]
fn test_xml_source_only_reads_nodes_and_ways() {
    let dir = TempDir::new().unwrap();
    let from_cache = TagSource::Cache(cached_fixture(&dir)).load().unwrap();
    let from_xml = TagSource::Xml(PathBuf::from(FIXTURE)).load().unwrap();

    assert!(from_cache.values("type").is_some());
    assert!(from_xml.values("type").is_none());
    assert_eq!(from_xml.key_count() + 1, from_cache.key_count());

    let auditor = ContentAuditor::default();
    let rows = auditor.audit(&from_xml).rows;
    assert_eq!(rows.len(), 12);
    assert!(flagged(&rows, "type").is_empty());
}

#[test]
fn test_custom_rules() {
    let config: RuleConfig = serde_json::from_str(
        r#"{ "postcodes": { "min": 1000, "max": 1100 }, "problem_words": ["Hiway"] }"#,
    )
    .unwrap();
    let auditor = ContentAuditor::new(config.compile().unwrap());

    let rows = auditor.audit_values("postcode", ["1008", "1101"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tag_value, "1101");

    let rows = auditor.audit_values("street", ["Quirino Hiway"]);
    assert_eq!(rows[0].comment, AuditComment::HasProblemWords.label());
}

// =============================================================================
// Review Sheet
// =============================================================================

#[test]
fn test_review_sheet_written() {
    let dir = TempDir::new().unwrap();
    let cache_path = cached_fixture(&dir);
    let review = dir.path().join("mapcontentAudit.csv");

    let wrangler = Wrangler::with_config(WrangleConfig {
        review_path: review.clone(),
        ..WrangleConfig::default()
    });
    let audit = wrangler.audit_content(&TagSource::Cache(cache_path)).unwrap();

    let text = fs::read_to_string(&review).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Comment,Tag K,Tag Value"));
    assert_eq!(lines.count(), audit.rows.len());
    assert!(text.contains("Not a Quezon City postcode,postcode,2000\n"));
    assert!(text.contains("Spelling Check,name,Rodic's Diner\n"));
}

#[test]
fn test_review_sheet_quotes_commas() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("review.csv");
    let rows = vec![AuditRow::new(
        AuditComment::HasProblemChars,
        "street",
        "537 EDSA, Cubao",
    )];

    assert_eq!(write_review(&path, &rows).unwrap(), 1);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let read: Vec<AuditRow> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(read, rows);
}
