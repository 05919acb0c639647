//! Integration tests for the structure audit and the tag cache.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use osm_wrangle::cache::DEFAULT_CACHE_FILE;
use osm_wrangle::validation::Violation;
use osm_wrangle::{StructureAuditor, TagCache, WrangleConfig, WrangleError, Wrangler};

const FIXTURE: &str = "tests/fixtures/diliman.osm";

/// Copy the fixture into a fresh directory so the cache lands there.
fn fixture_in(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("diliman.osm");
    fs::copy(FIXTURE, &path).expect("Failed to copy fixture");
    path
}

// =============================================================================
// Report Contents
// =============================================================================

#[test]
fn test_element_counts_and_users() {
    let report = StructureAuditor::new().audit(FIXTURE).expect("Audit failed");

    assert_eq!(report.count_of("node"), 4);
    assert_eq!(report.count_of("way"), 1);
    assert_eq!(report.count_of("relation"), 1);
    assert_eq!(report.count_of("member"), 1);
    assert_eq!(report.count_of("nd"), 3);
    assert_eq!(report.count_of("tag"), 16);
    assert_eq!(report.unique_users, 3);
}

#[test]
fn test_invalid_entries() {
    let report = StructureAuditor::new().audit(FIXTURE).expect("Audit failed");

    let elements: Vec<&str> = report
        .invalid_entries
        .iter()
        .map(|e| e.element.as_str())
        .collect();
    assert_eq!(elements, vec!["tag", "node"]);

    assert_eq!(report.invalid_entries[0].violations, vec![Violation::ProblemKeyChars]);
    assert_eq!(
        report.invalid_entries[1].violations,
        vec![Violation::NotFloat {
            attribute: "lat".to_string()
        }]
    );
    assert_eq!(
        report.invalid_entries[1].attributes.get("id").map(String::as_str),
        Some("25477012")
    );
}

#[test]
fn test_all_way_refs_known() {
    let report = StructureAuditor::new().audit(FIXTURE).expect("Audit failed");
    assert!(report.unknown_node_refs.is_empty());
}

#[test]
fn test_node_defined_after_way_is_unknown() {
    let xml = r#"<osm>
  <way id="10" version="1" timestamp="2013-08-03T16:43:42Z" changeset="6" uid="100" user="ana">
    <nd ref="5"/>
  </way>
  <node id="5" lat="14.6" lon="121.0" version="1" timestamp="2013-08-03T16:43:42Z" changeset="5" uid="100" user="ana"/>
</osm>"#;

    let report = StructureAuditor::new()
        .audit_reader(xml.as_bytes())
        .expect("Audit failed");

    let unknown: Vec<&str> = report.unknown_node_refs.iter().map(String::as_str).collect();
    assert_eq!(unknown, vec!["5"]);
    assert!(report.invalid_entries.is_empty());
}

#[test]
fn test_cache_contents() {
    let report = StructureAuditor::new().audit(FIXTURE).expect("Audit failed");
    let cache = &report.tag_cache;

    let streets: Vec<&str> = cache
        .values("addr:street")
        .expect("street values")
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(
        streets,
        vec!["15th", "Katipunan Ave.", "Quirino Hiway", "anonas st"]
    );
    assert!(cache.values("House No.").is_none());
    assert!(cache.values("name:en:old").is_some());

    let source = cache.source.as_ref().expect("source metadata");
    assert_eq!(source.file, "diliman.osm");
    assert!(source.hash.starts_with("sha256:"));
    assert_eq!(source.size_bytes, fs::metadata(FIXTURE).unwrap().len());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_cache_written_next_to_extract() {
    let dir = TempDir::new().unwrap();
    let extract = fixture_in(&dir);

    let report = Wrangler::new().audit_structure(&extract).expect("Audit failed");

    let cache_file = dir.path().join(DEFAULT_CACHE_FILE);
    assert!(cache_file.exists());
    assert_eq!(TagCache::load(&cache_file).unwrap(), report.tag_cache);
}

#[test]
fn test_rerun_gives_identical_cache() {
    let dir = TempDir::new().unwrap();
    let extract = fixture_in(&dir);
    let cache_file = dir.path().join(DEFAULT_CACHE_FILE);
    let wrangler = Wrangler::new();

    wrangler.audit_structure(&extract).unwrap();
    let first = fs::read(&cache_file).unwrap();

    wrangler.audit_structure(&extract).unwrap();
    let second = fs::read(&cache_file).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_custom_cache_path() {
    let dir = TempDir::new().unwrap();
    let extract = fixture_in(&dir);
    let cache_file = dir.path().join("out").join("tags.json");

    let wrangler = Wrangler::with_config(WrangleConfig {
        cache_path: Some(cache_file.clone()),
        ..WrangleConfig::default()
    });
    wrangler.audit_structure(&extract).unwrap();

    assert!(cache_file.exists());
    assert!(!dir.path().join(DEFAULT_CACHE_FILE).exists());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_missing_file() {
    let err = StructureAuditor::new()
        .audit(Path::new("does/not/exist.osm"))
        .unwrap_err();
    assert!(matches!(err, WrangleError::Io { .. }));
}

#[test]
fn test_missing_uid_is_fatal() {
    let xml = r#"<osm>
  <way id="1" version="1" timestamp="2014-01-02T08:30:00Z" changeset="1" user="mapper"/>
</osm>"#;
    let err = StructureAuditor::new().audit_reader(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, WrangleError::MissingAttribute { .. }));
}

#[test]
fn test_malformed_xml_is_fatal() {
    let xml = "<osm><node id=\"1\"></way></osm>";
    assert!(StructureAuditor::new().audit_reader(xml.as_bytes()).is_err());
}
