//! Fuzz target for street-name heuristics.
//!
//! Normalization, sort keys and the content rules must handle any UTF-8
//! input, including multi-byte first characters.

#![no_main]

use libfuzzer_sys::fuzz_target;
use osm_wrangle::osm::screen_tag;
use osm_wrangle::{ContentAuditor, RuleSet};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(value) = std::str::from_utf8(data) {
        let rules = RuleSet::default();
        let _ = rules.correct_street_name(value);
        let _ = rules.sort_key("street", value);
        let _ = screen_tag(value, value);

        let values: Vec<&str> = value.split('\n').collect();
        let auditor = ContentAuditor::new(rules);
        let _ = auditor.audit_values("street", values.iter().copied());
        let _ = auditor.audit_values("postcode", values.iter().copied());
    }
});
