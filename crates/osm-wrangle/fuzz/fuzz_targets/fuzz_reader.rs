//! Fuzz target for the streaming XML reader.
//!
//! The structure audit and transformer must return an error, never panic,
//! on malformed or hostile XML.

#![no_main]

use libfuzzer_sys::fuzz_target;
use osm_wrangle::{CorrectionTable, RecordTransformer, RuleSet, StructureAuditor};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let _ = StructureAuditor::new().audit_reader(data);

    let transformer = RecordTransformer::new(RuleSet::default(), CorrectionTable::new());
    let mut out = Vec::new();
    let _ = transformer.transform_reader(data, &mut out);
});
