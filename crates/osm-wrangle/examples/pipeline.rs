//! Run all three stages over an extract.
//!
//! ```bash
//! cargo run -p osm-wrangle --example pipeline -- qc.osm reviewed.csv
//! ```

use std::env;
use std::path::PathBuf;

use osm_wrangle::{TagSource, Wrangler};

fn main() -> osm_wrangle::Result<()> {
    let mut args = env::args().skip(1);
    let extract = PathBuf::from(args.next().unwrap_or_else(|| "qc.osm".to_string()));
    let corrections = args.next().map(PathBuf::from);

    let wrangler = Wrangler::new();

    let report = wrangler.audit_structure(&extract)?;
    println!("Elements:        {}", report.total_elements());
    println!("Invalid entries: {}", report.invalid_entries.len());
    println!("Unknown refs:    {}", report.unknown_node_refs.len());
    println!("Unique users:    {}", report.unique_users);

    let cache = wrangler.cache_path_for(&extract);
    let audit = wrangler.audit_content(&TagSource::Cache(cache))?;
    println!(
        "Flagged {} of {} values -> {}",
        audit.rows.len(),
        audit.values_checked,
        wrangler.config().review_path.display()
    );

    if let Some(corrections) = corrections {
        let (output, summary) = wrangler.transform(&extract, &corrections, None)?;
        println!(
            "Wrote {} documents ({} values corrected) -> {}",
            summary.documents_written,
            summary.values_corrected,
            output.display()
        );
    }

    Ok(())
}
