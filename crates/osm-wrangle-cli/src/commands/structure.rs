//! Structure command - validate attributes and cache tag values.

use std::path::PathBuf;

use colored::Colorize;
use osm_wrangle::{StructureReport, WrangleConfig, Wrangler};

pub fn run(
    file: PathBuf,
    cache: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let wrangler = Wrangler::with_config(WrangleConfig {
        cache_path: cache,
        ..WrangleConfig::default()
    });

    if !json {
        println!(
            "{} {}",
            "Auditing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let report = wrangler.audit_structure(&file)?;
    let cache_path = wrangler.cache_path_for(&file);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);

    println!();
    println!(
        "{} {} ({} keys, {} values)",
        "Saved tag cache to".green().bold(),
        cache_path.display().to_string().white(),
        report.tag_cache.key_count(),
        report.tag_cache.pair_count()
    );
    println!(
        "Run {} to audit tag values",
        format!("osm-wrangle content {}", cache_path.display())
            .cyan()
            .bold()
    );

    Ok(())
}

fn print_report(report: &StructureReport) {
    println!();
    println!(
        "{} ({})",
        "Invalid entries".yellow().bold(),
        report.invalid_entries.len()
    );
    for entry in &report.invalid_entries {
        let attributes: Vec<String> = entry
            .attributes
            .iter()
            .map(|(k, v)| format!("{}={:?}", k, v))
            .collect();
        println!(
            "  {:8} {} [{}]",
            entry.element,
            entry.describe().red(),
            attributes.join(" ")
        );
    }

    println!();
    println!(
        "{} ({})",
        "Unknown node references".yellow().bold(),
        report.unknown_node_refs.len()
    );
    for node_ref in &report.unknown_node_refs {
        println!("  {}", node_ref);
    }

    println!();
    println!("{}", "Element counts".yellow().bold());
    for (name, count) in &report.element_counts {
        println!("  {:12} {:>10}", name, count);
    }
    println!(
        "  {:12} {:>10}",
        "total".bold(),
        report.total_elements().to_string().bold()
    );

    println!();
    println!(
        "{} {}",
        "Unique users:".yellow().bold(),
        report.unique_users.to_string().white().bold()
    );
}
