//! Content command - flag suspicious tag values for review.

use std::collections::BTreeMap;
use std::path::PathBuf;

use colored::Colorize;
use osm_wrangle::{TagSource, WrangleConfig, Wrangler};

use crate::cli::SourceChoice;

use super::load_rules;

pub fn run(
    file: PathBuf,
    source: SourceChoice,
    output: PathBuf,
    rules: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let source = match source {
        SourceChoice::Cache => TagSource::Cache(file),
        SourceChoice::Xml => TagSource::Xml(file),
    };

    let wrangler = Wrangler::with_config(WrangleConfig {
        rules: load_rules(rules)?,
        review_path: output.clone(),
        ..WrangleConfig::default()
    });

    let audit = wrangler.audit_content(&source)?;

    let mut by_comment: BTreeMap<&str, usize> = BTreeMap::new();
    for row in &audit.rows {
        *by_comment.entry(row.comment.as_str()).or_insert(0) += 1;
    }

    println!(
        "Checked {} values, flagged {}",
        audit.values_checked.to_string().white().bold(),
        audit.rows.len().to_string().yellow().bold()
    );
    for (comment, count) in &by_comment {
        println!("  {:28} {:>8}", comment, count);
    }

    if !audit.skipped_keys.is_empty() {
        println!();
        println!(
            "{} ({})",
            "Skipped keys with more than two identifiers".yellow(),
            audit.skipped_keys.len()
        );
        for key in &audit.skipped_keys {
            println!("  {}", key);
        }
    }

    println!();
    println!(
        "{} {}",
        "Saved review sheet to".green().bold(),
        output.display().to_string().white()
    );
    println!(
        "Add a {} column, then run {}",
        "Correction".bold(),
        "osm-wrangle transform <FILE> --corrections <SHEET>".cyan().bold()
    );

    Ok(())
}
