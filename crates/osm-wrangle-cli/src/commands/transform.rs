//! Transform command - apply corrections and write JSON documents.

use std::path::PathBuf;

use colored::Colorize;
use osm_wrangle::{TransformOptions, WrangleConfig, Wrangler};

use super::load_rules;

pub fn run(
    file: PathBuf,
    corrections: PathBuf,
    output: Option<PathBuf>,
    qc_only: bool,
    pretty: bool,
    show_corrected: bool,
    rules: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let wrangler = Wrangler::with_config(WrangleConfig {
        rules: load_rules(rules)?,
        transform: TransformOptions { qc_only, pretty },
        ..WrangleConfig::default()
    });

    println!(
        "{} {}",
        "Transforming".cyan().bold(),
        file.display().to_string().white()
    );

    let (output, summary) = wrangler.transform(&file, &corrections, output)?;

    println!(
        "Read {} elements, wrote {} documents",
        summary.elements_read.to_string().white().bold(),
        summary.documents_written.to_string().white().bold()
    );
    if qc_only {
        println!(
            "Dropped {} outside the home city",
            summary.filtered.to_string().yellow()
        );
    }
    println!(
        "Corrected {} values",
        summary.values_corrected.to_string().white().bold()
    );

    if show_corrected {
        println!();
        println!("{}", "Corrected values".yellow().bold());
        for (original, corrected) in &summary.corrected {
            println!("  {} {} {}", original.red(), "→".dimmed(), corrected.green());
        }
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output.display().to_string().white()
    );

    Ok(())
}
