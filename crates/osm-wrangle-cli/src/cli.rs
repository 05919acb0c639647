//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// osm-wrangle: audit and clean OpenStreetMap XML extracts
#[derive(Parser)]
#[command(name = "osm-wrangle")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate element attributes and cache observed tag values
    Structure {
        /// Path to the OSM XML extract
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Where to write the tag cache (default: tagKV.json next to FILE)
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flag suspicious tag values and write the review sheet
    Content {
        /// Tag cache, or the extract itself with --source xml
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Where the tag values come from
        #[arg(long, value_enum, default_value_t = SourceChoice::Cache)]
        source: SourceChoice,

        /// Output path for the review sheet
        #[arg(short, long, default_value = "mapcontentAudit.csv")]
        output: PathBuf,

        /// JSON file overriding the built-in rule tables
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Apply corrections and write one JSON document per node or way
    Transform {
        /// Path to the OSM XML extract
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Reviewed sheet with a Correction column
        #[arg(short, long)]
        corrections: PathBuf,

        /// Output path (default: <FILE>.json, or <FILE>_qc.json with --qc-only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop elements whose address is outside the home city
        #[arg(long)]
        qc_only: bool,

        /// Indent each JSON document
        #[arg(long)]
        pretty: bool,

        /// List every value that was changed
        #[arg(long)]
        show_corrected: bool,

        /// JSON file overriding the built-in rule tables
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

/// Source of tag values for the content audit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceChoice {
    /// A tag cache written by `structure`
    #[default]
    Cache,
    /// Scan the raw extract
    Xml,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_transform_args() {
        let cli = Cli::parse_from([
            "osm-wrangle",
            "-vv",
            "transform",
            "qc.osm",
            "--corrections",
            "reviewed.csv",
            "--qc-only",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Transform {
                file,
                corrections,
                qc_only,
                pretty,
                ..
            } => {
                assert_eq!(file, PathBuf::from("qc.osm"));
                assert_eq!(corrections, PathBuf::from("reviewed.csv"));
                assert!(qc_only);
                assert!(!pretty);
            }
            _ => panic!("expected transform"),
        }
    }

    #[test]
    fn test_content_source_default() {
        let cli = Cli::parse_from(["osm-wrangle", "content", "tagKV.json"]);
        match cli.command {
            Commands::Content { source, output, .. } => {
                assert_eq!(source, SourceChoice::Cache);
                assert_eq!(output, PathBuf::from("mapcontentAudit.csv"));
            }
            _ => panic!("expected content"),
        }
    }
}
