//! osm-wrangle CLI - audit and clean OpenStreetMap extracts.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose));

    let result = match cli.command {
        Commands::Structure { file, cache, json } => commands::structure::run(file, cache, json),

        Commands::Content {
            file,
            source,
            output,
            rules,
        } => commands::content::run(file, source, output, rules),

        Commands::Transform {
            file,
            corrections,
            output,
            qc_only,
            pretty,
            show_corrected,
            rules,
        } => commands::transform::run(
            file,
            corrections,
            output,
            qc_only,
            pretty,
            show_corrected,
            rules,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
