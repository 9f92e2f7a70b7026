//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Tag Library Resolver - Find the descriptor behind a taglib URI
#[derive(Parser, Debug)]
#[command(name = "taglib-resolver")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one taglib URI
    Lookup(commands::lookup::LookupArgs),

    /// List every resolved taglib URI
    Ls(commands::ls::LsArgs),

    /// Classify a URI as absolute, root-relative or relative
    Classify(commands::classify::ClassifyArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .init();

        match self.command {
            Commands::Lookup(args) => commands::lookup::execute(args),
            Commands::Ls(args) => commands::ls::execute(args),
            Commands::Classify(args) => commands::classify::execute(args),
        }
    }
}
