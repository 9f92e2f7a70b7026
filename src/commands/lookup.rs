//! # Lookup Command Implementation
//!
//! This module implements the `lookup` subcommand, which resolves a single
//! tag library URI against the application described by a
//! `.taglib-resolver.yaml` configuration.
//!
//! ## Functionality
//!
//! - **Resolution**: Runs the full scanning pipeline once and prints the
//!   location of the descriptor for the given URI.
//! - **Archived descriptors**: When the descriptor lives inside an archive,
//!   the entry name is printed alongside the archive location.
//! - **Unregistered URIs**: Exit with an error so scripts can test for
//!   presence.
//!
//! This command is read-only.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use taglib_resolver::defaults::DEFAULT_CONFIG_FILENAME;
use taglib_resolver::record::LocationRecord;
use taglib_resolver::suggestions;

/// Resolve one taglib URI to its descriptor location
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// The taglib URI to resolve (e.g. "http://java.sun.com/jsp/jstl/core").
    #[arg(value_name = "URI")]
    pub uri: String,

    /// Path to the .taglib-resolver.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILENAME,
        env = "TAGLIB_RESOLVER_CONFIG"
    )]
    pub config: PathBuf,
}

/// Execute the `lookup` command.
pub fn execute(args: LookupArgs) -> Result<()> {
    let cache = super::load_cache(&args.config)?;

    let record = cache
        .get_location(&args.uri)
        .map_err(|e| suggestions::initialization_failed(&e))?;

    match record {
        Some(record) => {
            println!("{}", format_record(record));
            Ok(())
        }
        None => Err(anyhow::anyhow!(
            "No tag library registered for URI: {}\n\n\
             hint: Run 'taglib-resolver ls' to see every registered URI",
            args.uri
        )),
    }
}

/// Format a record as `uri -> location` with the entry name for archives.
pub(crate) fn format_record(record: &LocationRecord) -> String {
    match &record.entry_name {
        Some(entry) => format!(
            "{} -> {} [{}]",
            record.identifier, record.primary_location, entry
        ),
        None => format!("{} -> {}", record.identifier, record.primary_location),
    }
}
