//! # Classify Command Implementation
//!
//! This module implements the `classify` subcommand, which reports how a
//! taglib URI would be interpreted: absolute (looked up in the mapping),
//! root-relative, or relative to `/WEB-INF/`. No configuration is needed.

use anyhow::Result;
use clap::Args;

use taglib_resolver::cache::LocationCache;
use taglib_resolver::uri::UriType;

/// Classify a taglib URI
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// The URI to classify.
    #[arg(value_name = "URI")]
    pub uri: String,
}

/// Execute the `classify` command.
pub fn execute(args: ClassifyArgs) -> Result<()> {
    println!("{}", label(LocationCache::uri_type(&args.uri)));
    Ok(())
}

fn label(uri_type: UriType) -> &'static str {
    match uri_type {
        UriType::Absolute => "absolute",
        UriType::RootRelative => "root-relative",
        UriType::Relative => "relative",
    }
}
