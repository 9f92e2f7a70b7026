//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `taglib-resolver` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `taglib_resolver` library.

use std::path::Path;

use anyhow::Result;

use taglib_resolver::cache::LocationCache;
use taglib_resolver::config;
use taglib_resolver::suggestions;

pub mod classify;
pub mod lookup;
pub mod ls;

/// Load the configuration at `config_path` and build its cache.
pub fn load_cache(config_path: &Path) -> Result<LocationCache> {
    if !config_path.exists() {
        return Err(suggestions::config_not_found(config_path));
    }

    let config = config::from_file(config_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load config from {}: {}",
            config_path.display(),
            e
        )
    })?;

    Ok(config.build_cache()?)
}
