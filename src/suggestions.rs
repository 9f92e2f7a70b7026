//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use taglib_resolver::suggestions;
//!
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

use crate::error::Error;

/// Generate an error for when the configuration file is not found.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a .taglib-resolver.yaml file with at least 'web_root:'\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set TAGLIB_RESOLVER_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for a failed cache initialization.
///
/// The hint depends on the underlying failure.
pub fn initialization_failed(error: &Error) -> anyhow::Error {
    let cause = match error {
        Error::Initialization { source } => source.as_ref(),
        other => other,
    };
    let hint = match cause {
        Error::SpecificationViolation { .. } => {
            "hint: Move the descriptor out of /WEB-INF/tags/ (e.g. to /WEB-INF/tlds/)\n\
             hint: Only implicit.tld may describe tag files under /WEB-INF/tags/"
        }
        Error::UnresolvedResource { .. } => {
            "hint: Check the <taglib-location> entries of the deployment descriptor"
        }
        Error::ArchiveScan { .. } => {
            "hint: Set 'local_continue_on_error: true' to skip unreadable application archives"
        }
        Error::DeploymentDescriptor { .. } => {
            "hint: Make sure WEB-INF/web.xml (or deployment_descriptor) is well-formed XML"
        }
        _ => "hint: Re-run with --log-level debug to see every scanned source",
    };
    anyhow::anyhow!("{error}\n\n{hint}")
}

/// Generate an error for an invalid glob pattern.
///
/// Includes hints about glob syntax.
pub fn invalid_glob(pattern: &str, error: &glob::PatternError) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid glob pattern: {pattern}\n\
         error: {error}\n\n\
         hint: Use * to match any run of characters, e.g. 'urn:acme:*'\n\
         hint: Use [abc] for character classes, [!abc] to negate"
    )
}
