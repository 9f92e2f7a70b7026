//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `taglib-resolver` crate. It uses the `thiserror` library to create a
//! single `Error` enum that covers every failure the resolution pipeline can
//! report, with enough context to tell the user which source was at fault.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors. Scanner
//!   failures are wrapped in `Error::Initialization` before they reach the
//!   caller of `LocationCache::get_location`.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! ## Recoverability
//!
//! - `ArchiveScan` errors are recovered locally (the archive is skipped) when
//!   the archive came from a shared provider, and propagated otherwise.
//! - `SpecificationViolation` is never recovered.
//! - Missing optional sources (no deployment descriptor, no module graph) are
//!   not errors at all.

use std::sync::Arc;

use thiserror::Error;

/// Main error type for taglib-resolver operations
#[derive(Error, Debug)]
pub enum Error {
    /// The scanning pipeline could not complete.
    ///
    /// The source is shared so that every lookup after a failed
    /// initialization can report the same underlying failure.
    #[error("Tag library location cache failed to initialize: {source}")]
    Initialization {
        #[source]
        source: Arc<Error>,
    },

    /// A single archive could not be scanned.
    #[error("Archive scan error for {archive}: {message}")]
    ArchiveScan { archive: String, message: String },

    /// A descriptor was found where only implicit fragment descriptors are allowed.
    #[error("Tag library descriptor {path} is not allowed under /WEB-INF/tags/ (only implicit.tld may appear there)")]
    SpecificationViolation { path: String },

    /// A tag library descriptor could not be parsed.
    #[error("Descriptor parse error in {resource}: {message}")]
    DescriptorParse { resource: String, message: String },

    /// The deployment descriptor exists but could not be processed.
    #[error("Deployment descriptor error in {path}: {message}")]
    DeploymentDescriptor { path: String, message: String },

    /// A resource path declared in configuration has no physical counterpart.
    #[error("Resource not found: {path}")]
    UnresolvedResource { path: String },

    /// An error occurred while parsing the `.taglib-resolver.yaml` configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    /// Wrap a scanning failure for delivery to lookup callers.
    ///
    /// Accepts either a fresh error or the shared failure kept by the cache.
    pub fn initialization(source: impl Into<Arc<Error>>) -> Self {
        Error::Initialization {
            source: source.into(),
        }
    }

    /// Build an `ArchiveScan` error from any displayable cause.
    pub fn archive_scan(archive: &str, cause: impl std::fmt::Display) -> Self {
        Error::ArchiveScan {
            archive: archive.to_string(),
            message: cause.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_initialization_includes_cause() {
        let error = Error::initialization(Error::SpecificationViolation {
            path: "/WEB-INF/tags/custom.tld".to_string(),
        });
        let display = format!("{}", error);
        assert!(display.contains("failed to initialize"));
        assert!(display.contains("/WEB-INF/tags/custom.tld"));
    }

    #[test]
    fn test_error_initialization_source_chain() {
        use std::error::Error as _;

        let error = Error::initialization(Error::UnresolvedResource {
            path: "/WEB-INF/lib/missing.jar".to_string(),
        });
        let source = error.source().expect("initialization error has a source");
        assert!(source.to_string().contains("missing.jar"));
    }

    #[test]
    fn test_error_display_archive_scan() {
        let error = Error::archive_scan("/opt/shared/lib/broken.jar", "truncated entry");
        let display = format!("{}", error);
        assert!(display.contains("Archive scan error"));
        assert!(display.contains("broken.jar"));
        assert!(display.contains("truncated entry"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "Missing web_root".to_string(),
            hint: Some("Add 'web_root:' pointing at the application directory".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("hint:"));
        assert!(display.contains("web_root"));
    }

    #[test]
    fn test_error_display_descriptor_parse() {
        let error = Error::DescriptorParse {
            resource: "META-INF/c.tld".to_string(),
            message: "unexpected end of input".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Descriptor parse error"));
        assert!(display.contains("META-INF/c.tld"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }
}
