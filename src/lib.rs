//! # Tag Library Resolver
//!
//! This library resolves tag library URIs to the physical location of their
//! descriptors. It searches the sources of a hosting application in a fixed
//! precedence order and memoizes the result for the lifetime of the
//! application. It is used by the `taglib-resolver` command-line tool but is
//! designed to be embedded in any host.
//!
//! ## Quick Example
//!
//! ```
//! use taglib_resolver::cache::LocationCache;
//! use taglib_resolver::context::MemoryContext;
//! use taglib_resolver::filesystem::MemoryFS;
//!
//! let mut fs = MemoryFS::new();
//! fs.add_file_string(
//!     "/WEB-INF/web.xml",
//!     "<web-app><taglib>\
//!        <taglib-uri>urn:acme:tags</taglib-uri>\
//!        <taglib-location>/WEB-INF/acme.tld</taglib-location>\
//!      </taglib></web-app>",
//! )
//! .unwrap();
//!
//! let cache = LocationCache::builder(MemoryContext::new("/srv/app", fs)).build();
//! let record = cache.get_location("urn:acme:tags").unwrap().unwrap();
//! assert_eq!(record.primary_location, "/WEB-INF/acme.tld");
//! assert!(cache.get_location("urn:unregistered").unwrap().is_none());
//! ```
//!
//! ## Core Concepts
//!
//! - **Cache (`cache`)**: `LocationCache` owns the sources and builds the
//!   mapping once, on first lookup.
//! - **Scanners (`scan`)**: the explicit, provider-chain, module-graph and
//!   local-content scanners, run in that order.
//! - **Records (`record`)**: `LocationRecord` and the `Mapping` with its
//!   precedence rules.
//! - **Policy (`reserved`, `exclusion`)**: reserved identifiers and archives
//!   known to hold no descriptors.
//! - **Sources (`context`, `archive`, `chain`, `module_graph`)**: the host
//!   seams, each with a directory-backed and an in-memory implementation.
//! - **Configuration (`config`)**: the `.taglib-resolver.yaml` file used by
//!   the CLI.

pub mod archive;
pub mod cache;
pub mod chain;
pub mod config;
pub mod context;
pub mod defaults;
pub mod descriptor;
pub mod error;
pub mod exclusion;
pub mod filesystem;
pub mod module_graph;
pub mod record;
pub mod reserved;
pub mod scan;
pub mod suggestions;
pub mod uri;
pub mod xml;

#[cfg(test)]
mod uri_proptest;
