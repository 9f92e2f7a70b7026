//! Step 2: Scanning the resource-provider chain
//!
//! Providers are visited from the application-local provider outward. The
//! local provider's archives are always scanned; archives of shared providers
//! are first checked against the [`ExclusionList`]. References that do not
//! name a `.jar` (class directories and the like) are passed over.
//!
//! Shared archives are always scanned leniently: one malformed archive on a
//! shared path must not take down every application. Local archives follow
//! the caller's `local_continue_on_error` policy.

use log::debug;

use super::{archive, ScanEnv};
use crate::archive::ArchiveHandles;
use crate::chain::ProviderChain;
use crate::defaults::JAR_SUFFIX;
use crate::error::Result;
use crate::exclusion::ExclusionList;
use crate::record::Mapping;

/// How the chain walk is performed.
#[derive(Debug, Clone, Copy)]
pub struct ChainWalk {
    /// Index of the first provider visited (1 skips the local provider).
    pub start: usize,
    /// Error policy for archives of the local provider.
    pub local_continue_on_error: bool,
}

impl Default for ChainWalk {
    fn default() -> Self {
        Self {
            start: 0,
            local_continue_on_error: true,
        }
    }
}

/// Walk the chain; returns the number of records stored.
pub fn execute(
    mapping: &mut Mapping,
    env: &ScanEnv<'_>,
    handles: &ArchiveHandles,
    chain: &ProviderChain,
    exclusions: &ExclusionList,
    walk: ChainWalk,
) -> Result<usize> {
    let mut stored = 0;
    for (is_local, provider) in chain.walk_from(walk.start) {
        let Some(archives) = &provider.archives else {
            debug!("Provider {} exposes no archives", provider.name);
            continue;
        };
        for location in archives {
            if !location.ends_with(JAR_SUFFIX) {
                continue;
            }
            if !exclusions.needs_scan(location, is_local) {
                debug!("Skipping excluded archive {}", location);
                continue;
            }
            let continue_on_error = !is_local || walk.local_continue_on_error;
            stored += archive::execute(mapping, env, handles, location, continue_on_error)?;
        }
    }
    Ok(stored)
}
