//! Step 4: Descriptor files in the local resource namespace
//!
//! Walks `/WEB-INF/` recursively. Descriptors found here only fill gaps: a URI
//! already registered by an earlier step is never displaced, and reserved
//! URIs are never registered.
//!
//! Directories named like archives (`lib/acme.jar/`) are exploded archives;
//! they belong to the chain scan and are not descended into.
//!
//! `/WEB-INF/tags/` belongs to tag files. The only descriptor allowed there is
//! `implicit.tld`; any other one aborts initialization.

use log::{debug, warn};

use super::ScanEnv;
use crate::context::ResourceContext;
use crate::defaults::{IMPLICIT_TLD, JAR_SUFFIX, TLD_SUFFIX, WEB_INF_TAGS};
use crate::error::{Error, Result};
use crate::record::{LocationRecord, Mapping};
use crate::uri::basename;

/// Scan below `start` (a directory path ending in `/`); returns the number of
/// records stored.
pub fn execute(
    mapping: &mut Mapping,
    env: &ScanEnv<'_>,
    context: &dyn ResourceContext,
    start: &str,
) -> Result<usize> {
    let mut stored = 0;
    walk(mapping, env, context, start, &mut stored)?;
    Ok(stored)
}

fn walk(
    mapping: &mut Mapping,
    env: &ScanEnv<'_>,
    context: &dyn ResourceContext,
    dir: &str,
    stored: &mut usize,
) -> Result<()> {
    let Some(paths) = context.resource_paths(dir) else {
        return Ok(());
    };

    for path in paths {
        if path.ends_with('/') {
            if path.trim_end_matches('/').ends_with(JAR_SUFFIX) {
                debug!("Leaving exploded archive {} to the chain scan", path);
                continue;
            }
            walk(mapping, env, context, &path, stored)?;
            continue;
        }
        if !path.ends_with(TLD_SUFFIX) {
            continue;
        }
        if path.starts_with(WEB_INF_TAGS) && basename(&path) != IMPLICIT_TLD {
            return Err(Error::SpecificationViolation { path });
        }

        let Some(mut stream) = context.open(&path)? else {
            warn!("Descriptor {} disappeared while scanning", path);
            continue;
        };
        let Some(uri) = env.locator().locate(&path, &mut stream)? else {
            debug!("{} declares no uri", path);
            continue;
        };
        if mapping.register_implicit(LocationRecord::direct(&uri, &path), env.reserved) {
            *stored += 1;
        }
    }
    Ok(())
}
