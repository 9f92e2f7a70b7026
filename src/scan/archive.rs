//! Scanning a single archive for descriptors
//!
//! Entries under `META-INF/` (at any depth) ending in `.tld` are parsed and
//! every declared URI is registered with [`Mapping::register_archived`]: the
//! first archive to declare a URI keeps it, unless the URI is reserved, in
//! which case later archives overwrite it.
//!
//! An archive either contributes all of its descriptors or none: records are
//! collected first and committed only after every entry was read.

use log::{debug, warn};

use super::ScanEnv;
use crate::archive::{Archive, ArchiveHandles};
use crate::defaults::{META_INF, TLD_SUFFIX};
use crate::error::{Error, Result};
use crate::record::{LocationRecord, Mapping};

/// Scan the archive at `location`.
///
/// With `continue_on_error` a failing archive is logged and skipped (returns
/// `Ok(0)`); otherwise the failure is returned as [`Error::ArchiveScan`].
/// Returns the number of records stored.
pub fn execute(
    mapping: &mut Mapping,
    env: &ScanEnv<'_>,
    handles: &ArchiveHandles,
    location: &str,
    continue_on_error: bool,
) -> Result<usize> {
    let records = match collect(env, handles, location) {
        Ok(records) => records,
        Err(e) if continue_on_error => {
            warn!("Skipping archive {}: {}", location, e);
            return Ok(0);
        }
        Err(e) => return Err(e),
    };

    let mut stored = 0;
    for record in records {
        if mapping.register_archived(record, env.reserved) {
            stored += 1;
        }
    }
    debug!("{}: {} taglib(s) registered", location, stored);
    Ok(stored)
}

fn collect(env: &ScanEnv<'_>, handles: &ArchiveHandles, location: &str) -> Result<Vec<LocationRecord>> {
    let mut handle = handles.acquire(location)?;
    let result = read_descriptors(env, &*handle);
    if result.is_err() {
        handle.mark_failed();
    }
    result.map_err(|e| match e {
        Error::ArchiveScan { .. } => e,
        other => Error::archive_scan(location, other),
    })
}

fn read_descriptors(env: &ScanEnv<'_>, archive: &dyn Archive) -> Result<Vec<LocationRecord>> {
    let locator = env.locator();
    let mut records = Vec::new();
    for name in archive.entry_names()? {
        if !is_descriptor_entry(&name) {
            continue;
        }
        let mut stream = archive.open_entry(&name)?;
        let resource = format!("{}!/{}", archive.location(), name);
        if let Some(uri) = locator.locate(&resource, &mut stream)? {
            records.push(LocationRecord::archived(&uri, archive.location(), &name));
        }
    }
    Ok(records)
}

fn is_descriptor_entry(name: &str) -> bool {
    name.starts_with(META_INF) && name.ends_with(TLD_SUFFIX)
}
