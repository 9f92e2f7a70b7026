//! Location records and the identifier mapping built during initialization
//!
//! Every scanner funnels its findings through one of the three registration
//! methods on [`Mapping`]. Together they encode the precedence rules between
//! sources:
//!
//! - [`Mapping::register_explicit`]: deployment descriptor declarations, always
//!   inserted.
//! - [`Mapping::register_archived`]: archive scans, inserted when absent or when
//!   the identifier is reserved (a later archive may displace a reserved
//!   placeholder).
//! - [`Mapping::register_implicit`]: local content and module graph scans,
//!   inserted only when absent and not reserved.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reserved::ReservedIdentifierSet;

/// Where the descriptor for one identifier lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// The tag library URI.
    pub identifier: String,
    /// Direct resource path, or the archive location when `entry_name` is set.
    pub primary_location: String,
    /// Descriptor path inside the archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_name: Option<String>,
}

impl LocationRecord {
    /// A descriptor addressed directly by path.
    pub fn direct(identifier: &str, path: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            primary_location: path.to_string(),
            entry_name: None,
        }
    }

    /// A descriptor stored as `entry` inside the archive at `archive`.
    pub fn archived(identifier: &str, archive: &str, entry: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            primary_location: archive.to_string(),
            entry_name: Some(entry.to_string()),
        }
    }

    pub fn is_archived(&self) -> bool {
        self.entry_name.is_some()
    }
}

/// Identifier to location mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    records: HashMap<String, LocationRecord>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identifier: &str) -> Option<&LocationRecord> {
        self.records.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.records.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationRecord> {
        self.records.values()
    }

    /// Records sorted by identifier, for stable output.
    pub fn sorted(&self) -> Vec<&LocationRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        records
    }

    /// Insert or overwrite unconditionally.
    pub fn register_explicit(&mut self, record: LocationRecord) {
        debug!(
            "explicit taglib {} -> {}",
            record.identifier, record.primary_location
        );
        self.records.insert(record.identifier.clone(), record);
    }

    /// Insert when absent, or overwrite when the identifier is reserved.
    ///
    /// Returns whether the record was stored.
    pub fn register_archived(
        &mut self,
        record: LocationRecord,
        reserved: &ReservedIdentifierSet,
    ) -> bool {
        if self.contains(&record.identifier) && !reserved.is_reserved(&record.identifier) {
            return false;
        }
        debug!(
            "archived taglib {} -> {}!{}",
            record.identifier,
            record.primary_location,
            record.entry_name.as_deref().unwrap_or_default()
        );
        self.records.insert(record.identifier.clone(), record);
        true
    }

    /// Insert only when absent and not reserved.
    ///
    /// Returns whether the record was stored.
    pub fn register_implicit(
        &mut self,
        record: LocationRecord,
        reserved: &ReservedIdentifierSet,
    ) -> bool {
        if self.contains(&record.identifier) || reserved.is_reserved(&record.identifier) {
            return false;
        }
        debug!(
            "implicit taglib {} -> {}",
            record.identifier, record.primary_location
        );
        self.records.insert(record.identifier.clone(), record);
        true
    }

    /// Load a mapping previously written with [`Mapping::to_json`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Pretty JSON object keyed by identifier, in identifier order.
    pub fn to_json(&self) -> Result<String> {
        let ordered: BTreeMap<&String, &LocationRecord> = self.records.iter().collect();
        Ok(serde_json::to_string_pretty(&ordered)?)
    }
}

impl FromIterator<LocationRecord> for Mapping {
    fn from_iter<I: IntoIterator<Item = LocationRecord>>(iter: I) -> Self {
        Self {
            records: iter
                .into_iter()
                .map(|record| (record.identifier.clone(), record))
                .collect(),
        }
    }
}
