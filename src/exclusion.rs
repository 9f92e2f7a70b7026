//! Archives known not to contain tag library descriptors

use std::collections::HashSet;

use crate::defaults::DEFAULT_NO_TLD_JARS;
use crate::uri::basename;

/// Set of archive basenames skipped when scanning shared providers.
///
/// This is purely a performance filter. Application-local archives are never
/// checked against it.
#[derive(Debug, Clone)]
pub struct ExclusionList {
    names: HashSet<String>,
}

impl ExclusionList {
    /// An exclusion list that skips nothing.
    pub fn empty() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    /// Parse a comma-separated list of basenames. Blank items are ignored.
    pub fn from_csv(names: &str) -> Self {
        let mut list = Self::empty();
        list.set_from_csv(names);
        list
    }

    /// Replace the whole list with the comma-separated `names`.
    pub fn set_from_csv(&mut self, names: &str) {
        self.names = names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Replace the whole list.
    pub fn replace(&mut self, names: HashSet<String>) {
        self.names = names;
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the archive at `location` has to be scanned.
    pub fn needs_scan(&self, location: &str, is_local: bool) -> bool {
        is_local || !self.names.contains(basename(location))
    }
}

impl Default for ExclusionList {
    fn default() -> Self {
        Self {
            names: DEFAULT_NO_TLD_JARS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
