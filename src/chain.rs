//! Ordered resource-provider chain
//!
//! Providers are ordered from the application-local provider (index 0)
//! outward to the most general shared provider. A provider that is not backed
//! by a list of archive references (e.g. a platform provider) carries `None`
//! and is passed over by the scanners.

use serde::{Deserialize, Serialize};

/// One delegation provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    #[serde(default)]
    pub archives: Option<Vec<String>>,
}

impl Provider {
    pub fn new<I, S>(name: &str, archives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            archives: Some(archives.into_iter().map(Into::into).collect()),
        }
    }

    /// A provider without archive references.
    pub fn opaque(name: &str) -> Self {
        Self {
            name: name.to_string(),
            archives: None,
        }
    }
}

/// Providers in delegation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderChain {
    providers: Vec<Provider>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    pub fn push(&mut self, provider: Provider) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Walk the chain starting at index `start`.
    pub fn walk_from(&self, start: usize) -> ChainCursor<'_> {
        ChainCursor {
            chain: self,
            index: start,
        }
    }
}

/// Cursor over a [`ProviderChain`]; yields `(is_local, provider)`.
pub struct ChainCursor<'a> {
    chain: &'a ProviderChain,
    index: usize,
}

impl<'a> Iterator for ChainCursor<'a> {
    type Item = (bool, &'a Provider);

    fn next(&mut self) -> Option<Self::Item> {
        let provider = self.chain.providers.get(self.index)?;
        let is_local = self.index == 0;
        self.index += 1;
        Some((is_local, provider))
    }
}
