//! Identifiers that must never be registered from declarative configuration

use std::collections::HashSet;

/// Reserved identifier policy.
///
/// `always` is honored unconditionally. `conditional` holds identifiers owned
/// by the bundled faces framework; they stop being reserved when the host has
/// opted into an alternate framework implementation.
#[derive(Debug, Clone, Default)]
pub struct ReservedIdentifierSet {
    always: HashSet<String>,
    conditional: HashSet<String>,
    honor_alternate_framework: bool,
}

impl ReservedIdentifierSet {
    /// An empty policy: nothing is reserved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a policy from the two identifier groups.
    ///
    /// An identifier listed in both groups is treated as unconditionally reserved.
    pub fn with_sets<A, C>(always: A, conditional: C) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let always: HashSet<String> = always.into_iter().map(Into::into).collect();
        let conditional = conditional
            .into_iter()
            .map(Into::into)
            .filter(|uri: &String| !always.contains(uri))
            .collect();
        Self {
            always,
            conditional,
            honor_alternate_framework: false,
        }
    }

    /// Set whether the alternate framework exempts the conditional group.
    pub fn honor_alternate_framework(mut self, honor: bool) -> Self {
        self.honor_alternate_framework = honor;
        self
    }

    /// Whether `uri` must not be registered under the current policy.
    pub fn is_reserved(&self, uri: &str) -> bool {
        self.always.contains(uri)
            || (!self.honor_alternate_framework && self.conditional.contains(uri))
    }

    pub fn is_empty(&self) -> bool {
        self.always.is_empty() && self.conditional.is_empty()
    }
}
