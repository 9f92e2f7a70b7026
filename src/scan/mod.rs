//! The scanners that populate the location mapping.
//!
//! ## Overview
//!
//! Initialization runs the scanners in a fixed order, because precedence
//! between sources depends on it:
//! 1. Explicit registration - `<taglib>` declarations from the deployment descriptor
//! 2. Provider chain - archives of every provider, local first
//! 3. Module graph - descriptors in imported modules
//! 4. Local content - descriptor files under `/WEB-INF/`
//!
//! Steps 1 and 4 are skipped when the host supplies a pre-built mapping; step 2
//! then starts one provider past the application-local one.
//!
//! Each scanner only touches the mapping through the registration methods on
//! [`Mapping`](crate::record::Mapping), which hold the override rules.

use crate::descriptor::{DescriptorLocator, DescriptorParser};
use crate::reserved::ReservedIdentifierSet;

pub mod archive;
pub mod chain;
pub mod explicit;
pub mod local;
pub mod module_graph;

/// Read-only policy shared by all scanners during one initialization.
#[derive(Clone, Copy)]
pub struct ScanEnv<'a> {
    pub parser: &'a dyn DescriptorParser,
    pub reserved: &'a ReservedIdentifierSet,
}

impl<'a> ScanEnv<'a> {
    pub fn new(parser: &'a dyn DescriptorParser, reserved: &'a ReservedIdentifierSet) -> Self {
        Self { parser, reserved }
    }

    pub fn locator(&self) -> DescriptorLocator<'a> {
        DescriptorLocator::new(self.parser)
    }
}
