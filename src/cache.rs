//! Lazily-initialized cache of tag library locations
//!
//! [`LocationCache`] owns the sources of one hosting application and builds
//! the identifier mapping on first use. Initialization runs at most once, even
//! when several threads call [`LocationCache::get_location`] concurrently;
//! late callers block until the first one finishes. Afterwards the mapping is
//! immutable and lookups are plain reads.
//!
//! A failed initialization is final: every later lookup reports the same
//! error.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use log::info;

use crate::archive::{ArchiveHandles, ArchiveOpener, FsArchiveOpener};
use crate::chain::ProviderChain;
use crate::context::ResourceContext;
use crate::defaults::WEB_INF;
use crate::descriptor::{DescriptorParser, XmlDescriptorParser};
use crate::error::{Error, Result};
use crate::exclusion::ExclusionList;
use crate::module_graph::ModuleGraph;
use crate::record::{LocationRecord, Mapping};
use crate::reserved::ReservedIdentifierSet;
use crate::scan::chain::ChainWalk;
use crate::scan::{self, ScanEnv};
use crate::uri::UriType;

type InitResult = std::result::Result<Mapping, Arc<Error>>;

/// Tag library locations of one hosting application.
pub struct LocationCache {
    context: Box<dyn ResourceContext>,
    chain: ProviderChain,
    module_graph: Option<Box<dyn ModuleGraph>>,
    parser: Box<dyn DescriptorParser>,
    handles: ArchiveHandles,
    reserved: ReservedIdentifierSet,
    exclusions: ExclusionList,
    prebuilt: Option<Mapping>,
    alternate_descriptor: Option<PathBuf>,
    local_continue_on_error: bool,
    state: OnceLock<InitResult>,
}

impl LocationCache {
    /// Start configuring a cache over `context`.
    pub fn builder<C: ResourceContext + 'static>(context: C) -> LocationCacheBuilder {
        LocationCacheBuilder::new(Box::new(context))
    }

    /// Location of the descriptor for `uri`, `None` when no source exposes it.
    pub fn get_location(&self, uri: &str) -> Result<Option<&LocationRecord>> {
        Ok(self.mapping()?.get(uri))
    }

    /// The complete mapping, initializing on first call.
    pub fn mapping(&self) -> Result<&Mapping> {
        match self.state.get_or_init(|| self.initialize().map_err(Arc::new)) {
            Ok(mapping) => Ok(mapping),
            Err(source) => Err(Error::initialization(Arc::clone(source))),
        }
    }

    /// Classify a URI; see [`crate::uri::uri_type`].
    pub fn uri_type(uri: &str) -> UriType {
        crate::uri::uri_type(uri)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    pub fn redeploy_mode(&self) -> bool {
        self.handles.redeploy_mode()
    }

    /// Whether the host supplied a pre-built mapping for local resources.
    pub fn local_source_already_provided(&self) -> bool {
        self.prebuilt.is_some()
    }

    fn initialize(&self) -> Result<Mapping> {
        let env = ScanEnv::new(self.parser.as_ref(), &self.reserved);
        let local_provided = self.prebuilt.is_some();
        let mut mapping = self.prebuilt.clone().unwrap_or_default();

        let explicit = if local_provided {
            0
        } else {
            scan::explicit::execute(
                &mut mapping,
                &env,
                self.context.as_ref(),
                self.alternate_descriptor.as_deref(),
            )?
        };

        let walk = ChainWalk {
            start: usize::from(local_provided),
            local_continue_on_error: self.local_continue_on_error,
        };
        let archived = scan::chain::execute(
            &mut mapping,
            &env,
            &self.handles,
            &self.chain,
            &self.exclusions,
            walk,
        )?;

        let modules = scan::module_graph::execute(&mut mapping, &env, self.module_graph.as_deref());

        let local = if local_provided {
            0
        } else {
            scan::local::execute(&mut mapping, &env, self.context.as_ref(), WEB_INF)?
        };

        info!(
            "Tag library locations ready: {} total ({} explicit, {} from archives, {} from modules, {} local{})",
            mapping.len(),
            explicit,
            archived,
            modules,
            local,
            if local_provided { ", pre-built mapping adopted" } else { "" }
        );
        Ok(mapping)
    }
}

/// Configures a [`LocationCache`].
pub struct LocationCacheBuilder {
    context: Box<dyn ResourceContext>,
    chain: ProviderChain,
    module_graph: Option<Box<dyn ModuleGraph>>,
    parser: Box<dyn DescriptorParser>,
    opener: Box<dyn ArchiveOpener>,
    redeploy_mode: bool,
    reserved: ReservedIdentifierSet,
    exclusions: ExclusionList,
    prebuilt: Option<Mapping>,
    alternate_descriptor: Option<PathBuf>,
    local_continue_on_error: bool,
}

impl LocationCacheBuilder {
    fn new(context: Box<dyn ResourceContext>) -> Self {
        Self {
            context,
            chain: ProviderChain::default(),
            module_graph: None,
            parser: Box::new(XmlDescriptorParser::default()),
            opener: Box::new(FsArchiveOpener),
            redeploy_mode: true,
            reserved: ReservedIdentifierSet::default(),
            exclusions: ExclusionList::default(),
            prebuilt: None,
            alternate_descriptor: None,
            local_continue_on_error: true,
        }
    }

    pub fn chain(mut self, chain: ProviderChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn module_graph<G: ModuleGraph + 'static>(mut self, graph: G) -> Self {
        self.module_graph = Some(Box::new(graph));
        self
    }

    pub fn parser<P: DescriptorParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn archive_opener<O: ArchiveOpener + 'static>(mut self, opener: O) -> Self {
        self.opener = Box::new(opener);
        self
    }

    /// Open archives fresh for every scan instead of reusing handles.
    pub fn redeploy_mode(mut self, redeploy_mode: bool) -> Self {
        self.redeploy_mode = redeploy_mode;
        self
    }

    pub fn reserved(mut self, reserved: ReservedIdentifierSet) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn exclusions(mut self, exclusions: ExclusionList) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Replace the exclusion list with comma-separated archive names.
    pub fn no_tld_jars(mut self, names: &str) -> Self {
        self.exclusions.set_from_csv(names);
        self
    }

    /// Adopt a mapping produced by an earlier deployment-time pass.
    pub fn prebuilt_mapping(mut self, mapping: Mapping) -> Self {
        self.prebuilt = Some(mapping);
        self
    }

    pub fn alternate_descriptor<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.alternate_descriptor = Some(path.as_ref().to_path_buf());
        self
    }

    /// Error policy for the application-local provider's archives.
    pub fn local_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.local_continue_on_error = continue_on_error;
        self
    }

    pub fn build(self) -> LocationCache {
        LocationCache {
            context: self.context,
            chain: self.chain,
            module_graph: self.module_graph,
            parser: self.parser,
            handles: ArchiveHandles::new(self.opener, self.redeploy_mode),
            reserved: self.reserved,
            exclusions: self.exclusions,
            prebuilt: self.prebuilt,
            alternate_descriptor: self.alternate_descriptor,
            local_continue_on_error: self.local_continue_on_error,
            state: OnceLock::new(),
        }
    }
}
