//! # Configuration Schema and Parsing
//!
//! This module defines the `.taglib-resolver.yaml` configuration file, which
//! describes one hosting application: where its resources live, which
//! providers make up its delegation chain, and the policy knobs of the
//! resolution pipeline.
//!
//! ```yaml
//! web_root: ./webapp
//! providers:
//!   - name: webapp
//!     archives: [./webapp/WEB-INF/lib/acme.jar]
//!   - name: shared
//!     archives: [/opt/server/lib/shared-tags.jar]
//! modules: [./modules/jstl]
//! no_tld_jars: "catalina.jar,servlet-api.jar"
//! honor_alternate_framework: false
//! redeploy_mode: true
//! ```
//!
//! Relative paths are resolved against the directory containing the
//! configuration file. When `providers` is omitted, a single application-local
//! provider is synthesized from the archives found in `WEB-INF/lib`.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::cache::LocationCache;
use crate::chain::{Provider, ProviderChain};
use crate::context::DirectoryContext;
use crate::defaults::JAR_SUFFIX;
use crate::descriptor::XmlDescriptorParser;
use crate::error::{Error, Result};
use crate::module_graph::DirectoryModuleGraph;
use crate::record::Mapping;
use crate::reserved::ReservedIdentifierSet;

fn default_true() -> bool {
    true
}

/// Parsed `.taglib-resolver.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Directory backing the application's resource namespace.
    pub web_root: PathBuf,
    /// Deployment descriptor to read instead of `WEB-INF/web.xml`.
    #[serde(default)]
    pub deployment_descriptor: Option<PathBuf>,
    /// Delegation chain, application-local provider first.
    #[serde(default)]
    pub providers: Vec<Provider>,
    /// Module roots whose `META-INF` descriptors are visible to the application.
    #[serde(default)]
    pub modules: Vec<PathBuf>,
    /// Comma-separated archive names to skip on shared providers.
    ///
    /// Replaces the built-in list when present.
    #[serde(default)]
    pub no_tld_jars: Option<String>,
    /// Exempt the conditionally reserved identifiers.
    #[serde(default)]
    pub honor_alternate_framework: bool,
    /// Open archives fresh for every scan.
    #[serde(default = "default_true")]
    pub redeploy_mode: bool,
    /// Require descriptors to have a `<taglib>` root element.
    #[serde(default)]
    pub validate: bool,
    /// Skip unreadable archives of the application-local provider.
    #[serde(default = "default_true")]
    pub local_continue_on_error: bool,
    /// Identifiers never registered.
    #[serde(default)]
    pub reserved: Vec<String>,
    /// Identifiers reserved unless `honor_alternate_framework` is set.
    #[serde(default)]
    pub reserved_conditional: Vec<String>,
    /// JSON mapping written by an earlier deployment-time pass.
    #[serde(default)]
    pub prebuilt_mapping: Option<PathBuf>,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Parse a YAML configuration string
pub fn parse(yaml_content: &str) -> Result<ResolverConfig> {
    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: hint_for(&e.to_string()),
    })
}

fn hint_for(message: &str) -> Option<String> {
    if message.contains("missing field `web_root`") {
        Some("Add 'web_root:' pointing at the application directory".to_string())
    } else if message.contains("unknown field") {
        Some("Check the field name against the documented configuration keys".to_string())
    } else {
        None
    }
}

/// Load configuration from file; relative paths resolve against its directory
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ResolverConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let mut config = parse(&content)?;
    config.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(config)
}

impl ResolverConfig {
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn resolve_location(&self, location: &str) -> String {
        let path = Path::new(location.strip_prefix("file:").unwrap_or(location));
        self.resolve_path(path).display().to_string()
    }

    pub fn web_root(&self) -> PathBuf {
        self.resolve_path(&self.web_root)
    }

    /// The provider chain with every archive location made absolute.
    pub fn provider_chain(&self) -> ProviderChain {
        if self.providers.is_empty() {
            return ProviderChain::new(vec![Provider::new("webapp", self.web_inf_lib_archives())]);
        }
        ProviderChain::new(
            self.providers
                .iter()
                .map(|provider| Provider {
                    name: provider.name.clone(),
                    archives: provider.archives.as_ref().map(|archives| {
                        archives
                            .iter()
                            .map(|location| self.resolve_location(location))
                            .collect()
                    }),
                })
                .collect(),
        )
    }

    /// Archives directly inside `WEB-INF/lib`, sorted by name.
    fn web_inf_lib_archives(&self) -> Vec<String> {
        let lib = self.web_root().join("WEB-INF").join("lib");
        if !lib.is_dir() {
            return Vec::new();
        }
        let mut archives = Vec::new();
        for entry in WalkDir::new(&lib)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) if entry.file_name().to_string_lossy().ends_with(JAR_SUFFIX) => {
                    archives.push(entry.path().display().to_string());
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry under {}: {}", lib.display(), e),
            }
        }
        archives
    }

    pub fn reserved_identifiers(&self) -> ReservedIdentifierSet {
        ReservedIdentifierSet::with_sets(self.reserved.clone(), self.reserved_conditional.clone())
            .honor_alternate_framework(self.honor_alternate_framework)
    }

    /// Build the cache described by this configuration.
    pub fn build_cache(&self) -> Result<LocationCache> {
        let mut builder = LocationCache::builder(DirectoryContext::new(self.web_root()))
            .chain(self.provider_chain())
            .parser(XmlDescriptorParser::new(self.validate))
            .redeploy_mode(self.redeploy_mode)
            .reserved(self.reserved_identifiers())
            .local_continue_on_error(self.local_continue_on_error);

        if let Some(names) = &self.no_tld_jars {
            builder = builder.no_tld_jars(names);
        }
        if let Some(descriptor) = &self.deployment_descriptor {
            builder = builder.alternate_descriptor(self.resolve_path(descriptor));
        }
        if !self.modules.is_empty() {
            let modules = self.modules.iter().map(|m| self.resolve_path(m)).collect();
            builder = builder.module_graph(DirectoryModuleGraph::new(modules));
        }
        if let Some(path) = &self.prebuilt_mapping {
            builder = builder.prebuilt_mapping(Mapping::from_json_file(self.resolve_path(path))?);
        }
        Ok(builder.build())
    }
}
