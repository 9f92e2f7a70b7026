//! Module dependency graph capability
//!
//! Some hosts wire applications together from modules that import each
//! other's packages. Descriptors living in those imported modules are visible
//! to the application without being on any provider's archive list, so the
//! host exposes them through [`ModuleGraph`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use glob::Pattern;
use log::warn;
use walkdir::WalkDir;

use crate::archive::location_to_path;
use crate::error::{Error, Result};
use crate::filesystem::MemoryFS;
use crate::uri::basename;

/// Descriptor-bearing resources reachable through module imports.
pub trait ModuleGraph: Send + Sync {
    /// References of resources directly under `namespace` whose file name
    /// matches the glob `pattern`.
    fn descriptor_resources(&self, namespace: &str, pattern: &str) -> Result<Vec<String>>;

    /// Open a reference returned by [`ModuleGraph::descriptor_resources`].
    fn open(&self, resource: &str) -> Result<Box<dyn Read + '_>>;
}

/// Module roots on disk, each laid out like an exploded archive.
#[derive(Debug, Clone, Default)]
pub struct DirectoryModuleGraph {
    modules: Vec<PathBuf>,
}

impl DirectoryModuleGraph {
    pub fn new(modules: Vec<PathBuf>) -> Self {
        Self { modules }
    }
}

impl ModuleGraph for DirectoryModuleGraph {
    fn descriptor_resources(&self, namespace: &str, pattern: &str) -> Result<Vec<String>> {
        let pattern = Pattern::new(pattern)?;
        let mut resources = Vec::new();
        for module in &self.modules {
            let dir = module.join(namespace.trim_matches('/'));
            if !dir.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(name) = entry.file_name().to_str() else {
                    warn!("Skipping non-UTF-8 resource name {}", entry.path().display());
                    continue;
                };
                if pattern.matches(name) {
                    resources.push(format!("file:{}", entry.path().display()));
                }
            }
        }
        Ok(resources)
    }

    fn open(&self, resource: &str) -> Result<Box<dyn Read + '_>> {
        let file = File::open(location_to_path(resource))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Modules held in memory; references look like `module!/META-INF/x.tld`.
#[derive(Debug, Clone, Default)]
pub struct MemoryModuleGraph {
    modules: Vec<(String, MemoryFS)>,
}

impl MemoryModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, name: &str, fs: MemoryFS) {
        self.modules.push((name.to_string(), fs));
    }
}

impl ModuleGraph for MemoryModuleGraph {
    fn descriptor_resources(&self, namespace: &str, pattern: &str) -> Result<Vec<String>> {
        let pattern = Pattern::new(pattern)?;
        let mut resources = Vec::new();
        for (name, fs) in &self.modules {
            let Some(children) = fs.list_dir(namespace) else {
                continue;
            };
            resources.extend(
                children
                    .into_iter()
                    .filter(|path| !path.ends_with('/') && pattern.matches(basename(path)))
                    .map(|path| format!("{}!{}", name, path)),
            );
        }
        Ok(resources)
    }

    fn open(&self, resource: &str) -> Result<Box<dyn Read + '_>> {
        let not_found = || {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("module resource not found: {}", resource),
            ))
        };
        let (module, path) = resource.split_once('!').ok_or_else(not_found)?;
        let (_, fs) = self
            .modules
            .iter()
            .find(|(name, _)| name == module)
            .ok_or_else(not_found)?;
        let content = fs.read(path).ok_or_else(not_found)?;
        Ok(Box::new(content))
    }
}
