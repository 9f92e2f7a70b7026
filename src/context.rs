//! The local resource namespace of the hosting application
//!
//! Resource paths are rooted (`/WEB-INF/web.xml`) and `/`-separated; directory
//! paths end with `/`. Two implementations are provided: [`DirectoryContext`]
//! serves an application directory on disk, [`MemoryContext`] serves a
//! [`MemoryFS`] for embedding and tests.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::error::Result;
use crate::filesystem::MemoryFS;

/// Read access to the application's own resources.
pub trait ResourceContext: Send + Sync {
    /// Immediate children of `dir`, or `None` when `dir` does not exist.
    fn resource_paths(&self, dir: &str) -> Option<BTreeSet<String>>;

    /// Open a resource, `Ok(None)` when it does not exist.
    fn open(&self, path: &str) -> Result<Option<Box<dyn Read + '_>>>;

    /// Physical location of a resource, `None` when it does not exist.
    fn resolve(&self, path: &str) -> Option<String>;
}

/// Application directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    root: PathBuf,
}

impl DirectoryContext {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn to_fs_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl ResourceContext for DirectoryContext {
    fn resource_paths(&self, dir: &str) -> Option<BTreeSet<String>> {
        let fs_dir = self.to_fs_path(dir);
        if !fs_dir.is_dir() {
            return None;
        }

        let base = format!("/{}", dir.trim_matches('/'));
        let base = base.trim_end_matches('/');
        let mut paths = BTreeSet::new();
        for entry in WalkDir::new(&fs_dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", fs_dir.display(), e);
                    continue;
                }
            };
            let Some(name) = entry.file_name().to_str() else {
                warn!("Skipping non-UTF-8 resource name {}", entry.path().display());
                continue;
            };
            if entry.file_type().is_dir() {
                paths.insert(format!("{}/{}/", base, name));
            } else {
                paths.insert(format!("{}/{}", base, name));
            }
        }
        Some(paths)
    }

    fn open(&self, path: &str) -> Result<Option<Box<dyn Read + '_>>> {
        let fs_path = self.to_fs_path(path);
        if !fs_path.is_file() {
            return Ok(None);
        }
        Ok(Some(Box::new(BufReader::new(File::open(fs_path)?))))
    }

    fn resolve(&self, path: &str) -> Option<String> {
        let fs_path = self.to_fs_path(path);
        fs_path.exists().then(|| fs_path.display().to_string())
    }
}

/// Resources held in memory, resolved against a display `base`.
#[derive(Debug, Clone, Default)]
pub struct MemoryContext {
    base: String,
    fs: MemoryFS,
}

impl MemoryContext {
    pub fn new(base: &str, fs: MemoryFS) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            fs,
        }
    }
}

impl ResourceContext for MemoryContext {
    fn resource_paths(&self, dir: &str) -> Option<BTreeSet<String>> {
        self.fs.list_dir(dir)
    }

    fn open(&self, path: &str) -> Result<Option<Box<dyn Read + '_>>> {
        Ok(self
            .fs
            .read(path)
            .map(|content| Box::new(content) as Box<dyn Read + '_>))
    }

    fn resolve(&self, path: &str) -> Option<String> {
        (self.fs.exists(path) || self.fs.is_dir(path))
            .then(|| format!("{}/{}", self.base, path.trim_start_matches('/')))
    }
}
