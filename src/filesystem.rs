//! In-memory resource tree backing embedded contexts and archives
//!
//! Paths are `/`-separated strings. A leading `/` is ignored when storing and
//! looking up files, so `/WEB-INF/web.xml` and `WEB-INF/web.xml` name the same
//! file. Directories are implicit: they exist whenever a file lives below them.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// In-memory file tree
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    /// Files stored as normalized path -> content
    files: BTreeMap<String, Vec<u8>>,
}

fn normalize(path: &str) -> &str {
    path.trim_start_matches('/')
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a file with raw content
    pub fn add_file_content(&mut self, path: &str, content: Vec<u8>) -> Result<()> {
        let path = normalize(path);
        if path.is_empty() || path.ends_with('/') {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a file path: {:?}", path),
            )));
        }
        self.files.insert(path.to_string(), content);
        Ok(())
    }

    /// Add a file with string content
    pub fn add_file_string(&mut self, path: &str, content: &str) -> Result<()> {
        self.add_file_content(path, content.as_bytes().to_vec())
    }

    /// Content of a file
    pub fn read(&self, path: &str) -> Option<&[u8]> {
        self.files.get(normalize(path)).map(Vec::as_slice)
    }

    /// Check if a file exists
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(normalize(path))
    }

    /// Check if any file lives below `dir`
    pub fn is_dir(&self, dir: &str) -> bool {
        let prefix = dir_prefix(dir);
        prefix.is_empty() || self.files.keys().any(|path| path.starts_with(&prefix))
    }

    /// List all files, sorted
    pub fn list_files(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    /// Immediate children of `dir` as rooted paths; directories end with `/`.
    ///
    /// Returns `None` when nothing lives below `dir`.
    pub fn list_dir(&self, dir: &str) -> Option<BTreeSet<String>> {
        let prefix = dir_prefix(dir);
        let mut children = BTreeSet::new();
        for path in self.files.keys() {
            let Some(rest) = path.strip_prefix(&prefix) else {
                continue;
            };
            match rest.find('/') {
                Some(slash) => children.insert(format!("/{}{}", prefix, &rest[..=slash])),
                None => children.insert(format!("/{}{}", prefix, rest)),
            };
        }
        (!children.is_empty()).then_some(children)
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// `"/WEB-INF"` and `"/WEB-INF/"` both become `"WEB-INF/"`; the root becomes `""`.
fn dir_prefix(dir: &str) -> String {
    let dir = normalize(dir).trim_end_matches('/');
    if dir.is_empty() {
        String::new()
    } else {
        format!("{}/", dir)
    }
}
