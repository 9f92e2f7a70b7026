//! Archive access and handle lifetime
//!
//! An [`Archive`] enumerates entry names and opens entries as streams. The
//! packaging format itself is behind the [`ArchiveOpener`] seam: this crate
//! ships a filesystem opener that reads packed (zip) archives and exploded
//! archives (a directory laid out like the archive contents), and an
//! in-memory opener.
//!
//! [`ArchiveHandles`] decides how long an opened archive stays open. Outside
//! redeploy mode handles are cached by location and reused across scans; a
//! handle whose scan failed is evicted. In redeploy mode every acquisition
//! opens a fresh archive that is released when the [`ArchiveHandle`] drops, so
//! the archive can be replaced on disk between deployments.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::filesystem::MemoryFS;

/// An opened archive.
pub trait Archive: Send + Sync {
    /// The reference this archive was opened from.
    fn location(&self) -> &str;

    /// All entry names, `/`-separated and relative to the archive root.
    fn entry_names(&self) -> Result<Vec<String>>;

    /// Open one entry as a stream.
    fn open_entry(&self, name: &str) -> Result<Box<dyn Read + '_>>;
}

/// Opens archives from their location strings.
pub trait ArchiveOpener: Send + Sync {
    fn open(&self, location: &str) -> Result<Arc<dyn Archive>>;
}

/// Strip a `file:` scheme, leaving a filesystem path.
pub fn location_to_path(location: &str) -> &str {
    location.strip_prefix("file:").unwrap_or(location)
}

/// Archive extracted into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryArchive {
    location: String,
    root: PathBuf,
}

impl DirectoryArchive {
    pub fn new(location: &str, root: &Path) -> Self {
        Self {
            location: location.to_string(),
            root: root.to_path_buf(),
        }
    }
}

impl Archive for DirectoryArchive {
    fn location(&self) -> &str {
        &self.location
    }

    fn entry_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = entry.map_err(|e| Error::archive_scan(&self.location, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| Error::archive_scan(&self.location, e))?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    fn open_entry(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let file = File::open(self.root.join(name))
            .map_err(|e| Error::archive_scan(&self.location, format!("{}: {}", name, e)))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Packed archive (jar/zip) on disk.
///
/// Entries are read whole; descriptors are small.
pub struct ZipFileArchive {
    location: String,
    zip: Mutex<ZipArchive<BufReader<File>>>,
}

impl ZipFileArchive {
    pub fn open(location: &str, path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::archive_scan(location, e))?;
        let zip = ZipArchive::new(BufReader::new(file))
            .map_err(|e| Error::archive_scan(location, format!("not a readable archive: {}", e)))?;
        Ok(Self {
            location: location.to_string(),
            zip: Mutex::new(zip),
        })
    }
}

impl Archive for ZipFileArchive {
    fn location(&self) -> &str {
        &self.location
    }

    fn entry_names(&self) -> Result<Vec<String>> {
        let zip = lock(&self.zip);
        let mut names: Vec<String> = zip
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }

    fn open_entry(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let mut zip = lock(&self.zip);
        let mut entry = zip
            .by_name(name)
            .map_err(|e| Error::archive_scan(&self.location, format!("{}: {}", name, e)))?;
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| Error::archive_scan(&self.location, format!("{}: {}", name, e)))?;
        Ok(Box::new(Cursor::new(content)))
    }
}

/// Opens archives on the local filesystem: a directory is an exploded
/// archive, a file is read as a zip.
#[derive(Debug, Clone, Default)]
pub struct FsArchiveOpener;

impl ArchiveOpener for FsArchiveOpener {
    fn open(&self, location: &str) -> Result<Arc<dyn Archive>> {
        let path = Path::new(location_to_path(location));
        if path.is_dir() {
            Ok(Arc::new(DirectoryArchive::new(location, path)))
        } else if path.is_file() {
            Ok(Arc::new(ZipFileArchive::open(location, path)?))
        } else {
            Err(Error::archive_scan(location, "archive not found"))
        }
    }
}

/// Archive held in memory.
#[derive(Debug, Clone)]
pub struct MemoryArchive {
    location: String,
    fs: MemoryFS,
}

impl MemoryArchive {
    pub fn new(location: &str, fs: MemoryFS) -> Self {
        Self {
            location: location.to_string(),
            fs,
        }
    }
}

impl Archive for MemoryArchive {
    fn location(&self) -> &str {
        &self.location
    }

    fn entry_names(&self) -> Result<Vec<String>> {
        Ok(self.fs.list_files())
    }

    fn open_entry(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        match self.fs.read(name) {
            Some(content) => Ok(Box::new(content)),
            None => Err(Error::archive_scan(
                &self.location,
                format!("no such entry: {}", name),
            )),
        }
    }
}

/// Opens archives registered in memory and records every open.
#[derive(Debug, Default)]
pub struct MemoryArchiveOpener {
    archives: HashMap<String, MemoryFS>,
    opened: Mutex<Vec<String>>,
}

impl MemoryArchiveOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register archive contents under `location`.
    pub fn insert(&mut self, location: &str, fs: MemoryFS) {
        self.archives.insert(location.to_string(), fs);
    }

    /// Locations opened so far, in order, including failed attempts.
    pub fn opened(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }
}

impl ArchiveOpener for MemoryArchiveOpener {
    fn open(&self, location: &str) -> Result<Arc<dyn Archive>> {
        lock(&self.opened).push(location.to_string());
        match self.archives.get(location) {
            Some(fs) => Ok(Arc::new(MemoryArchive::new(location, fs.clone()))),
            None => Err(Error::archive_scan(location, "archive not found")),
        }
    }
}

impl<T: ArchiveOpener + ?Sized> ArchiveOpener for Arc<T> {
    fn open(&self, location: &str) -> Result<Arc<dyn Archive>> {
        (**self).open(location)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Archive handle policy shared by all scans of one cache.
pub struct ArchiveHandles {
    opener: Box<dyn ArchiveOpener>,
    redeploy_mode: bool,
    cached: Mutex<HashMap<String, Arc<dyn Archive>>>,
}

impl ArchiveHandles {
    pub fn new(opener: Box<dyn ArchiveOpener>, redeploy_mode: bool) -> Self {
        Self {
            opener,
            redeploy_mode,
            cached: Mutex::new(HashMap::new()),
        }
    }

    pub fn redeploy_mode(&self) -> bool {
        self.redeploy_mode
    }

    /// Open (or reuse) the archive at `location`.
    pub fn acquire(&self, location: &str) -> Result<ArchiveHandle<'_>> {
        let archive = if self.redeploy_mode {
            self.opener.open(location)?
        } else {
            let mut cached = lock(&self.cached);
            match cached.get(location) {
                Some(archive) => Arc::clone(archive),
                None => {
                    let archive = self.opener.open(location)?;
                    cached.insert(location.to_string(), Arc::clone(&archive));
                    archive
                }
            }
        };

        Ok(ArchiveHandle {
            archive,
            owner: self,
            location: location.to_string(),
            failed: false,
        })
    }

    /// Number of handles currently held open for reuse.
    pub fn cached_len(&self) -> usize {
        lock(&self.cached).len()
    }
}

/// Scoped access to an archive; see [`ArchiveHandles`].
pub struct ArchiveHandle<'a> {
    archive: Arc<dyn Archive>,
    owner: &'a ArchiveHandles,
    location: String,
    failed: bool,
}

impl ArchiveHandle<'_> {
    /// Evict the cached handle on drop.
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }
}

impl Deref for ArchiveHandle<'_> {
    type Target = dyn Archive;

    fn deref(&self) -> &Self::Target {
        self.archive.as_ref()
    }
}

impl Drop for ArchiveHandle<'_> {
    fn drop(&mut self) {
        if self.failed && !self.owner.redeploy_mode {
            debug!("evicting archive handle {}", self.location);
            lock(&self.owner.cached).remove(&self.location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn opener_with(location: &str) -> Arc<MemoryArchiveOpener> {
        let mut fs = MemoryFS::new();
        fs.add_file_string("META-INF/a.tld", "<taglib/>").unwrap();
        let mut opener = MemoryArchiveOpener::new();
        opener.insert(location, fs);
        Arc::new(opener)
    }

    #[test]
    fn test_reuse_mode_opens_once() {
        let opener = opener_with("a.jar");
        let handles = ArchiveHandles::new(Box::new(Arc::clone(&opener)), false);
        {
            let handle = handles.acquire("a.jar").unwrap();
            assert_eq!(handle.entry_names().unwrap(), vec!["META-INF/a.tld"]);
        }
        handles.acquire("a.jar").unwrap();
        assert_eq!(opener.opened(), vec!["a.jar"]);
        assert_eq!(handles.cached_len(), 1);
    }

    #[test]
    fn test_redeploy_mode_opens_fresh_and_caches_nothing() {
        let opener = opener_with("a.jar");
        let handles = ArchiveHandles::new(Box::new(Arc::clone(&opener)), true);
        handles.acquire("a.jar").unwrap();
        handles.acquire("a.jar").unwrap();
        assert_eq!(opener.opened(), vec!["a.jar", "a.jar"]);
        assert_eq!(handles.cached_len(), 0);
    }

    #[test]
    fn test_failed_handle_is_evicted() {
        let opener = opener_with("a.jar");
        let handles = ArchiveHandles::new(Box::new(Arc::clone(&opener)), false);
        {
            let mut handle = handles.acquire("a.jar").unwrap();
            handle.mark_failed();
        }
        assert_eq!(handles.cached_len(), 0);
    }

    #[test]
    fn test_missing_archive_is_scan_error() {
        let handles = ArchiveHandles::new(Box::new(MemoryArchiveOpener::new()), false);
        let err = handles.acquire("missing.jar").err().unwrap();
        assert!(matches!(err, Error::ArchiveScan { .. }));
    }

    #[test]
    fn test_directory_archive_entries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("acme.jar");
        std::fs::create_dir_all(root.join("META-INF/tlds")).unwrap();
        std::fs::write(root.join("META-INF/tlds/acme.tld"), "<taglib/>").unwrap();
        std::fs::write(root.join("META-INF/MANIFEST.MF"), "Manifest-Version: 1.0").unwrap();

        let location = format!("file:{}", root.display());
        let archive = FsArchiveOpener.open(&location).unwrap();
        assert_eq!(archive.location(), location);
        assert_eq!(
            archive.entry_names().unwrap(),
            vec!["META-INF/MANIFEST.MF", "META-INF/tlds/acme.tld"]
        );

        let mut content = String::new();
        archive
            .open_entry("META-INF/tlds/acme.tld")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<taglib/>");
    }

    fn write_jar(path: &Path, entries: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        let options = zip::write::SimpleFileOptions::default();
        writer.add_directory("META-INF/", options).unwrap();
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            std::io::Write::write_all(&mut writer, content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_packed_archive_entries() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("acme.jar");
        write_jar(
            &jar,
            &[
                ("META-INF/tlds/acme.tld", "<taglib/>"),
                ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0"),
            ],
        );

        let location = jar.display().to_string();
        let archive = FsArchiveOpener.open(&location).unwrap();
        assert_eq!(archive.location(), location);
        assert_eq!(
            archive.entry_names().unwrap(),
            vec!["META-INF/MANIFEST.MF", "META-INF/tlds/acme.tld"]
        );

        let mut content = String::new();
        archive
            .open_entry("META-INF/tlds/acme.tld")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<taglib/>");
        assert!(archive.open_entry("META-INF/missing.tld").is_err());
    }

    #[test]
    fn test_empty_packed_archive_opens() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("empty.jar");
        zip::ZipWriter::new(File::create(&jar).unwrap()).finish().unwrap();

        let archive = FsArchiveOpener.open(&jar.display().to_string()).unwrap();
        assert!(archive.entry_names().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_packed_archive_is_scan_error() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("corrupt.jar");
        std::fs::write(&jar, b"PK\x03\x04").unwrap();
        let err = FsArchiveOpener.open(&jar.display().to_string()).err().unwrap();
        assert!(matches!(err, Error::ArchiveScan { ref archive, .. } if archive.ends_with("corrupt.jar")));
    }
}
