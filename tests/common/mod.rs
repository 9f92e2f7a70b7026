//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and descriptor
//! snippets to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_minimal_config();
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::io::Write;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::{taglib, web_xml};
    pub use super::TestFixture;
}

/// Common configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Application in `webapp/`, chain synthesized from `WEB-INF/lib`.
    pub const MINIMAL: &str = "web_root: webapp\n";

    /// Application plus a shared provider with two archives.
    pub const WITH_SHARED: &str = r#"
web_root: webapp
providers:
  - name: webapp
    archives: [webapp/WEB-INF/lib/app.jar]
  - name: shared
    archives: [shared/shared-tags.jar, shared/servlet-api.jar]
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "web_root: [unterminated";
}

/// A tag library descriptor declaring `uri`.
#[allow(dead_code)]
pub fn taglib(uri: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<taglib>\n  <tlib-version>1.0</tlib-version>\n  <uri>{uri}</uri>\n</taglib>\n"
    )
}

/// A deployment descriptor with one `<taglib>` declaration per `(uri, location)`.
#[allow(dead_code)]
pub fn web_xml(declarations: &[(&str, &str)]) -> String {
    let taglibs: String = declarations
        .iter()
        .map(|(uri, location)| {
            format!(
                "    <taglib>\n      <taglib-uri>{uri}</taglib-uri>\n      <taglib-location>{location}</taglib-location>\n    </taglib>\n"
            )
        })
        .collect();
    format!("<web-app>\n  <jsp-config>\n{taglibs}  </jsp-config>\n</web-app>\n")
}

/// A test fixture that provides a temporary directory with optional config.
///
/// This struct simplifies the common pattern of creating a temp directory
/// and populating it with a `.taglib-resolver.yaml` configuration file and
/// an application tree.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_minimal_config()
///     .with_file("webapp/WEB-INF/acme.tld", &taglib("urn:acme"));
///
/// fixture.command().arg("ls").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.taglib-resolver.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".taglib-resolver.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add the minimal valid configuration.
    pub fn with_minimal_config(self) -> Self {
        self.with_config(configs::MINIMAL)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add an exploded archive at `archive` holding one descriptor per
    /// `(entry name, uri)`.
    #[allow(dead_code)]
    pub fn with_archive(self, archive: &str, entries: &[(&str, &str)]) -> Self {
        let fixture = self.with_dir(archive);
        entries.iter().fold(fixture, |fixture, (entry, uri)| {
            fixture.with_file(&format!("{archive}/{entry}"), &taglib(uri))
        })
    }

    /// Add a packed archive (a real zip) at `archive` holding one descriptor
    /// per `(entry name, uri)`.
    #[allow(dead_code)]
    pub fn with_packed_archive(self, archive: &str, entries: &[(&str, &str)]) -> Self {
        let child = self.temp_dir.child(archive);
        if let Some(parent) = child.path().parent() {
            std::fs::create_dir_all(parent).expect("Failed to create archive directory");
        }
        let file = std::fs::File::create(child.path()).expect("Failed to create archive");
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (entry, uri) in entries {
            writer
                .start_file(*entry, options)
                .expect("Failed to start archive entry");
            writer
                .write_all(taglib(uri).as_bytes())
                .expect("Failed to write archive entry");
        }
        writer.finish().expect("Failed to finish archive");
        self
    }

    /// Create an empty directory.
    #[allow(dead_code)]
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    #[allow(dead_code)]
    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".taglib-resolver.yaml")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("taglib-resolver");
        cmd.current_dir(self.path());
        cmd.env_remove("TAGLIB_RESOLVER_CONFIG");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_archive() {
        let fixture = TestFixture::new().with_archive("lib/a.jar", &[("META-INF/a.tld", "urn:a")]);
        assert!(fixture.path().join("lib/a.jar/META-INF/a.tld").is_file());
    }

    #[test]
    fn test_fixture_with_packed_archive() {
        let fixture =
            TestFixture::new().with_packed_archive("lib/a.jar", &[("META-INF/a.tld", "urn:a")]);
        assert!(fixture.path().join("lib/a.jar").is_file());
    }

    #[test]
    fn test_web_xml_contains_declarations() {
        let xml = web_xml(&[("urn:a", "/WEB-INF/a.tld")]);
        assert!(xml.contains("<taglib-uri>urn:a</taglib-uri>"));
        assert!(xml.contains("<jsp-config>"));
    }
}
