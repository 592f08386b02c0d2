//! Test utilities and shared fixtures for the dotconf workspace.
//!
//! Enabled for this crate's own tests and, for downstream crates, through the
//! `testing` feature.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// A temporary configuration directory populated with namespace source files.
///
/// The directory and everything in it are removed when the fixture is dropped.
pub struct ConfigDirFixture {
    dir: TempDir,
}

impl ConfigDirFixture {
    /// Create an empty fixture directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temporary directory"),
        }
    }

    /// Root of the fixture directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<namespace>.<extension>` with the given contents and return its path.
    pub fn write_namespace(&self, namespace: &str, extension: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(format!("{namespace}.{extension}"));
        fs::write(&path, contents).expect("Failed to write namespace fixture");
        path
    }

    /// Builder form of [`write_namespace`](Self::write_namespace).
    #[must_use]
    pub fn with_namespace(self, namespace: &str, extension: &str, contents: &str) -> Self {
        self.write_namespace(namespace, extension, contents);
        self
    }

    /// A path inside the fixture that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.dir.path().join("does-not-exist")
    }
}

impl Default for ConfigDirFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON source used across the workspace tests, shaped like a typical application namespace.
pub const APP_JSON: &str = r#"{
    "name": "MyApp",
    "url": "https://example.com",
    "debug": null,
    "twig": {
        "cache": "/tmp/twig",
        "auto": true
    },
    "locales": ["en", "fr"]
}"#;

/// YAML source for a `database` namespace.
pub const DATABASE_YAML: &str = "\
driver: sqlite
connection:
  path: /var/lib/app.db
  pool: 4
";

/// TOML source for a `mail` namespace.
pub const MAIL_TOML: &str = r#"
from = "noreply@example.com"

[smtp]
host = "smtp.example.com"
port = 587
"#;
