//! Namespace loaders: the collaborators that turn a namespace name into a raw document.

use dotconf_common::{DotConfError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Produces the raw document for a namespace.
///
/// Implementations report a missing source as [`DotConfError::NotFound`] and
/// unreadable content as [`DotConfError::InvalidFormat`]. They may return any
/// value; the store rejects anything that is not a mapping.
#[cfg_attr(test, mockall::automock)]
pub trait Loader {
    /// Load the document for `namespace`.
    fn load(&self, namespace: &str) -> Result<Value>;
}

impl<L: Loader + ?Sized> Loader for &L {
    fn load(&self, namespace: &str) -> Result<Value> {
        (**self).load(namespace)
    }
}

impl<L: Loader + ?Sized> Loader for Box<L> {
    fn load(&self, namespace: &str) -> Result<Value> {
        (**self).load(namespace)
    }
}

/// On-disk format of namespace source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// `<namespace>.json`
    #[default]
    Json,
    /// `<namespace>.yaml` or `<namespace>.yml`
    Yaml,
    /// `<namespace>.toml`
    Toml,
}

type ParseError = Box<dyn std::error::Error + Send + Sync>;

impl SourceFormat {
    /// File extensions tried for this format, in order of preference.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
            Self::Toml => &["toml"],
        }
    }

    /// Format matching a file extension, if any.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        [Self::Json, Self::Yaml, Self::Toml]
            .into_iter()
            .find(|format| format.extensions().contains(&extension))
    }

    fn parse_raw(self, content: &str) -> std::result::Result<Value, ParseError> {
        Ok(match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml_to_json(toml::from_str(content)?),
        })
    }

    /// Parse `content` into a value.
    pub fn parse(self, content: &str) -> Result<Value> {
        self.parse_raw(content)
            .map_err(|source| DotConfError::InvalidFormat {
                message: format!("content is not valid {self}"),
                source: Some(source),
            })
    }
}

/// TOML datetimes become their RFC 3339 text; everything else maps one to one.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        };
        f.write_str(name)
    }
}

impl FromStr for SourceFormat {
    type Err = DotConfError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::from_extension(&normalized).ok_or_else(|| {
            DotConfError::invalid_argument(format!(
                "unknown source format '{s}' (expected json, yaml or toml)"
            ))
        })
    }
}

/// Loads `<directory>/<namespace>.<extension>` files of one [`SourceFormat`].
#[derive(Debug, Clone)]
pub struct FileLoader {
    directory: PathBuf,
    format: SourceFormat,
}

impl FileLoader {
    /// Create a loader reading from `directory`, which must already exist.
    pub fn new(directory: impl Into<PathBuf>, format: SourceFormat) -> Result<Self> {
        let directory = directory.into();
        if !directory.is_dir() {
            return Err(DotConfError::not_found_at(
                format!("No directory found at: {}", directory.display()),
                &directory,
            ));
        }
        Ok(Self { directory, format })
    }

    /// Directory namespace files are read from.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Format namespace files are parsed as.
    #[must_use]
    pub const fn format(&self) -> SourceFormat {
        self.format
    }

    /// File a namespace is read from.
    ///
    /// The first candidate extension that exists wins; when none exists the
    /// primary extension is reported.
    #[must_use]
    pub fn source_path(&self, namespace: &str) -> PathBuf {
        let candidates = self
            .format
            .extensions()
            .iter()
            .map(|ext| self.directory.join(format!("{namespace}.{ext}")));
        let mut primary = None;
        for candidate in candidates {
            if candidate.is_file() {
                return candidate;
            }
            primary.get_or_insert(candidate);
        }
        primary.unwrap_or_else(|| self.directory.join(namespace))
    }
}

/// A namespace must name a file directly inside the source directory.
fn is_plain_file_stem(namespace: &str) -> bool {
    let mut components = Path::new(namespace).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl Loader for FileLoader {
    fn load(&self, namespace: &str) -> Result<Value> {
        if !is_plain_file_stem(namespace) {
            return Err(DotConfError::not_found(format!(
                "No config file can exist for namespace '{namespace}'"
            )));
        }

        let path = self.source_path(namespace);
        if !path.is_file() {
            return Err(DotConfError::not_found_at(
                format!("No config file exists at: {}", path.display()),
                &path,
            ));
        }

        debug!(namespace, path = %path.display(), format = %self.format, "reading namespace source");
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                DotConfError::invalid_format_with_source(
                    format!("Config file at: {} is not valid UTF-8", path.display()),
                    e,
                )
            } else {
                DotConfError::Io(e)
            }
        })?;
        self.format
            .parse_raw(&content)
            .map_err(|source| DotConfError::InvalidFormat {
                message: format!("Config file at: {} is not valid {}", path.display(), self.format),
                source: Some(source),
            })
    }
}

/// An in-process registry of namespace documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    namespaces: HashMap<String, Value>,
}

impl MemoryLoader {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `document` under `namespace`, replacing any earlier registration.
    pub fn insert(&mut self, namespace: impl Into<String>, document: Value) {
        self.namespaces.insert(namespace.into(), document);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>, document: Value) -> Self {
        self.insert(namespace, document);
        self
    }

    /// Whether a namespace is registered.
    #[must_use]
    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }
}

impl Loader for MemoryLoader {
    fn load(&self, namespace: &str) -> Result<Value> {
        self.namespaces
            .get(namespace)
            .cloned()
            .ok_or_else(|| DotConfError::not_found(format!("No namespace registered as: {namespace}")))
    }
}
