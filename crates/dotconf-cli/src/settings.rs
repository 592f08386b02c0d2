//! Tool settings: an optional YAML file, overridden by command line flags.

use crate::args::Args;
use dotconf_common::{DotConfError, LoggingConfig, Result};
use dotconf_store::SourceFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// Directory holding one source file per namespace
    pub directory: PathBuf,
    /// Format of namespace files
    pub format: SourceFormat,
    /// Logging setup
    pub logging: LoggingConfig,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("config"),
            format: SourceFormat::Json,
            logging: LoggingConfig::default(),
        }
    }
}

impl CliSettings {
    /// Load settings from a YAML file; missing keys take their defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DotConfError::settings_with_source(
                format!("Failed to read settings file {}", path.display()),
                e,
            )
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            DotConfError::settings_with_source(
                format!("Failed to parse settings file {}", path.display()),
                e,
            )
        })
    }

    /// Settings for `args`: the settings file (or defaults), then flag overrides, then validation
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut settings = match &args.settings {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        settings.apply_overrides(args);
        settings.validate()?;
        debug!(?settings, "settings resolved");
        Ok(settings)
    }

    /// Apply command line overrides
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(dir) = &args.dir {
            self.directory.clone_from(dir);
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        if let Some(level) = &args.log_level {
            self.logging.level.clone_from(level);
        }
        if let Some(format) = args.log_format {
            self.logging.format = format;
        }
    }

    /// Check the settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(DotConfError::settings("directory cannot be empty"));
        }
        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            DotConfError::settings_with_source(
                format!("invalid log level '{}'", self.logging.level),
                e,
            )
        })?;
        Ok(())
    }
}
