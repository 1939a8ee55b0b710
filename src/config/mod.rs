//! Configuration system for beanpath.
//!
//! This module provides the configuration structure for the `beanpath`
//! command with sensible defaults and support for serialization via serde.
//! Configuration is loaded from `~/.config/beanpath/config.toml` and merged
//! with command-line arguments.
//!
//! # Example
//!
//! ```
//! use beanpath::config::Config;
//! use beanpath::file::Format;
//!
//! let config = Config::default();
//! assert_eq!(config.output_format, Format::Json);
//! assert!(config.pretty);
//!
//! let custom = Config {
//!     output_format: Format::Yaml,
//!     ..Config::default()
//! };
//! assert!(!custom.create_backup);
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::bean::{CopyOptions, NamingStrategy};
use crate::file::Format;

/// Configuration for the beanpath command.
///
/// # Fields
///
/// * `output_format` - Format used for stdout and for files without a known extension (default: json)
/// * `pretty` - Indent JSON output (default: true)
/// * `log_level` - Log filter used when `RUST_LOG` is unset (default: "warn")
/// * `create_backup` - Create .bak files before overwriting (default: false)
/// * `copy` - Default copy options for `beanpath copy`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Format used for stdout and for files without a known extension
    #[serde(default)]
    pub output_format: Format,

    /// Indent JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Create .bak files before overwriting
    #[serde(default)]
    pub create_backup: bool,

    /// Default copy options
    #[serde(default)]
    pub copy: CopyConfig,
}

/// The `[copy]` section: defaults for `beanpath copy`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopyConfig {
    #[serde(default)]
    pub ignore_case: bool,

    #[serde(default)]
    pub ignore_error: bool,

    #[serde(default)]
    pub ignore_null_value: bool,

    /// Property names never copied
    #[serde(default)]
    pub excluded_fields: Vec<String>,

    /// Key naming applied to map targets
    #[serde(default)]
    pub naming_strategy: NamingStrategy,

    /// Source name to target name
    #[serde(default)]
    pub field_mapping: IndexMap<String, String>,
}

impl CopyConfig {
    /// Builds the equivalent [`CopyOptions`].
    pub fn to_options(&self) -> CopyOptions {
        let mut builder = CopyOptions::builder()
            .ignore_case(self.ignore_case)
            .ignore_error(self.ignore_error)
            .ignore_null_value(self.ignore_null_value)
            .exclude_all(self.excluded_fields.iter().cloned())
            .naming_strategy(self.naming_strategy);
        for (from, to) in &self.field_mapping {
            builder = builder.map_field(from.clone(), to.clone());
        }
        builder.build()
    }
}

/// Returns the default for pretty output.
fn default_pretty() -> bool {
    true
}

/// Returns the default log level.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: Format::default(),
            pretty: default_pretty(),
            log_level: default_log_level(),
            create_backup: false,
            copy: CopyConfig::default(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/beanpath/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("beanpath");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            log::warn!("ignoring config: {:#}", e);
            Self::default()
        })
    }

    /// Loads configuration from the default config file, reporting a file
    /// that exists but cannot be read or parsed.
    ///
    /// A missing file yields the default configuration.
    pub fn try_load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_optional(path),
            None => Ok(Self::default()),
        }
    }

    /// Like [`Config::load_from`], but a missing file is the default
    /// configuration rather than an error.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
