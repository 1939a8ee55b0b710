//! File I/O for structured documents.
//!
//! This module loads JSON and YAML documents (optionally gzip compressed)
//! from disk or stdin into [`Value`](crate::value::Value)s, and saves values
//! back with atomic writes and optional backups.

pub mod loader;
pub mod saver;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Detects the format from a file name, looking through a `.gz` suffix.
    ///
    /// Returns `None` for unknown extensions.
    ///
    /// ```
    /// use beanpath::file::Format;
    ///
    /// assert_eq!(Format::from_path("data.yml.gz"), Some(Format::Yaml));
    /// assert_eq!(Format::from_path("data.json"), Some(Format::Json));
    /// assert_eq!(Format::from_path("data.txt"), None);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        let base = name.strip_suffix(".gz").unwrap_or(&name);
        if base.ends_with(".json") {
            Some(Format::Json)
        } else if base.ends_with(".yaml") || base.ends_with(".yml") {
            Some(Format::Yaml)
        } else {
            None
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(format!("unknown format '{}'", other)),
        }
    }
}

/// True if the path names a gzip compressed file.
pub(crate) fn is_gzipped<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
