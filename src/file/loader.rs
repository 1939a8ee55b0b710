//! Document loading.
//!
//! Files are read (and decompressed when they end in `.gz`), then parsed as
//! JSON or YAML depending on the file name. Unknown extensions and stdin try
//! JSON first and fall back to YAML.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::debug;

use super::{is_gzipped, Format};
use crate::value::Value;

/// Loads and parses a document from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use beanpath::file::loader::load_value_file;
///
/// let value = load_value_file("user.yaml").unwrap();
/// println!("{}", value["name"]);
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read or decompressed
/// - The contents are not valid in the detected format
pub fn load_value_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();

    let content = if is_gzipped(path) {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    debug!("loaded {} bytes from {}", content.len(), path.display());
    parse_document(&content, Format::from_path(path))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Loads and parses a document from standard input.
///
/// Gzip input is detected by its magic bytes.
pub fn load_value_from_stdin() -> Result<Value> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_document(&content, None).context("Failed to parse stdin")
}

/// Parses `content` in the given format, or sniffs it when `format` is
/// `None`.
pub fn parse_document(content: &str, format: Option<Format>) -> Result<Value> {
    match format {
        Some(Format::Json) => serde_json::from_str(content).context("Invalid JSON"),
        Some(Format::Yaml) => serde_yaml::from_str(content).context("Invalid YAML"),
        None => match serde_json::from_str(content) {
            Ok(value) => Ok(value),
            Err(_) => serde_yaml::from_str(content)
                .context("Input is neither valid JSON nor valid YAML"),
        },
    }
}

fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
