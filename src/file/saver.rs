//! Document saving.
//!
//! Values are serialized as JSON or YAML, written to a temporary file and
//! renamed over the target. A `.bak` copy of the previous file is kept when
//! `create_backup` is set.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;

use super::{is_gzipped, Format};
use crate::config::Config;
use crate::value::Value;

/// Serializes `value` in `format`. JSON honours `config.pretty`.
pub fn serialize_value(value: &Value, format: Format, config: &Config) -> Result<String> {
    let mut out = match format {
        Format::Json if config.pretty => {
            serde_json::to_string_pretty(value).context("Failed to serialize JSON")?
        }
        Format::Json => serde_json::to_string(value).context("Failed to serialize JSON")?,
        Format::Yaml => serde_yaml::to_string(value).context("Failed to serialize YAML")?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Saves a value to a file with optional backup creation.
///
/// The format follows the file name (`.json`, `.yaml`, `.yml`, optionally
/// followed by `.gz`), falling back to `config.output_format`.
///
/// # Examples
///
/// ```no_run
/// use beanpath::config::Config;
/// use beanpath::file::saver::save_value_file;
/// use beanpath::value::Value;
///
/// save_value_file("out.yaml.gz", &Value::map(), &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Backup creation fails (if requested)
/// - Serialization fails
/// - Writing or renaming the temp file fails
pub fn save_value_file<P: AsRef<Path>>(path: P, value: &Value, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path).unwrap_or(config.output_format);

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let content = serialize_value(value, format, config)?;
    write_file_atomic(path, content.as_bytes(), is_gzipped(path))?;
    debug!("saved {} as {}", path.display(), format);
    Ok(())
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Writes to a sibling temp file, then renames it over `path`.
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;
    Ok(())
}
