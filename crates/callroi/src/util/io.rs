//! Scenario and calculator file I/O

use std::fs;
use std::io;
use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialization format for files and command output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Yaml,
    Json,
}

impl DataFormat {
    /// Pick the format from a file extension (`.yaml`, `.yml`, `.json`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(DataFormat::Yaml),
            "json" => Some(DataFormat::Json),
            _ => None,
        }
    }
}

/// Parse a document in the given format
pub fn parse<T: DeserializeOwned>(content: &str, format: DataFormat) -> color_eyre::Result<T> {
    match format {
        DataFormat::Yaml => serde_saphyr::from_str(content).wrap_err("invalid YAML document"),
        DataFormat::Json => serde_json::from_str(content).wrap_err("invalid JSON document"),
    }
}

/// Serialize a value in the given format
pub fn render<T: Serialize>(value: &T, format: DataFormat) -> color_eyre::Result<String> {
    match format {
        DataFormat::Yaml => serde_saphyr::to_string(value).wrap_err("failed to write YAML"),
        DataFormat::Json => serde_json::to_string_pretty(value).wrap_err("failed to write JSON"),
    }
}

/// Load a YAML or JSON file, chosen by extension
pub fn load<T: DeserializeOwned>(path: &Path) -> color_eyre::Result<T> {
    let format = DataFormat::from_path(path).ok_or_else(|| {
        eyre!(
            "unsupported file type for {} (expected .yaml, .yml or .json)",
            path.display()
        )
    })?;

    let content =
        fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?format, "loading file");

    parse(&content, format).wrap_err_with(|| format!("failed to parse {}", path.display()))
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// The content is first written to a sibling temporary file, then renamed
/// over the target path.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    fs::write(temp_path, content)?;
    fs::rename(temp_path, path)?;

    Ok(())
}
