//! Loads `ShellConfig` from TOML.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use minish_core::config::ShellConfig;
use minish_core::error::{Result, ShellError};

/// Reads the configuration file at `path`.
///
/// A missing file yields the defaults. An unreadable or malformed file is a
/// `Config` error.
pub fn load_config(path: &Path) -> Result<ShellConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(ShellConfig::default());
        }
        Err(e) => {
            return Err(ShellError::config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };

    toml::from_str(&content)
        .map_err(|e| ShellError::config(format!("Invalid config {}: {}", path.display(), e)))
}
