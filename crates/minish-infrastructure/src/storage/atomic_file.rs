//! Atomic whole-file replacement.
//!
//! Provides a thin layer for rewriting small state files without ever leaving
//! a half-written file behind.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use minish_core::error::{Result, ShellError};

/// A handle to a text file that is only ever replaced as a whole.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile {
    path: PathBuf,
}

impl AtomicFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(String))`: File content
    /// - `Ok(None)`: File doesn't exist
    /// - `Err`: Failed to read the file
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ShellError::io(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Replaces the file content atomically.
    ///
    /// Writes to a temporary file in the same directory, syncs it, then
    /// renames it over the target.
    pub fn save(&self, content: &str) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Gets a temporary file path for atomic writes.
    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self.path.file_name().ok_or_else(|| {
            ShellError::io(format!("Path has no file name: {}", self.path.display()))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}
