//! Directory-backed trash store.

use std::fs;
use std::path::{Path, PathBuf};

use minish_core::error::{Result, ShellError};
use minish_core::fs::FileSystem;
use minish_core::trash::{TrashEntry, TrashStore, staged_name_candidates};

use crate::local_fs::LocalFileSystem;

/// Stages entries as direct children of a single directory.
///
/// A staged name collides only with what is already in the trash root; the
/// first free `name`, `name_1`, `name_2`, ... wins.
pub struct DirTrashStore<F = LocalFileSystem> {
    root: PathBuf,
    fs: F,
}

impl DirTrashStore<LocalFileSystem> {
    /// Opens (creating if needed) a trash directory on the local filesystem.
    pub fn open(root: PathBuf) -> Result<Self> {
        Self::with_fs(root, LocalFileSystem)
    }
}

impl<F: FileSystem> DirTrashStore<F> {
    pub fn with_fs(root: PathBuf, fs: F) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root, fs })
    }

    fn free_staged_path(&self, name: &str) -> Result<PathBuf> {
        staged_name_candidates(name)
            .map(|candidate| self.root.join(candidate))
            .find(|candidate| !self.fs.exists(candidate))
            .ok_or_else(|| ShellError::io(format!("no free trash name for '{}'", name)))
    }
}

impl<F: FileSystem> TrashStore for DirTrashStore<F> {
    fn root(&self) -> &Path {
        &self.root
    }

    fn stage(&mut self, path: &Path) -> Result<TrashEntry> {
        let name = path
            .file_name()
            .ok_or_else(|| {
                ShellError::invalid_arguments(format!("cannot stage '{}'", path.display()))
            })?
            .to_string_lossy()
            .to_string();

        let staged_path = self.free_staged_path(&name)?;
        self.fs.move_path(path, &staged_path)?;

        tracing::debug!(
            "Staged {} as {}",
            path.display(),
            staged_path.display()
        );

        Ok(TrashEntry {
            original_path: path.to_path_buf(),
            staged_path,
        })
    }

    fn restore(&mut self, entry: &TrashEntry) -> Result<()> {
        if !self.fs.exists(&entry.staged_path) {
            return Err(ShellError::not_found(format!(
                "trash entry '{}' is gone",
                entry.staged_path.display()
            )));
        }
        if self.fs.exists(&entry.original_path) {
            return Err(ShellError::already_exists(format!(
                "cannot restore '{}': path exists",
                entry.original_path.display()
            )));
        }
        if let Some(parent) = entry.original_path.parent() {
            if !self.fs.exists(parent) {
                fs::create_dir_all(parent)?;
            }
        }

        self.fs.move_path(&entry.staged_path, &entry.original_path)?;
        tracing::debug!("Restored {}", entry.original_path.display());
        Ok(())
    }
}
