//! Filesystem collaborator contract.
//!
//! Command handlers reach the disk only through [`FileSystem`].

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;

/// The subset of file metadata shown by `list -l`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStat {
    pub size: u64,
    pub modified: SystemTime,
    /// `ls`-style permission string, e.g. `drwxr-xr-x`
    pub mode: String,
}

/// Raw filesystem primitives used by the shell.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// True when `path` itself is a symbolic link, dangling or not.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Returns the absolute path with every symlink and `.`/`..` resolved.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Lists the entries of a directory, sorted by file name.
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    fn metadata(&self, path: &Path) -> Result<EntryStat>;

    /// Copies a file, or a whole directory tree when `recursive` is set.
    ///
    /// `dst` must not exist.
    fn copy(&self, src: &Path, dst: &Path, recursive: bool) -> Result<()>;

    /// Moves `src` to `dst`.
    ///
    /// Uses an atomic rename where possible and falls back to copy+remove
    /// only when the rename crosses a storage boundary.
    fn move_path(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Removes a file, or a directory and everything below it.
    fn remove_tree(&self, path: &Path) -> Result<()>;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Returns every regular file below `root`, depth-first, sorted by name.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}
