//! Soft-delete staging area.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// A path that was moved into the trash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashEntry {
    /// Absolute source path at the time of removal
    pub original_path: PathBuf,
    /// Location inside the trash root
    pub staged_path: PathBuf,
}

/// A flat directory receiving soft-deleted entries.
///
/// Staging never overwrites an existing staged entry and nothing is purged
/// automatically.
pub trait TrashStore {
    /// The directory all entries are staged into.
    fn root(&self) -> &Path;

    /// Moves `path` into the trash under the first free staged name.
    fn stage(&mut self, path: &Path) -> Result<TrashEntry>;

    /// Moves a staged entry back to its original path.
    ///
    /// Fails without moving anything when the original path is occupied or
    /// the staged entry is gone.
    fn restore(&mut self, entry: &TrashEntry) -> Result<()>;
}

/// Yields staged-name candidates for `name`: `name`, `name_1`, `name_2`, ...
///
/// Callers take the first candidate that does not exist yet.
pub fn staged_name_candidates(name: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(name.to_string()).chain((1u64..).map(move |n| format!("{}_{}", name, n)))
}
