//! In-memory session state.

use std::path::{Path, PathBuf};

use crate::undo::UndoRegister;

/// Everything a command handler may read or mutate between commits.
///
/// Owned by the dispatcher; there are no module-level singletons.
#[derive(Debug)]
pub struct SessionState {
    /// Absolute path; changed only by a successful `goto`
    pub working_dir: PathBuf,
    /// Number of successfully committed commands
    pub sequence: u64,
    pub undo: UndoRegister,
}

impl SessionState {
    pub fn new(working_dir: PathBuf, sequence: u64) -> Self {
        Self {
            working_dir,
            sequence,
            undo: UndoRegister::new(),
        }
    }

    /// Resolves a command argument against the working directory.
    ///
    /// Absolute arguments are returned unchanged.
    pub fn resolve(&self, arg: impl AsRef<Path>) -> PathBuf {
        self.working_dir.join(arg)
    }

    /// Renders `path` relative to the working directory when it lies below it.
    pub fn display_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.working_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
