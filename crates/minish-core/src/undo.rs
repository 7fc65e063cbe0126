//! Single-slot undo register.

use std::fmt;
use std::path::PathBuf;

use crate::trash::TrashEntry;

/// The inverse of the most recent reversible command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    /// Undo a relocate: move `current` back to `original`.
    RestoreMoved { current: PathBuf, original: PathBuf },
    /// Undo a duplicate: delete the created copy.
    RemoveCopy { path: PathBuf },
    /// Undo a discard: move every staged entry back to its original path.
    RestoreDiscarded { entries: Vec<TrashEntry> },
}

impl fmt::Display for UndoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoAction::RestoreMoved { current, original } => write!(
                f,
                "move '{}' back to '{}'",
                current.display(),
                original.display()
            ),
            UndoAction::RemoveCopy { path } => write!(f, "remove copy '{}'", path.display()),
            UndoAction::RestoreDiscarded { entries } => {
                write!(f, "restore {} discarded item(s)", entries.len())
            }
        }
    }
}

/// Result of a `revert` that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The inverse action ran and the slot was cleared.
    Reverted(UndoAction),
    /// Nothing was registered; informational only.
    NothingPending,
}

/// Holds at most one [`UndoAction`].
///
/// Registration replaces whatever was pending. The slot lives only in memory
/// and is lost when the session ends.
#[derive(Debug, Default)]
pub struct UndoRegister {
    slot: Option<UndoAction>,
}

impl UndoRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `action`, dropping any previously pending action.
    pub fn register(&mut self, action: UndoAction) {
        if let Some(previous) = self.slot.replace(action) {
            tracing::debug!("Replaced pending undo action: {}", previous);
        }
    }

    pub fn pending(&self) -> Option<&UndoAction> {
        self.slot.as_ref()
    }

    /// Removes and returns the pending action.
    pub fn take(&mut self) -> Option<UndoAction> {
        self.slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_replaces_previous() {
        let mut register = UndoRegister::new();
        register.register(UndoAction::RemoveCopy {
            path: PathBuf::from("/tmp/a"),
        });
        register.register(UndoAction::RemoveCopy {
            path: PathBuf::from("/tmp/b"),
        });

        assert_eq!(
            register.take(),
            Some(UndoAction::RemoveCopy {
                path: PathBuf::from("/tmp/b")
            })
        );
        assert!(register.pending().is_none());
    }
}
