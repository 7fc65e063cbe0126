pub mod command;
pub mod config;
pub mod confirm;
pub mod counter;
pub mod error;
pub mod fs;
pub mod history;
pub mod session;
pub mod trash;
pub mod undo;

// Re-export common types
pub use command::{CommandKind, CommandLine};
pub use config::ShellConfig;
pub use confirm::Confirm;
pub use counter::{CounterStore, recover_sequence};
pub use error::{Result, ShellError};
pub use fs::{EntryStat, FileSystem};
pub use history::{HistoryEntry, HistoryLog};
pub use session::SessionState;
pub use trash::{TrashEntry, TrashStore};
pub use undo::{UndoAction, UndoOutcome, UndoRegister};
