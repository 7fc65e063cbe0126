use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default artifact names, created under `state_dir`.
pub const DEFAULT_HISTORY_FILE: &str = ".minish_history";
pub const DEFAULT_COUNTER_FILE: &str = ".minish_counter";
pub const DEFAULT_TRASH_DIR: &str = ".minish_trash";
pub const DEFAULT_LOG_FILE: &str = ".minish.log";

fn default_confirm_recursive_discard() -> bool {
    true
}

/// Shell configuration as read from `config.toml`.
///
/// Every path is optional. Relative artifact paths are taken relative to
/// `state_dir`, which itself defaults to the user's home directory.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
    #[serde(default)]
    pub history_file: Option<PathBuf>,
    #[serde(default)]
    pub counter_file: Option<PathBuf>,
    #[serde(default)]
    pub trash_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Ask before discarding a directory with `-r`
    #[serde(default = "default_confirm_recursive_discard")]
    pub confirm_recursive_discard: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            state_dir: None,
            history_file: None,
            counter_file: None,
            trash_dir: None,
            log_file: None,
            confirm_recursive_discard: default_confirm_recursive_discard(),
        }
    }
}
