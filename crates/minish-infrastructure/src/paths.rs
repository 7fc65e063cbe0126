//! Unified path management for minish state files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/minish/
//! └── config.toml          # Optional shell configuration
//!
//! <state_dir>/             # Defaults to the home directory
//! ├── .minish_history      # "<seq>. <command>" per line
//! ├── .minish_counter      # Bare decimal operation counter
//! ├── .minish.log          # Diagnostic log
//! └── .minish_trash/       # Staged (soft-deleted) entries
//! ```

use std::path::{Path, PathBuf};

use minish_core::config::{
    DEFAULT_COUNTER_FILE, DEFAULT_HISTORY_FILE, DEFAULT_LOG_FILE, DEFAULT_TRASH_DIR, ShellConfig,
};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolved locations of every durable artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinishPaths {
    pub state_dir: PathBuf,
    pub history_file: PathBuf,
    pub counter_file: PathBuf,
    pub trash_dir: PathBuf,
    pub log_file: PathBuf,
}

impl MinishPaths {
    /// Returns the default location of `config.toml`.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/minish/config.toml`
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn default_config_file() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("minish").join("config.toml"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the user's home directory, the target of `goto ~`.
    pub fn home_dir() -> Result<PathBuf, PathError> {
        dirs::home_dir().ok_or(PathError::HomeDirNotFound)
    }

    /// Resolves artifact paths from the configuration.
    ///
    /// `state_dir_override` (from the command line) wins over
    /// `config.state_dir`, which wins over the home directory. Artifact paths
    /// given in the config are joined onto the state directory, so absolute
    /// ones are used unchanged.
    pub fn resolve(
        config: &ShellConfig,
        state_dir_override: Option<&Path>,
    ) -> Result<Self, PathError> {
        let state_dir = match state_dir_override.or(config.state_dir.as_deref()) {
            Some(dir) => dir.to_path_buf(),
            None => Self::home_dir()?,
        };

        Ok(Self::under(state_dir, config))
    }

    /// Builds the paths below an explicit state directory.
    pub fn under(state_dir: PathBuf, config: &ShellConfig) -> Self {
        let pick = |configured: &Option<PathBuf>, default: &str| {
            state_dir.join(configured.as_deref().unwrap_or(Path::new(default)))
        };

        Self {
            history_file: pick(&config.history_file, DEFAULT_HISTORY_FILE),
            counter_file: pick(&config.counter_file, DEFAULT_COUNTER_FILE),
            trash_dir: pick(&config.trash_dir, DEFAULT_TRASH_DIR),
            log_file: pick(&config.log_file, DEFAULT_LOG_FILE),
            state_dir,
        }
    }
}
