//! Error types for the minish shell.

use thiserror::Error;

/// A shared error type for every shell command and store.
///
/// Handler failures are caught at the dispatcher boundary, printed, and
/// logged. None of them mutate the counter, the history or the trash.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// The leading token is not a known verb
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Wrong arity, missing operand, bad flag or malformed operand
    #[error("{0}")]
    InvalidArguments(String),

    /// The target path does not exist
    #[error("{0}")]
    NotFound(String),

    /// The destination is already occupied
    #[error("{0}")]
    AlreadyExists(String),

    /// A directory was given where a file was expected, or `-r` is missing
    #[error("{0}")]
    IsDirectory(String),

    /// The shell refuses the operation (root, parent, trash root)
    #[error("{0}")]
    PermissionDenied(String),

    /// IO error surfaced from the filesystem
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShellError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn unknown_command(verb: impl Into<String>) -> Self {
        Self::UnknownCommand(verb.into())
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    pub fn is_directory(message: impl Into<String>) -> Self {
        Self::IsDirectory(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_unknown_command(&self) -> bool {
        matches!(self, Self::UnknownCommand(_))
    }

    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, Self::InvalidArguments(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }

    pub fn is_is_directory(&self) -> bool {
        matches!(self, Self::IsDirectory(_))
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::AlreadyExists => Self::AlreadyExists(err.to_string()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            ErrorKind::IsADirectory => Self::IsDirectory(err.to_string()),
            _ => Self::Io {
                message: format!("{} (kind: {:?})", err, err.kind()),
            },
        }
    }
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, ShellError>`.
pub type Result<T> = std::result::Result<T, ShellError>;
