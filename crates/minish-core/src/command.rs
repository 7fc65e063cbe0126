//! Command kinds and command-line tokenization.
//!
//! The verb set is closed: every accepted command line maps to exactly one
//! [`CommandKind`], and the dispatcher matches on it exhaustively.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{Result, ShellError};

/// The verbs the shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum CommandKind {
    /// Print directory entries
    List,
    /// Change the working directory
    Goto,
    /// Print a file
    Read,
    /// Copy a file or directory
    Duplicate,
    /// Move a file or directory
    Relocate,
    /// Stage paths into the trash
    Discard,
    /// Regex line search
    Search,
    /// Print recorded history
    Log,
    /// Undo the last reversible command
    Revert,
    /// End the session
    Terminate,
}

impl CommandKind {
    /// Returns the usage line shown for argument errors and completion hints.
    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::List => "list [-l|-1] [path]",
            CommandKind::Goto => "goto [path|~|/|..]",
            CommandKind::Read => "read <file>",
            CommandKind::Duplicate => "duplicate [-r] <src> <dst>",
            CommandKind::Relocate => "relocate <src> <dst>",
            CommandKind::Discard => "discard [-r] <path...>",
            CommandKind::Search => "search [-r] [-i] <pattern> <path>",
            CommandKind::Log => "log [n]",
            CommandKind::Revert => "revert",
            CommandKind::Terminate => "terminate",
        }
    }

    /// True for commands that register an undo action when they succeed.
    pub fn is_reversible(self) -> bool {
        matches!(
            self,
            CommandKind::Duplicate | CommandKind::Relocate | CommandKind::Discard
        )
    }

    /// True for commands that advance the counter and history on success.
    ///
    /// `revert` removes history instead of adding to it, and `terminate`
    /// ends the loop before any commit happens.
    pub fn commits(self) -> bool {
        !matches!(self, CommandKind::Revert | CommandKind::Terminate)
    }
}

/// A tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub kind: CommandKind,
    /// Arguments after the verb, quotes removed
    pub args: Vec<String>,
    /// The verbatim input, recorded in history
    pub raw: String,
}

impl CommandLine {
    /// Tokenizes `raw` with POSIX shell quoting rules.
    ///
    /// Surrounding whitespace only matters for blank detection; `raw` is kept
    /// as typed.
    ///
    /// # Returns
    ///
    /// - `Ok(None)`: the line is blank
    /// - `Ok(Some(CommandLine))`: a known verb with its arguments
    /// - `Err(InvalidArguments)`: unbalanced quotes or escapes
    /// - `Err(UnknownCommand)`: the leading token is not a verb
    pub fn parse(raw: &str) -> Result<Option<Self>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let mut tokens = shlex::split(raw)
            .ok_or_else(|| ShellError::invalid_arguments("unterminated quote or escape"))?
            .into_iter();

        let Some(verb) = tokens.next() else {
            return Ok(None);
        };

        let kind = CommandKind::from_str(&verb).map_err(|_| ShellError::unknown_command(&verb))?;

        Ok(Some(Self {
            kind,
            args: tokens.collect(),
            raw: raw.to_string(),
        }))
    }
}
