//! What a command cycle hands back to the session loop.

/// Lines produced by a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Regular output, one entry per printed line
    pub lines: Vec<String>,
    /// Informational notice shown apart from regular output
    pub info: Option<String>,
}

impl CommandOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self { lines, info: None }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            info: Some(message.into()),
        }
    }
}

/// Control signal returned by the dispatcher.
///
/// Termination is not an error: it ends the loop cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(CommandOutput),
    Terminate,
}

impl Flow {
    /// Returns the output of a `Continue`, or `None` for `Terminate`.
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            Flow::Continue(output) => Some(output),
            Flow::Terminate => None,
        }
    }
}
