//! History entries and the history log contract.

use std::fmt;

use crate::error::Result;

/// One accepted command, tagged with its sequence number.
///
/// On disk an entry is a single line: `"<sequence>. <command_line>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub sequence: u64,
    pub command_line: String,
}

impl HistoryEntry {
    pub fn new(sequence: u64, command_line: impl Into<String>) -> Self {
        Self {
            sequence,
            command_line: command_line.into(),
        }
    }

    /// Parses the leading integer before the first `.` of a history line.
    ///
    /// Returns `None` for blank lines and for lines whose prefix is not a
    /// decimal number.
    pub fn parse_sequence(line: &str) -> Option<u64> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (prefix, _) = line.split_once('.')?;
        prefix.trim().parse().ok()
    }

    /// Parses a full history line.
    pub fn parse(line: &str) -> Option<Self> {
        let sequence = Self::parse_sequence(line)?;
        let (_, rest) = line.trim_end_matches(['\r', '\n']).split_once('.')?;
        let command_line = rest.strip_prefix(' ').unwrap_or(rest);
        Some(Self::new(sequence, command_line))
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.sequence, self.command_line)
    }
}

/// Durable append-only record of accepted commands.
///
/// Implementations must make an appended entry durable before returning, so
/// that the next command is never accepted ahead of its predecessor's record.
pub trait HistoryLog {
    /// Appends one entry.
    fn append(&mut self, sequence: u64, command_line: &str) -> Result<()>;

    /// Returns the last `n` entries in original order, or every entry when
    /// `n` is `None`.
    fn tail(&self, n: Option<usize>) -> Result<Vec<HistoryEntry>>;

    /// Removes the most recent entry and returns it.
    ///
    /// Returns `Ok(None)` when the log is empty.
    fn drop_last(&mut self) -> Result<Option<HistoryEntry>>;

    /// Returns the largest sequence number present, if any line parses.
    fn max_sequence(&self) -> Result<Option<u64>>;
}
