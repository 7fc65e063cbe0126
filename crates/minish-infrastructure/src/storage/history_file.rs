//! File-backed history log.
//!
//! One entry per line, `"<sequence>. <command line>\n"`, UTF-8. The file is
//! only ever appended to, except by [`HistoryLog::drop_last`], which rewrites
//! it atomically without its final entry.

use std::fs::OpenOptions;
use std::io::Write as IoWrite;
use std::path::PathBuf;

use minish_core::error::Result;
use minish_core::history::{HistoryEntry, HistoryLog};

use super::atomic_file::AtomicFile;

pub struct FileHistoryLog {
    file: AtomicFile,
}

impl FileHistoryLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
        }
    }

    /// Reads every non-blank line.
    fn lines(&self) -> Result<Vec<String>> {
        Ok(self
            .file
            .load()?
            .unwrap_or_default()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl HistoryLog for FileHistoryLog {
    fn append(&mut self, sequence: u64, command_line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file.path())?;

        let entry = HistoryEntry::new(sequence, command_line);
        writeln!(file, "{}", entry)?;
        file.sync_data()?;

        Ok(())
    }

    fn tail(&self, n: Option<usize>) -> Result<Vec<HistoryEntry>> {
        let lines = self.lines()?;
        let start = match n {
            Some(n) => lines.len().saturating_sub(n),
            None => 0,
        };

        Ok(lines[start..]
            .iter()
            .filter_map(|line| {
                let entry = HistoryEntry::parse(line);
                if entry.is_none() {
                    tracing::debug!("Skipping malformed history line: {:?}", line);
                }
                entry
            })
            .collect())
    }

    fn drop_last(&mut self) -> Result<Option<HistoryEntry>> {
        let mut lines = self.lines()?;
        let Some(last) = lines.pop() else {
            return Ok(None);
        };

        let mut content = String::new();
        for line in &lines {
            content.push_str(line);
            content.push('\n');
        }
        self.file.save(&content)?;

        Ok(HistoryEntry::parse(&last))
    }

    fn max_sequence(&self) -> Result<Option<u64>> {
        Ok(self
            .lines()?
            .iter()
            .filter_map(|line| HistoryEntry::parse_sequence(line))
            .max())
    }
}
