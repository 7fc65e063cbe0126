//! File-backed operation counter.

use std::path::PathBuf;

use minish_core::counter::CounterStore;
use minish_core::error::Result;

use super::atomic_file::AtomicFile;

/// Stores the counter as a bare decimal string.
pub struct FileCounterStore {
    file: AtomicFile,
}

impl FileCounterStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
        }
    }
}

impl CounterStore for FileCounterStore {
    fn load(&self) -> Result<Option<u64>> {
        let Some(content) = self.file.load()? else {
            return Ok(None);
        };

        match content.trim().parse::<u64>() {
            Ok(count) => Ok(Some(count)),
            Err(_) => {
                tracing::warn!(
                    "Ignoring malformed counter file {}",
                    self.file.path().display()
                );
                Ok(None)
            }
        }
    }

    fn persist(&mut self, count: u64) -> Result<()> {
        self.file.save(&count.to_string())
    }
}
