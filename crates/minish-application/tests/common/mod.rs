#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use minish_application::{Dispatcher, Flow, HandlerOptions, ShellStores};
use minish_core::config::ShellConfig;
use minish_core::confirm::FixedAnswer;
use minish_core::error::{Result, ShellError};
use minish_core::history::{HistoryEntry, HistoryLog};
use minish_infrastructure::{
    DirTrashStore, FileCounterStore, FileHistoryLog, LocalFileSystem, MinishPaths,
};
use tempfile::TempDir;

/// File history whose `append` fails while `broken` is set.
pub struct FlakyHistory {
    inner: FileHistoryLog,
    broken: Rc<Cell<bool>>,
}

impl HistoryLog for FlakyHistory {
    fn append(&mut self, sequence: u64, command_line: &str) -> Result<()> {
        if self.broken.get() {
            return Err(ShellError::io("disk full"));
        }
        self.inner.append(sequence, command_line)
    }

    fn tail(&self, n: Option<usize>) -> Result<Vec<HistoryEntry>> {
        self.inner.tail(n)
    }

    fn drop_last(&mut self) -> Result<Option<HistoryEntry>> {
        self.inner.drop_last()
    }

    fn max_sequence(&self) -> Result<Option<u64>> {
        self.inner.max_sequence()
    }
}

/// A sandbox with separate state, work and home directories.
pub struct Sandbox {
    _temp: TempDir,
    pub state_dir: PathBuf,
    pub work: PathBuf,
    pub home: PathBuf,
    pub paths: MinishPaths,
}

impl Sandbox {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let state_dir = root.join("state");
        let work = root.join("work");
        let home = root.join("home");
        for dir in [&state_dir, &work, &home] {
            fs::create_dir_all(dir).unwrap();
        }
        let paths = MinishPaths::under(state_dir.clone(), &ShellConfig::default());

        Self {
            _temp: temp,
            state_dir,
            work,
            home,
            paths,
        }
    }

    /// Opens a fresh dispatcher over the sandbox, as a new process would.
    pub fn open(&self) -> Dispatcher {
        self.open_with(true)
    }

    pub fn open_with(&self, confirm_recursive_discard: bool) -> Dispatcher {
        let history = FileHistoryLog::new(self.paths.history_file.clone());
        self.build(Box::new(history), confirm_recursive_discard)
    }

    /// Opens a dispatcher whose history appends fail while the flag is set.
    pub fn open_flaky(&self) -> (Dispatcher, Rc<Cell<bool>>) {
        let broken = Rc::new(Cell::new(false));
        let history = FlakyHistory {
            inner: FileHistoryLog::new(self.paths.history_file.clone()),
            broken: Rc::clone(&broken),
        };
        (self.build(Box::new(history), true), broken)
    }

    fn build(&self, history: Box<dyn HistoryLog>, confirm_recursive_discard: bool) -> Dispatcher {
        let stores = ShellStores {
            fs: Box::new(LocalFileSystem),
            history,
            counter: Box::new(FileCounterStore::new(self.paths.counter_file.clone())),
            trash: Box::new(DirTrashStore::open(self.paths.trash_dir.clone()).unwrap()),
        };
        let options = HandlerOptions {
            home_dir: self.home.clone(),
            confirm_recursive_discard,
        };
        Dispatcher::new(self.work.clone(), stores, options)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn history(&self) -> String {
        fs::read_to_string(&self.paths.history_file).unwrap_or_default()
    }

    pub fn counter(&self) -> String {
        fs::read_to_string(&self.paths.counter_file).unwrap_or_default()
    }

    pub fn trash(&self) -> &Path {
        &self.paths.trash_dir
    }
}

/// Runs a line, answering yes to any confirmation.
pub fn run(dispatcher: &mut Dispatcher, line: &str) -> Result<Flow> {
    dispatcher.execute(line, &mut FixedAnswer(true))
}

/// Runs a line that must succeed and returns its output lines.
pub fn ok(dispatcher: &mut Dispatcher, line: &str) -> Vec<String> {
    match run(dispatcher, line) {
        Ok(Flow::Continue(output)) => output.lines,
        Ok(Flow::Terminate) => panic!("'{}' terminated the session", line),
        Err(e) => panic!("'{}' failed: {}", line, e),
    }
}
