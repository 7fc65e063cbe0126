//! One handler per verb.
//!
//! Handlers validate their own arguments, perform the filesystem work, and
//! register an undo action when they change something reversibly. They never
//! touch the counter or append to history; that is the dispatcher's commit.

mod discard;
mod history;
mod navigation;
mod revert;
mod search;
mod transfer;

use std::path::{Path, PathBuf};

use minish_core::command::CommandKind;
use minish_core::confirm::Confirm;
use minish_core::error::Result;
use minish_core::fs::FileSystem;
use minish_core::history::HistoryLog;
use minish_core::session::SessionState;
use minish_core::trash::TrashStore;

use crate::output::Flow;

pub use revert::roll_back;

/// Settings that shape handler behaviour but are not session state.
#[derive(Debug, Clone)]
pub struct HandlerOptions {
    /// Target of `goto` with no argument and of `~`
    pub home_dir: PathBuf,
    /// Ask before discarding a directory with `-r`
    pub confirm_recursive_discard: bool,
}

/// Everything a handler may use during one command.
pub struct CommandContext<'a> {
    pub state: &'a mut SessionState,
    pub fs: &'a dyn FileSystem,
    pub history: &'a mut dyn HistoryLog,
    pub trash: &'a mut dyn TrashStore,
    pub confirm: &'a mut dyn Confirm,
    pub options: &'a HandlerOptions,
}

impl CommandContext<'_> {
    pub fn resolve(&self, arg: &str) -> PathBuf {
        self.state.resolve(arg)
    }

    pub fn working_dir(&self) -> &Path {
        &self.state.working_dir
    }
}

/// Runs the handler for `kind`.
pub fn run(kind: CommandKind, args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    match kind {
        CommandKind::List => navigation::list(args, ctx),
        CommandKind::Goto => navigation::goto(args, ctx),
        CommandKind::Read => navigation::read(args, ctx),
        CommandKind::Duplicate => transfer::duplicate(args, ctx),
        CommandKind::Relocate => transfer::relocate(args, ctx),
        CommandKind::Discard => discard::discard(args, ctx),
        CommandKind::Search => search::search(args, ctx),
        CommandKind::Log => history::log(args, ctx),
        CommandKind::Revert => revert::revert(args, ctx),
        CommandKind::Terminate => Ok(Flow::Terminate),
    }
}

/// Splits a leading `-r` off the argument list.
fn split_recursive(args: &[String]) -> (bool, &[String]) {
    match args.split_first() {
        Some((first, rest)) if first == "-r" => (true, rest),
        _ => (false, args),
    }
}
