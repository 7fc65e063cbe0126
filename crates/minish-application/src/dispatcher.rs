//! Command dispatcher and commit discipline.
//!
//! One call to [`Dispatcher::execute`] is one command cycle:
//!
//! ```text
//! Idle -> Parsing -> Executing -> Committing (success)
//!                              -> Reporting  (failure)
//! ```
//!
//! Only a successful, committing command advances the counter and appends to
//! history. A failure leaves counter, history and trash as they were.

use std::path::{Path, PathBuf};

use minish_core::command::CommandLine;
use minish_core::confirm::Confirm;
use minish_core::counter::{CounterStore, recover_sequence};
use minish_core::error::Result;
use minish_core::fs::FileSystem;
use minish_core::history::HistoryLog;
use minish_core::session::SessionState;
use minish_core::trash::TrashStore;
use minish_core::undo::UndoAction;

use crate::handlers::{self, CommandContext, HandlerOptions};
use crate::output::Flow;

/// Target of the diagnostic log lines.
pub const SESSION_LOG_TARGET: &str = "minish::session";

/// The durable collaborators a dispatcher drives.
pub struct ShellStores {
    pub fs: Box<dyn FileSystem>,
    pub history: Box<dyn HistoryLog>,
    pub counter: Box<dyn CounterStore>,
    pub trash: Box<dyn TrashStore>,
}

/// Owns the session state and runs command cycles against it.
pub struct Dispatcher {
    state: SessionState,
    stores: ShellStores,
    options: HandlerOptions,
}

impl Dispatcher {
    /// Creates a dispatcher, recovering the counter from both durable sources.
    pub fn new(working_dir: PathBuf, stores: ShellStores, options: HandlerOptions) -> Self {
        let sequence = recover_sequence(stores.history.as_ref(), stores.counter.as_ref());
        tracing::debug!("Starting session at sequence {}", sequence);

        Self {
            state: SessionState::new(working_dir, sequence),
            stores,
            options,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.state.working_dir
    }

    /// Number of successfully committed commands so far.
    pub fn sequence(&self) -> u64 {
        self.state.sequence
    }

    pub fn pending_undo(&self) -> Option<&UndoAction> {
        self.state.undo.pending()
    }

    pub fn trash_root(&self) -> &Path {
        self.stores.trash.root()
    }

    fn context<'a>(&'a mut self, confirm: &'a mut dyn Confirm) -> CommandContext<'a> {
        CommandContext {
            state: &mut self.state,
            fs: self.stores.fs.as_ref(),
            history: self.stores.history.as_mut(),
            trash: self.stores.trash.as_mut(),
            confirm,
            options: &self.options,
        }
    }

    /// Runs one command line.
    ///
    /// Blank lines do nothing and are not logged. Failures are logged with
    /// an `ERROR:` prefix and returned; `Flow::Terminate` ends the session.
    pub fn execute(&mut self, line: &str, confirm: &mut dyn Confirm) -> Result<Flow> {
        let raw = line.trim_end_matches(['\r', '\n']);
        if raw.trim().is_empty() {
            return Ok(Flow::Continue(Default::default()));
        }
        tracing::info!(target: SESSION_LOG_TARGET, "{}", raw);

        match self.run(raw, confirm) {
            Ok(Flow::Terminate) => {
                tracing::info!(target: SESSION_LOG_TARGET, "Exiting mini-shell.");
                Ok(Flow::Terminate)
            }
            Ok(flow) => {
                tracing::info!(target: SESSION_LOG_TARGET, "OK: {}", raw);
                Ok(flow)
            }
            Err(e) => {
                tracing::error!(target: SESSION_LOG_TARGET, "ERROR: {}", e);
                Err(e)
            }
        }
    }

    fn run(&mut self, raw: &str, confirm: &mut dyn Confirm) -> Result<Flow> {
        // Parsing
        let Some(command) = CommandLine::parse(raw)? else {
            return Ok(Flow::Continue(Default::default()));
        };

        if !command.kind.commits() {
            let mut ctx = self.context(confirm);
            return handlers::run(command.kind, &command.args, &mut ctx);
        }

        // The slot starts empty so that a fresh registration is recognisable
        let previous_undo = self.state.undo.take();
        let previous_dir = self.state.working_dir.clone();

        // Executing
        let executed = {
            let mut ctx = self.context(confirm);
            handlers::run(command.kind, &command.args, &mut ctx)
        };
        let flow = match executed {
            Ok(flow) => flow,
            Err(e) => {
                self.settle_undo(previous_undo);
                return Err(e);
            }
        };

        // Committing
        if let Err(e) = self.commit(&command.raw) {
            self.roll_back(previous_dir, confirm);
            self.settle_undo(previous_undo);
            return Err(e);
        }

        self.settle_undo(previous_undo);
        Ok(flow)
    }

    /// Puts the pre-command undo action back unless the command registered
    /// its own.
    fn settle_undo(&mut self, previous: Option<UndoAction>) {
        match previous {
            Some(previous) if self.state.undo.pending().is_none() => {
                self.state.undo.register(previous)
            }
            Some(previous) => tracing::debug!("Replaced pending undo action: {}", previous),
            None => {}
        }
    }

    /// Reverses the effects of a command whose commit failed.
    fn roll_back(&mut self, working_dir: PathBuf, confirm: &mut dyn Confirm) {
        self.state.working_dir = working_dir;

        let Some(action) = self.state.undo.take() else {
            return;
        };
        let mut ctx = self.context(confirm);
        if let Err(e) = handlers::roll_back(&action, &mut ctx) {
            tracing::warn!("Failed to roll back uncommitted '{}': {}", action, e);
        }
    }

    /// Records a successful command: log append first, then counter file.
    ///
    /// A crash between the two is repaired at start-up because recovery
    /// takes the maximum of both sources.
    fn commit(&mut self, raw: &str) -> Result<()> {
        let next = self.state.sequence + 1;
        self.stores.history.append(next, raw)?;
        self.state.sequence = next;

        if let Err(e) = self.stores.counter.persist(next) {
            tracing::warn!("Failed to persist counter {}: {}", next, e);
        }
        Ok(())
    }
}
