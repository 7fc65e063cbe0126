use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;

use minish_application::{
    CommandOutput, Dispatcher, Flow, HandlerOptions, SESSION_LOG_TARGET, ShellStores,
};
use minish_core::command::CommandKind;
use minish_core::confirm::{Confirm, is_yes};
use minish_infrastructure::logging::{LogGuard, init_diagnostic_log};
use minish_infrastructure::{
    DirTrashStore, FileCounterStore, FileHistoryLog, LocalFileSystem, MinishPaths, load_config,
};

/// Interactive shell with a recoverable trash and single-step undo.
#[derive(Parser, Debug)]
#[command(name = "minish", version, about)]
struct Args {
    /// Configuration file (defaults to <config dir>/minish/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding history, counter, log and trash
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Initial working directory (defaults to the current directory)
    #[arg(long)]
    dir: Option<PathBuf>,
}

/// CLI helper for rustyline that provides verb completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: CommandKind::iter().map(|kind| kind.to_string()).collect(),
        }
    }

    fn is_verb(&self, word: &str) -> bool {
        self.commands.iter().any(|cmd| cmd == word)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        // Only the verb is completed; paths are left to the user
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(' ') {
            Some((verb, rest)) if self.is_verb(verb) => {
                Owned(format!("{} {}", verb.bright_cyan(), rest))
            }
            None if self.is_verb(line) => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.is_empty() || line.contains(' ') {
            return None;
        }

        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Asks confirmation questions through the same line editor.
struct EditorConfirm<'a> {
    editor: &'a mut Editor<CliHelper, DefaultHistory>,
}

impl Confirm for EditorConfirm<'_> {
    fn confirm(&mut self, question: &str) -> bool {
        match self.editor.readline(question) {
            Ok(answer) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn print_output(output: &CommandOutput) {
    for line in &output.lines {
        println!("{}", line);
    }
    if let Some(info) = &output.info {
        println!("{}", info.bright_black());
    }
}

/// Builds the dispatcher from configuration and command-line overrides.
fn bootstrap(args: &Args) -> Result<(Dispatcher, LogGuard)> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => match MinishPaths::default_config_file() {
            Ok(path) => load_config(&path)?,
            Err(_) => Default::default(),
        },
    };

    let paths = MinishPaths::resolve(&config, args.state_dir.as_deref())?;
    std::fs::create_dir_all(&paths.state_dir)
        .with_context(|| format!("Failed to create {}", paths.state_dir.display()))?;

    let guard = init_diagnostic_log(&paths.log_file)?;

    let working_dir = match &args.dir {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("No such directory: {}", dir.display()))?,
        None => std::env::current_dir()?,
    };

    let stores = ShellStores {
        fs: Box::new(LocalFileSystem),
        history: Box::new(FileHistoryLog::new(paths.history_file.clone())),
        counter: Box::new(FileCounterStore::new(paths.counter_file.clone())),
        trash: Box::new(DirTrashStore::open(paths.trash_dir.clone())?),
    };
    let options = HandlerOptions {
        home_dir: MinishPaths::home_dir()?,
        confirm_recursive_discard: config.confirm_recursive_discard,
    };

    Ok((Dispatcher::new(working_dir, stores, options), guard))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (mut dispatcher, _log_guard) = bootstrap(&args)?;

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!(
        "{}",
        "Mini-shell started. Type 'terminate' to quit."
            .bright_magenta()
            .bold()
    );

    loop {
        let prompt = format!("{}$ ", dispatcher.working_dir().display());

        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                let mut confirm = EditorConfirm { editor: &mut rl };
                match dispatcher.execute(&line, &mut confirm) {
                    Ok(Flow::Continue(output)) => print_output(&output),
                    Ok(Flow::Terminate) => break,
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'terminate' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "\nExiting mini-shell.".bright_green());
                tracing::info!(target: SESSION_LOG_TARGET, "Exiting mini-shell.");
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
