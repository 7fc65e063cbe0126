//! `list`, `goto` and `read`.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use minish_core::error::{Result, ShellError};

use super::CommandContext;
use crate::output::{CommandOutput, Flow};

fn format_mtime(modified: SystemTime) -> String {
    DateTime::<Local>::from(modified)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn list_row(path: &Path, long_format: bool, ctx: &CommandContext<'_>) -> Result<String> {
    let name = display_name(path);
    if !long_format {
        return Ok(name);
    }

    let stat = ctx.fs.metadata(path)?;
    Ok(format!(
        "{} {:>8} {} {}",
        stat.mode,
        stat.size,
        format_mtime(stat.modified),
        name
    ))
}

/// `list [-l|-1] [path]`
pub fn list(args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    let mut long_format = false;
    let mut targets = Vec::new();
    for arg in args {
        if arg == "-l" || arg == "-1" {
            long_format = true;
        } else {
            targets.push(arg);
        }
    }

    let ctx: &CommandContext<'_> = ctx;
    let target = match targets.first() {
        Some(arg) => ctx.resolve(arg),
        None => ctx.working_dir().to_path_buf(),
    };

    if !ctx.fs.exists(&target) {
        return Err(ShellError::not_found(format!(
            "No such file or directory: {}",
            target.display()
        )));
    }

    let lines = if ctx.fs.is_dir(&target) {
        ctx.fs
            .list_dir(&target)?
            .iter()
            .map(|entry| list_row(entry, long_format, ctx))
            .collect::<Result<Vec<_>>>()?
    } else {
        vec![list_row(&target, long_format, ctx)?]
    };

    Ok(Flow::Continue(CommandOutput::lines(lines)))
}

/// `goto [path|~|/|..]`
pub fn goto(args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    let home = &ctx.options.home_dir;
    let working_dir = ctx.working_dir();

    let new_dir: PathBuf = match args.first().map(String::as_str) {
        None | Some("~") => home.clone(),
        Some("/") => working_dir
            .ancestors()
            .last()
            .unwrap_or(working_dir)
            .to_path_buf(),
        Some("..") => working_dir.parent().unwrap_or(working_dir).to_path_buf(),
        Some(arg) => {
            let joined = match arg.strip_prefix("~/") {
                Some(rest) => home.join(rest),
                None => ctx.resolve(arg),
            };
            ctx.fs.canonicalize(&joined).unwrap_or(joined)
        }
    };

    if !ctx.fs.is_dir(&new_dir) {
        return Err(ShellError::not_found(format!(
            "No such directory: {}",
            args.first().map(String::as_str).unwrap_or("~")
        )));
    }

    tracing::debug!("Working directory is now {}", new_dir.display());
    ctx.state.working_dir = new_dir;

    Ok(Flow::Continue(CommandOutput::empty()))
}

/// `read <file>`
pub fn read(args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    let Some(arg) = args.first() else {
        return Err(ShellError::invalid_arguments("read: missing file operand"));
    };

    let path = ctx.resolve(arg);
    if !ctx.fs.exists(&path) {
        return Err(ShellError::not_found(format!(
            "read: {}: No such file or directory",
            arg
        )));
    }
    if ctx.fs.is_dir(&path) {
        return Err(ShellError::is_directory(format!(
            "read: {}: Is a directory",
            arg
        )));
    }

    let content = ctx.fs.read_to_string(&path)?;
    let lines = content.lines().map(str::to_string).collect();

    Ok(Flow::Continue(CommandOutput::lines(lines)))
}
