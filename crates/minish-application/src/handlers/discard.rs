//! `discard`: soft delete into the trash.

use std::path::{Path, PathBuf};

use minish_core::error::{Result, ShellError};
use minish_core::trash::TrashEntry;
use minish_core::undo::UndoAction;

use super::{CommandContext, split_recursive};
use crate::output::{CommandOutput, Flow};

/// An operand that passed validation.
struct Target<'a> {
    arg: &'a str,
    path: PathBuf,
    is_dir: bool,
}

/// Canonical form of an existing operand.
///
/// A symlink is resolved through its parent only, so a dangling link still
/// has a location and a link to a directory is not mistaken for the target.
fn canonical_location(path: &Path, arg: &str, ctx: &CommandContext<'_>) -> Result<PathBuf> {
    let resolved = match (ctx.fs.is_symlink(path), path.parent(), path.file_name()) {
        (true, Some(parent), Some(name)) => ctx.fs.canonicalize(parent).map(|dir| dir.join(name)),
        _ => ctx.fs.canonicalize(path),
    };

    resolved.map_err(|e| {
        ShellError::not_found(format!("discard: cannot resolve '{}': {}", arg, e))
    })
}

fn validate<'a>(arg: &'a str, recursive: bool, ctx: &CommandContext<'_>) -> Result<Target<'a>> {
    if arg == ".." {
        return Err(ShellError::permission_denied(
            "discard: cannot remove parent directory",
        ));
    }

    let path = ctx.resolve(arg);
    if !ctx.fs.exists(&path) {
        return Err(ShellError::not_found(format!(
            "discard: cannot remove '{}': No such file or directory",
            arg
        )));
    }

    let canonical = canonical_location(&path, arg, ctx)?;
    if canonical.parent().is_none() {
        return Err(ShellError::permission_denied(
            "discard: cannot remove root directory",
        ));
    }
    let working_dir = ctx
        .fs
        .canonicalize(ctx.working_dir())
        .unwrap_or_else(|_| ctx.working_dir().to_path_buf());
    if working_dir.starts_with(&canonical) {
        return Err(ShellError::permission_denied(format!(
            "discard: cannot remove '{}': it contains the working directory",
            arg
        )));
    }
    let trash_root = ctx
        .fs
        .canonicalize(ctx.trash.root())
        .unwrap_or_else(|_| ctx.trash.root().to_path_buf());
    if trash_root.starts_with(&canonical) {
        return Err(ShellError::permission_denied(format!(
            "discard: cannot remove '{}': it contains the trash",
            arg
        )));
    }

    let is_dir = !ctx.fs.is_symlink(&path) && ctx.fs.is_dir(&path);
    if is_dir && !recursive {
        return Err(ShellError::is_directory(format!(
            "discard: cannot remove '{}': Is a directory",
            arg
        )));
    }

    // "dir/." and similar have no file name of their own to stage under
    let path = if path.file_name().is_some() {
        path
    } else {
        canonical
    };

    Ok(Target { arg, path, is_dir })
}

/// Puts already staged entries back after a later operand failed.
fn roll_back(staged: &[TrashEntry], ctx: &mut CommandContext<'_>) {
    for entry in staged.iter().rev() {
        if let Err(e) = ctx.trash.restore(entry) {
            tracing::warn!(
                "Failed to roll back {} from {}: {}",
                entry.original_path.display(),
                entry.staged_path.display(),
                e
            );
        }
    }
}

/// `discard [-r] <path...>`
///
/// Every operand is validated before anything moves. All operands staged by
/// one command are restored together by a single `revert`.
pub fn discard(args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    let (recursive, operands) = split_recursive(args);
    if operands.is_empty() {
        return Err(ShellError::invalid_arguments("discard: missing operand"));
    }

    let view: &CommandContext<'_> = ctx;
    let targets = operands
        .iter()
        .map(|arg| validate(arg, recursive, view))
        .collect::<Result<Vec<_>>>()?;

    let mut staged = Vec::with_capacity(targets.len());
    for target in targets {
        if target.is_dir
            && ctx.options.confirm_recursive_discard
            && !ctx.confirm.confirm(&format!(
                "discard: remove directory '{}'? (y/n) ",
                target.arg
            ))
        {
            tracing::debug!("Skipped {} at user request", target.path.display());
            continue;
        }

        match ctx.trash.stage(&target.path) {
            Ok(entry) => staged.push(entry),
            Err(e) => {
                roll_back(&staged, ctx);
                return Err(e);
            }
        }
    }

    if !staged.is_empty() {
        ctx.state
            .undo
            .register(UndoAction::RestoreDiscarded { entries: staged });
    }

    Ok(Flow::Continue(CommandOutput::empty()))
}
