//! `revert`: run the pending inverse action.

use minish_core::error::{Result, ShellError};
use minish_core::undo::{UndoAction, UndoOutcome};

use super::CommandContext;
use crate::output::{CommandOutput, Flow};

/// Runs `action`.
///
/// On failure returns the part of the action that still needs doing, which
/// is the whole action except for a partially restored discard.
fn apply_inverse(
    action: &UndoAction,
    ctx: &mut CommandContext<'_>,
) -> std::result::Result<(), (UndoAction, ShellError)> {
    match action {
        UndoAction::RestoreMoved { current, original } => {
            let result = if !ctx.fs.exists(current) {
                Err(ShellError::not_found(format!(
                    "revert: '{}' no longer exists",
                    current.display()
                )))
            } else if ctx.fs.exists(original) {
                Err(ShellError::already_exists(format!(
                    "revert: '{}' exists",
                    original.display()
                )))
            } else {
                ctx.fs.move_path(current, original)
            };
            result.map_err(|e| (action.clone(), e))
        }
        UndoAction::RemoveCopy { path } => {
            let result = if ctx.fs.exists(path) {
                ctx.fs.remove_tree(path)
            } else {
                Err(ShellError::not_found(format!(
                    "revert: '{}' no longer exists",
                    path.display()
                )))
            };
            result.map_err(|e| (action.clone(), e))
        }
        UndoAction::RestoreDiscarded { entries } => {
            for (index, entry) in entries.iter().enumerate().rev() {
                if let Err(e) = ctx.trash.restore(entry) {
                    let remaining = UndoAction::RestoreDiscarded {
                        entries: entries[..=index].to_vec(),
                    };
                    return Err((remaining, e));
                }
            }
            Ok(())
        }
    }
}

/// Runs `action` for a command that never got committed.
///
/// History is left alone since nothing was appended for that command.
pub fn roll_back(action: &UndoAction, ctx: &mut CommandContext<'_>) -> Result<()> {
    apply_inverse(action, ctx).map_err(|(_, e)| e)
}

/// Reverts the most recent reversible command.
///
/// On success the slot is cleared and the newest history entry is dropped.
/// On failure the error is returned and the unfinished part of the action
/// stays registered so it can be retried.
fn undo(ctx: &mut CommandContext<'_>) -> Result<UndoOutcome> {
    let Some(action) = ctx.state.undo.take() else {
        return Ok(UndoOutcome::NothingPending);
    };

    if let Err((remaining, e)) = apply_inverse(&action, ctx) {
        ctx.state.undo.register(remaining);
        return Err(e);
    }

    if let Some(dropped) = ctx.history.drop_last()? {
        tracing::debug!("Dropped history entry: {}", dropped);
    }

    Ok(UndoOutcome::Reverted(action))
}

/// `revert`
pub fn revert(args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    if !args.is_empty() {
        return Err(ShellError::invalid_arguments("revert: takes no arguments"));
    }

    let output = match undo(ctx)? {
        UndoOutcome::Reverted(action) => CommandOutput::info(format!("Reverted: {}", action)),
        UndoOutcome::NothingPending => CommandOutput::info("No action to undo"),
    };

    Ok(Flow::Continue(output))
}
