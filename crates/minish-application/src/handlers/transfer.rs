//! `duplicate` and `relocate`.

use minish_core::error::{Result, ShellError};
use minish_core::undo::UndoAction;

use super::{CommandContext, split_recursive};
use crate::output::{CommandOutput, Flow};

/// `duplicate [-r] <src> <dst>`
pub fn duplicate(args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    let (recursive, operands) = split_recursive(args);
    let [src_arg, dst_arg] = operands else {
        return Err(ShellError::invalid_arguments(
            "duplicate: missing source or destination",
        ));
    };

    let src = ctx.resolve(src_arg);
    let dst = ctx.resolve(dst_arg);

    if !ctx.fs.exists(&src) {
        return Err(ShellError::not_found(format!(
            "duplicate: cannot stat '{}': No such file or directory",
            src_arg
        )));
    }
    if ctx.fs.exists(&dst) {
        return Err(ShellError::already_exists(format!(
            "duplicate: destination '{}' exists",
            dst_arg
        )));
    }
    if ctx.fs.is_dir(&src) && !recursive {
        return Err(ShellError::is_directory(format!(
            "duplicate: -r not specified; omitting directory '{}'",
            src_arg
        )));
    }

    ctx.fs.copy(&src, &dst, recursive)?;
    ctx.state.undo.register(UndoAction::RemoveCopy { path: dst });

    Ok(Flow::Continue(CommandOutput::empty()))
}

/// `relocate <src> <dst>`
///
/// A directory destination receives the source under its own base name.
pub fn relocate(args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    let [src_arg, dst_arg] = args else {
        return Err(ShellError::invalid_arguments(
            "relocate: missing source or destination",
        ));
    };

    let src = ctx.resolve(src_arg);
    let dst = ctx.resolve(dst_arg);

    if !ctx.fs.exists(&src) {
        return Err(ShellError::not_found(format!(
            "relocate: cannot stat '{}': No such file or directory",
            src_arg
        )));
    }

    let final_dst = match src.file_name() {
        Some(name) if ctx.fs.is_dir(&dst) => dst.join(name),
        _ => dst,
    };

    if ctx.fs.exists(&final_dst) {
        return Err(ShellError::already_exists(format!(
            "relocate: destination '{}' exists",
            final_dst.display()
        )));
    }

    ctx.fs.move_path(&src, &final_dst)?;
    ctx.state.undo.register(UndoAction::RestoreMoved {
        current: final_dst,
        original: src,
    });

    Ok(Flow::Continue(CommandOutput::empty()))
}
