//! `search`: regex line search.

use std::path::Path;

use minish_core::error::{Result, ShellError};
use regex::{Regex, RegexBuilder};

use super::CommandContext;
use crate::output::{CommandOutput, Flow};

const USAGE: &str = "search: usage: search [-r] [-i] <pattern> <path>";

/// Appends `<path>:<line number>:<line>` for every matching line.
///
/// Files that cannot be read as UTF-8 text are skipped.
fn search_file(file: &Path, regex: &Regex, ctx: &CommandContext<'_>, out: &mut Vec<String>) {
    let content = match ctx.fs.read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Skipping {}: {}", file.display(), e);
            return;
        }
    };

    let shown = ctx.state.display_relative(file);
    for (index, line) in content.lines().enumerate() {
        if regex.is_match(line) {
            out.push(format!("{}:{}:{}", shown, index + 1, line));
        }
    }
}

/// `search [-r] [-i] <pattern> <path>`
///
/// Leading words starting with `-` are flags; any flag word containing `r`
/// enables recursion and any containing `i` ignores case, so `-ri` works.
pub fn search(args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    let mut recursive = false;
    let mut ignore_case = false;
    let mut rest = args;
    while let Some((flag, tail)) = rest.split_first() {
        if !flag.starts_with('-') {
            break;
        }
        recursive |= flag.contains('r');
        ignore_case |= flag.contains('i');
        rest = tail;
    }

    let [pattern, path_arg] = rest else {
        return Err(ShellError::invalid_arguments(USAGE));
    };

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| ShellError::invalid_arguments(format!("search: invalid pattern: {}", e)))?;

    let ctx: &CommandContext<'_> = ctx;
    let path = ctx.resolve(path_arg);
    let mut lines = Vec::new();

    if ctx.fs.is_file(&path) {
        search_file(&path, &regex, ctx, &mut lines);
    } else if ctx.fs.is_dir(&path) {
        if !recursive {
            return Err(ShellError::is_directory(format!(
                "search: {}: Is a directory, use -r",
                path_arg
            )));
        }
        for file in ctx.fs.walk_files(&path)? {
            search_file(&file, &regex, ctx, &mut lines);
        }
    } else {
        return Err(ShellError::not_found(format!(
            "search: {}: No such file or directory",
            path_arg
        )));
    }

    Ok(Flow::Continue(CommandOutput::lines(lines)))
}
