//! `log`: show recorded history.

use minish_core::error::{Result, ShellError};

use super::CommandContext;
use crate::output::{CommandOutput, Flow};

/// `log [n]`
///
/// `0` behaves like no argument and shows everything.
pub fn log(args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow> {
    let count = match args {
        [] => None,
        [n] => {
            let n: usize = n
                .parse()
                .map_err(|_| ShellError::invalid_arguments(format!("log: invalid count '{}'", n)))?;
            (n > 0).then_some(n)
        }
        _ => return Err(ShellError::invalid_arguments("log: too many arguments")),
    };

    let lines = ctx
        .history
        .tail(count)?
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(Flow::Continue(CommandOutput::lines(lines)))
}
