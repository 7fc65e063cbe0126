//! Diagnostic log file.
//!
//! Every line is `"[<YYYY-MM-DD HH:MM:SS>] <message>"`. The log is for humans
//! only; counter recovery never reads it.

use std::fmt;
use std::path::Path;

use minish_core::error::{Result, ShellError};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "MINISH_LOG";

/// Flushes the background log writer when dropped.
pub use tracing_appender::non_blocking::WorkerGuard as LogGuard;

/// Local wall-clock time in square brackets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedLocalTime;

impl FormatTime for BracketedLocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Builds the diagnostic subscriber over any writer.
///
/// Lines carry the bracketed timestamp and the message only: no ANSI, no
/// level, no target.
pub fn diagnostic_subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_level(false)
        .with_target(false)
        .with_timer(BracketedLocalTime)
        .with_env_filter(filter)
        .finish()
}

/// Installs the global subscriber writing to `log_file`.
///
/// The returned guard flushes buffered lines when dropped and must be kept
/// alive for the whole session.
pub fn init_diagnostic_log(log_file: &Path) -> Result<LogGuard> {
    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| ShellError::config(format!("Invalid log file: {}", log_file.display())))?;

    std::fs::create_dir_all(directory)?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    diagnostic_subscriber(writer)
        .try_init()
        .map_err(|e| ShellError::config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_layout() {
        let mut out = String::new();
        BracketedLocalTime
            .format_time(&mut Writer::new(&mut out))
            .unwrap();

        // "[2026-10-16 09:30:00]"
        assert_eq!(out.len(), 21);
        assert!(out.starts_with('['));
        assert!(out.ends_with(']'));
        assert_eq!(&out[5..6], "-");
        assert_eq!(&out[11..12], " ");
    }
}
