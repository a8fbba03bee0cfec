//! Logger module
//!
//! Process-wide line logging for the HTTP layer:
//! - `[ISO timestamp] [LEVEL] message` diagnostics, info/warn to stdout
//!   and error to stderr
//! - a shorter `time [source] message` form for the access log
//!
//! No buffering, no rotation. Writes that fail are dropped rather than
//! propagated, so logging can never take a request down with it.

mod format;

pub use format::access_line;

use std::io::Write;

use chrono::{Local, SecondsFormat, Utc};

/// Write an info line to stdout
pub fn info(message: &str) {
    write_stdout(&format!("[{}] [INFO] {message}", timestamp()));
}

/// Write a warning line to stdout
pub fn warn(message: &str) {
    write_stdout(&format!("[{}] [WARN] {message}", timestamp()));
}

/// Write an error line to stderr
pub fn error(message: &str) {
    write_stderr(&format!("[{}] [ERROR] {message}", timestamp()));
}

/// Write one access-log line: `2:05:17 PM [portfolio] GET /api/health 200 in 1ms`
pub fn access(source: &str, message: &str) {
    let time = Local::now().format("%-I:%M:%S %p");
    write_stdout(&format!("{time} [{source}] {message}"));
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn write_stdout(line: &str) {
    let _ = writeln!(std::io::stdout().lock(), "{line}");
}

fn write_stderr(line: &str) {
    let _ = writeln!(std::io::stderr().lock(), "{line}");
}
