//! Progress reporting for conversions.
//!
//! A converter emits one line per table, `Done.` on success and an
//! `Error: ...` line on failure. Sinks decide where those lines go.

use std::io::Write;

/// Receiver of progress and error lines
pub trait ProgressSink {
    /// A progress line; printed to stdout unless overridden.
    fn write(&mut self, line: &str) {
        let _ = writeln!(std::io::stdout().lock(), "{}", line);
    }

    /// A fatal error line; printed to stderr unless overridden.
    fn error(&mut self, line: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}

/// Progress on stdout, errors on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn write(&mut self, _line: &str) {}

    fn error(&mut self, _line: &str) {}
}

/// Collects lines in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryProgress {
    pub lines: Vec<String>,
    pub errors: Vec<String>,
}

impl MemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for MemoryProgress {
    fn write(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn error(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }
}

/// Forwards every line to a status callback, for front-ends with a status area.
///
/// Progress lines are also echoed to stdout. The last error is kept so the
/// caller can tell whether the conversion failed.
pub struct StatusProgress<F> {
    status: F,
    fatal: Option<String>,
}

impl<F: FnMut(&str)> StatusProgress<F> {
    pub fn new(status: F) -> Self {
        Self { status, fatal: None }
    }

    /// The error line reported, if any.
    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }
}

impl<F: FnMut(&str)> ProgressSink for StatusProgress<F> {
    fn write(&mut self, line: &str) {
        let _ = writeln!(std::io::stdout().lock(), "{}", line);
        (self.status)(line);
    }

    fn error(&mut self, line: &str) {
        self.fatal = Some(line.to_string());
        (self.status)(line);
    }
}

impl<F> std::fmt::Debug for StatusProgress<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusProgress")
            .field("fatal", &self.fatal)
            .finish_non_exhaustive()
    }
}
