//! Diagnostic sink: one line per failure or warning, addressed by path.
//!
//! The engine never prints directly. Every continue-and-report site hands a
//! `(path, message)` pair to a [`Reporter`]; formatting and destination are
//! the sink's concern. Fatal (non-force) failures skip the sink entirely and
//! surface once through the propagated error at the top level, so each
//! problem produces exactly one stderr line either way.

use std::path::{Path, PathBuf};

use colored::Colorize;

/// Destination for per-path diagnostics.
pub trait Reporter {
    /// Record one failure or warning for `path`.
    fn report(&mut self, path: &Path, message: &str);
}

/// Production sink: writes `slowrm: <path>: <message>` lines to stderr.
#[derive(Debug, Default)]
pub struct StderrReporter;

impl StderrReporter {
    /// Create a stderr-backed reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for StderrReporter {
    fn report(&mut self, path: &Path, message: &str) {
        eprintln!(
            "{} {}: {message}",
            "slowrm:".yellow().bold(),
            path.display()
        );
    }
}

/// Collecting sink used by tests and library callers that want to inspect
/// diagnostics after a run.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    /// Recorded `(path, message)` pairs, in report order.
    pub lines: Vec<(PathBuf, String)>,
}

impl MemoryReporter {
    /// Create an empty collecting reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any diagnostic mentioning `needle` was recorded.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|(p, m)| {
            p.to_string_lossy().contains(needle) || m.contains(needle)
        })
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, path: &Path, message: &str) {
        self.lines.push((path.to_path_buf(), message.to_string()));
    }
}
