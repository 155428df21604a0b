//! Entry deleter: the single unlink chokepoint.
//!
//! Both the direct small-file path and the shredder's name-removal step go
//! through [`EntryDeleter::delete`], so the force/abort policy lives in
//! exactly one place. `Ok(false)` means "failed but the run continues" and
//! lets the caller decide whether to skip rate-counter accumulation.

use std::fs;
use std::path::Path;

use crate::core::errors::{Result, SlowrmError};
use crate::core::report::Reporter;
use crate::engine::walker::TraversalEntry;

/// Removes a single non-directory entry name.
#[derive(Debug, Clone, Copy)]
pub struct EntryDeleter {
    force: bool,
}

impl EntryDeleter {
    /// Deleter applying the given force policy.
    #[must_use]
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    /// Unlink `entry`'s name. `Ok(true)` on success; `Ok(false)` after a
    /// reported failure in force mode; `Err` aborts the run otherwise.
    pub fn delete(&self, entry: &TraversalEntry, reporter: &mut dyn Reporter) -> Result<bool> {
        self.delete_path(&entry.path, &entry.access_path, reporter)
    }

    /// Path-level variant for callers holding no full entry (the shredder's
    /// name-removal step).
    pub fn delete_path(
        &self,
        path: &Path,
        access_path: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<bool> {
        match fs::remove_file(access_path) {
            Ok(()) => Ok(true),
            Err(err) if self.force => {
                reporter.report(path, &format!("could not unlink: {err}"));
                Ok(false)
            }
            Err(err) => Err(SlowrmError::unlink(path, err)),
        }
    }
}
