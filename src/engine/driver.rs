//! Driver: walks each configured root and applies the per-entry policy.
//!
//! Owns the rate limiter and threads it through the traversal as the only
//! writer. Every failure funnels into one of two outcomes: report-and-
//! continue (force mode) or an early-returned error that aborts the whole
//! run; nothing in the engine retries or aggregates failures.

use std::fs;
use std::path::Path;

use crate::core::config::Config;
use crate::core::errors::{Result, SlowrmError};
use crate::core::report::Reporter;
use crate::engine::remove::EntryDeleter;
use crate::engine::shred::Shredder;
use crate::engine::throttle::RateLimiter;
use crate::engine::walker::{EntryKind, TraversalEntry, TreeWalker};

/// Top-level deletion engine for one configured run.
pub struct Driver<'a> {
    config: &'a Config,
    limiter: RateLimiter,
    deleter: EntryDeleter,
    shredder: Shredder,
    reporter: &'a mut dyn Reporter,
}

impl<'a> Driver<'a> {
    /// Driver with a real sleeping rate limiter derived from `config`.
    pub fn new(config: &'a Config, reporter: &'a mut dyn Reporter) -> Self {
        let limiter = RateLimiter::new(config.chunk_bytes, config.pause);
        Self::with_limiter(config, limiter, reporter)
    }

    /// Driver with a caller-supplied limiter (tests inject a recording
    /// sleep here).
    pub fn with_limiter(
        config: &'a Config,
        limiter: RateLimiter,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            config,
            limiter,
            deleter: EntryDeleter::new(config.force),
            shredder: Shredder::new(config.chunk_bytes, config.force),
            reporter,
        }
    }

    /// Process every configured root in order. Returns at the first fatal
    /// error; later roots are then left untouched.
    pub fn run(&mut self) -> Result<()> {
        for root in &self.config.roots {
            self.sweep(root)?;
        }
        Ok(())
    }

    /// Inspect the rate limiter (used by tests and embedders).
    #[must_use]
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    fn sweep(&mut self, root: &Path) -> Result<()> {
        let mut walker = TreeWalker::new(root, self.config.one_file_system);
        while let Some(item) = walker.next_entry() {
            match item {
                Ok(entry) => self.dispatch(&mut walker, &entry)?,
                Err(err) => self.tolerate_walk(err)?,
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, walker: &mut TreeWalker, entry: &TraversalEntry) -> Result<()> {
        match entry.kind {
            EntryKind::PreDir => self.enter_directory(walker, entry),
            EntryKind::PostDir => self.remove_directory(entry),
            EntryKind::File => self.remove_file(entry),
            // Symlinks, fifos, device nodes: plain unlink, no accounting.
            EntryKind::Other => self.deleter.delete(entry, self.reporter).map(drop),
        }
    }

    /// Policy check on a directory's pre-order visit. Deletion waits for
    /// the post-order event.
    fn enter_directory(&mut self, walker: &mut TreeWalker, entry: &TraversalEntry) -> Result<()> {
        if self.config.recursive || entry.is_root {
            return Ok(());
        }
        if self.config.force {
            self.reporter.report(
                &entry.path,
                "directory encountered in non-recursive mode; skipping subtree",
            );
            walker.skip_current_dir();
            return Ok(());
        }
        Err(SlowrmError::NotRecursive {
            path: entry.path.clone(),
        })
    }

    /// Post-order removal; the subtree below is already gone.
    fn remove_directory(&mut self, entry: &TraversalEntry) -> Result<()> {
        match fs::remove_dir(&entry.access_path) {
            Ok(()) => Ok(()),
            Err(err) if self.config.force => {
                self.reporter
                    .report(&entry.path, &format!("could not remove directory: {err}"));
                Ok(())
            }
            Err(err) => Err(SlowrmError::Rmdir {
                path: entry.path.clone(),
                source: err,
            }),
        }
    }

    fn remove_file(&mut self, entry: &TraversalEntry) -> Result<()> {
        // Threshold pause gates entry to each regular file, ahead of the
        // shred-or-delete decision.
        self.limiter.maybe_pause();

        if self.shredder.eligible(entry) {
            self.shredder
                .shred(entry, &self.deleter, &mut self.limiter, self.reporter)
        } else {
            if self.deleter.delete(entry, self.reporter)? {
                self.limiter.credit(entry.size_bytes);
            }
            Ok(())
        }
    }

    /// A traversal read failure is tolerated only in force mode.
    fn tolerate_walk(&mut self, err: SlowrmError) -> Result<()> {
        match err {
            SlowrmError::Walk { path, source } if self.config.force => {
                self.reporter
                    .report(&path, &format!("could not read: {source}"));
                Ok(())
            }
            other => Err(other),
        }
    }
}
