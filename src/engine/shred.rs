//! Large-file shredder: chunked truncation behind a removed name.
//!
//! Deleting a multi-gigabyte file in one unlink hands the filesystem a
//! single huge reclamation burst. The shredder instead opens the file,
//! removes its name, then walks the length down one chunk at a time with a
//! blocking pause after every truncation step. The final tail (shorter than
//! one chunk) is deliberately left in place; its storage is reclaimed when
//! the last reference goes away at handle close.
//!
//! Hard-linked files are never shredded: truncating data shared with
//! another directory entry would corrupt that other name's content.

use std::fs::OpenOptions;

use crate::core::errors::{Result, SlowrmError};
use crate::core::report::Reporter;
use crate::engine::remove::EntryDeleter;
use crate::engine::throttle::RateLimiter;
use crate::engine::walker::{EntryKind, TraversalEntry};

/// Performs chunked truncation of eligible large files.
#[derive(Debug, Clone, Copy)]
pub struct Shredder {
    chunk_bytes: u64,
    force: bool,
}

impl Shredder {
    /// Shredder for the given chunk threshold and force policy.
    #[must_use]
    pub fn new(chunk_bytes: u64, force: bool) -> Self {
        Self { chunk_bytes, force }
    }

    /// Whether `entry` takes the shredding path instead of a direct unlink.
    ///
    /// Strictly larger than one chunk, and not hard-linked anywhere else.
    #[must_use]
    pub fn eligible(&self, entry: &TraversalEntry) -> bool {
        entry.kind == EntryKind::File
            && entry.size_bytes > self.chunk_bytes
            && entry.nlink <= 1
    }

    /// Remove `entry` by name, then truncate the open handle down in
    /// chunk-sized steps with one pause after each step.
    ///
    /// The handle closes on every exit path (success, force-mode early
    /// break, fatal error) before control returns to the traversal. The
    /// shredded size is never credited to the rate counter; the per-step
    /// pause is the shredder's own pacing.
    pub fn shred(
        &self,
        entry: &TraversalEntry,
        deleter: &EntryDeleter,
        limiter: &mut RateLimiter,
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        let file = match OpenOptions::new()
            .read(true)
            .write(true)
            .open(&entry.access_path)
        {
            Ok(file) => file,
            Err(err) if self.force => {
                reporter.report(&entry.path, &format!("could not open for truncation: {err}"));
                return Ok(());
            }
            Err(err) => {
                return Err(SlowrmError::Open {
                    path: entry.path.clone(),
                    source: err,
                });
            }
        };

        // Name first; the data stays reachable through the open handle.
        if !deleter.delete(entry, reporter)? {
            return Ok(());
        }

        // Logical trim, indifferent to sparseness. A zero threshold would
        // never make progress, so it truncates in zero steps and leaves
        // reclamation to the close below.
        let mut boundary = entry.size_bytes;
        while self.chunk_bytes > 0 && boundary >= self.chunk_bytes {
            boundary -= self.chunk_bytes;
            if let Err(err) = file.set_len(boundary) {
                if self.force {
                    reporter.report(&entry.path, &format!("could not truncate: {err}"));
                    break;
                }
                return Err(SlowrmError::Truncate {
                    path: entry.path.clone(),
                    source: err,
                });
            }
            limiter.pause();
        }

        // `file` drops here: the tail below the threshold is released by
        // the filesystem once this last reference is gone.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::MemoryReporter;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use std::rc::Rc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn entry_for(path: &Path) -> TraversalEntry {
        let meta = fs::symlink_metadata(path).unwrap();
        TraversalEntry {
            path: path.to_path_buf(),
            access_path: path.to_path_buf(),
            kind: EntryKind::File,
            size_bytes: meta.len(),
            nlink: 1,
            device: 0,
            is_root: false,
        }
    }

    fn counting_limiter() -> (RateLimiter, Rc<RefCell<usize>>) {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let limiter = RateLimiter::with_sleep(0, Duration::from_millis(50), move |_| {
            *sink.borrow_mut() += 1;
        });
        (limiter, count)
    }

    #[test]
    fn shreds_in_floor_size_over_chunk_steps() {
        let tmp = TempDir::new().unwrap();
        let big = tmp.path().join("big");
        fs::write(&big, vec![0u8; 10]).unwrap();

        let (mut limiter, pauses) = counting_limiter();
        let mut reporter = MemoryReporter::new();
        Shredder::new(4, false)
            .shred(
                &entry_for(&big),
                &EntryDeleter::new(false),
                &mut limiter,
                &mut reporter,
            )
            .unwrap();

        // Boundaries 6 then 2; the 2-byte tail is left for handle close.
        assert_eq!(*pauses.borrow(), 2);
        assert!(!big.exists());
        assert!(reporter.lines.is_empty());
    }

    #[test]
    fn name_is_gone_before_the_first_pause() {
        let tmp = TempDir::new().unwrap();
        let big = tmp.path().join("big");
        fs::write(&big, vec![0u8; 12]).unwrap();

        let probe = big.clone();
        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&observed);
        let mut limiter = RateLimiter::with_sleep(0, Duration::ZERO, move |_| {
            sink.borrow_mut().push(probe.exists());
        });

        let mut reporter = MemoryReporter::new();
        Shredder::new(5, false)
            .shred(
                &entry_for(&big),
                &EntryDeleter::new(false),
                &mut limiter,
                &mut reporter,
            )
            .unwrap();

        let observed = observed.borrow();
        assert_eq!(observed.len(), 2);
        assert!(
            observed.iter().all(|existed| !existed),
            "name must be removed before any truncation pause"
        );
    }

    #[test]
    fn exact_multiple_truncates_down_to_zero() {
        let tmp = TempDir::new().unwrap();
        let big = tmp.path().join("big");
        fs::write(&big, vec![0u8; 10]).unwrap();

        let (mut limiter, pauses) = counting_limiter();
        let mut reporter = MemoryReporter::new();
        Shredder::new(5, false)
            .shred(
                &entry_for(&big),
                &EntryDeleter::new(false),
                &mut limiter,
                &mut reporter,
            )
            .unwrap();

        // Boundaries 5 then 0.
        assert_eq!(*pauses.borrow(), 2);
        assert!(!big.exists());
    }

    #[test]
    fn hard_linked_files_are_not_eligible() {
        let tmp = TempDir::new().unwrap();
        let big = tmp.path().join("big");
        fs::write(&big, vec![0u8; 100]).unwrap();
        fs::hard_link(&big, tmp.path().join("alias")).unwrap();

        let mut entry = entry_for(&big);
        entry.nlink = 2;
        assert!(!Shredder::new(10, false).eligible(&entry));
    }

    #[test]
    fn size_exactly_at_threshold_is_not_eligible() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("borderline");
        fs::write(&file, vec![0u8; 8]).unwrap();

        let shredder = Shredder::new(8, false);
        assert!(!shredder.eligible(&entry_for(&file)));

        fs::write(&file, vec![0u8; 9]).unwrap();
        assert!(shredder.eligible(&entry_for(&file)));
    }

    #[test]
    fn zero_threshold_shreds_without_truncation_steps() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("anything");
        fs::write(&file, vec![0u8; 7]).unwrap();

        let shredder = Shredder::new(0, false);
        assert!(shredder.eligible(&entry_for(&file)));

        let (mut limiter, pauses) = counting_limiter();
        let mut reporter = MemoryReporter::new();
        shredder
            .shred(
                &entry_for(&file),
                &EntryDeleter::new(false),
                &mut limiter,
                &mut reporter,
            )
            .unwrap();

        assert_eq!(*pauses.borrow(), 0);
        assert!(!file.exists());
    }

    #[test]
    fn shredding_never_credits_the_rate_counter() {
        let tmp = TempDir::new().unwrap();
        let big = tmp.path().join("big");
        fs::write(&big, vec![0u8; 30]).unwrap();

        let (mut limiter, _pauses) = counting_limiter();
        let mut reporter = MemoryReporter::new();
        Shredder::new(10, false)
            .shred(
                &entry_for(&big),
                &EntryDeleter::new(false),
                &mut limiter,
                &mut reporter,
            )
            .unwrap();

        assert_eq!(limiter.bytes_since_pause(), 0);
    }

    #[test]
    fn open_failure_without_force_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("never-existed");
        let entry = TraversalEntry {
            path: gone.clone(),
            access_path: gone,
            kind: EntryKind::File,
            size_bytes: 100,
            nlink: 1,
            device: 0,
            is_root: false,
        };

        let (mut limiter, _pauses) = counting_limiter();
        let mut reporter = MemoryReporter::new();
        let err = Shredder::new(10, false)
            .shred(
                &entry,
                &EntryDeleter::new(false),
                &mut limiter,
                &mut reporter,
            )
            .unwrap_err();

        assert_eq!(err.code(), "SRM-3002");
    }

    #[test]
    fn open_failure_with_force_reports_and_skips() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("never-existed");
        let entry = TraversalEntry {
            path: gone.clone(),
            access_path: gone,
            kind: EntryKind::File,
            size_bytes: 100,
            nlink: 1,
            device: 0,
            is_root: false,
        };

        let (mut limiter, pauses) = counting_limiter();
        let mut reporter = MemoryReporter::new();
        Shredder::new(10, true)
            .shred(
                &entry,
                &EntryDeleter::new(true),
                &mut limiter,
                &mut reporter,
            )
            .unwrap();

        assert_eq!(*pauses.borrow(), 0);
        assert!(reporter.mentions("could not open for truncation"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            /// One truncation step (and one pause) per whole chunk in the
            /// file, regardless of how size and chunk line up.
            #[test]
            fn pause_count_is_floor_size_over_chunk(
                size in 1u64..512,
                chunk in 1u64..64,
            ) {
                let tmp = TempDir::new().unwrap();
                let file = tmp.path().join("f");
                fs::write(&file, vec![0u8; usize::try_from(size).unwrap()]).unwrap();

                let (mut limiter, pauses) = counting_limiter();
                let mut reporter = MemoryReporter::new();
                Shredder::new(chunk, false)
                    .shred(
                        &entry_for(&file),
                        &EntryDeleter::new(false),
                        &mut limiter,
                        &mut reporter,
                    )
                    .unwrap();

                prop_assert_eq!(u64::try_from(*pauses.borrow()).unwrap(), size / chunk);
                prop_assert!(!file.exists());
            }
        }
    }
}
