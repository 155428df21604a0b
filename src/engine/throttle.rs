//! Deletion-rate limiter: a byte counter that buys a pause.
//!
//! Runs of small unlinks are free until their cumulative size crosses the
//! chunk threshold; the next file then pays one blocking pause before it is
//! processed. The counter resets to zero immediately after every pause and
//! is never decremented otherwise.
//!
//! The same pause primitive paces the shredder between truncation steps,
//! unconditionally and independent of the threshold comparison.

use std::fmt;
use std::thread;
use std::time::Duration;

/// Tracks bytes removed since the last pause and issues blocking pauses.
///
/// Single-writer by construction: the driver owns the limiter and threads a
/// mutable reference through the traversal. The sleep itself is injectable
/// so tests can count pauses without real delays.
pub struct RateLimiter {
    threshold: u64,
    pause: Duration,
    bytes_since_pause: u64,
    sleep: Box<dyn FnMut(Duration)>,
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("threshold", &self.threshold)
            .field("pause", &self.pause)
            .field("bytes_since_pause", &self.bytes_since_pause)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// Limiter with a real `thread::sleep` pause.
    #[must_use]
    pub fn new(threshold: u64, pause: Duration) -> Self {
        Self::with_sleep(threshold, pause, thread::sleep)
    }

    /// Limiter with a caller-supplied sleep, for tests and embedding.
    #[must_use]
    pub fn with_sleep(
        threshold: u64,
        pause: Duration,
        sleep: impl FnMut(Duration) + 'static,
    ) -> Self {
        Self {
            threshold,
            pause,
            bytes_since_pause: 0,
            sleep: Box::new(sleep),
        }
    }

    /// Pause iff the accumulated byte count exceeds the threshold.
    ///
    /// Called once before each regular file is processed, ahead of the
    /// shred-or-delete dispatch. The comparison is strictly greater-than: a
    /// counter sitting exactly at the threshold does not pause.
    pub fn maybe_pause(&mut self) {
        if self.bytes_since_pause > self.threshold {
            self.pause();
        }
    }

    /// Block for the configured duration and reset the counter.
    pub fn pause(&mut self) {
        (self.sleep)(self.pause);
        self.bytes_since_pause = 0;
    }

    /// Credit the counter with the size of a directly deleted file.
    pub fn credit(&mut self, bytes: u64) {
        self.bytes_since_pause = self.bytes_since_pause.saturating_add(bytes);
    }

    /// Current accumulated byte count.
    #[must_use]
    pub fn bytes_since_pause(&self) -> u64 {
        self.bytes_since_pause
    }
}
