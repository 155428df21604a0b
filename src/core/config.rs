//! Run configuration: CLI-provided knobs + env-derived defaults.

#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::errors::{Result, SlowrmError};

/// Default chunk size in megabytes, matching the `--chunk` flag.
pub const DEFAULT_CHUNK_MB: u64 = 128;

/// Default pause between chunks in seconds, matching the `--sleep` flag.
pub const DEFAULT_SLEEP_SECS: f64 = 0.1;

/// Immutable run configuration consumed by the deletion engine.
///
/// Built once from the CLI surface and validated; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Dive into directories recursively.
    pub recursive: bool,
    /// Chunk threshold in bytes. Gates both the shredding step size and the
    /// small-file throttling burst size. Zero is valid and degenerate.
    pub chunk_bytes: u64,
    /// Blocking pause applied by both pacing mechanisms.
    pub pause: Duration,
    /// Continue on errors instead of aborting the whole run.
    pub force: bool,
    /// Never touch entries on a different filesystem than their root.
    pub one_file_system: bool,
    /// Roots to remove, processed in order.
    pub roots: Vec<PathBuf>,
}

impl Config {
    /// Validate and freeze a configuration.
    ///
    /// `chunk_mb` is whole megabytes; anything nonzero is converted to
    /// bytes, zero passes through unconverted and yields a threshold of 0.
    pub fn new(
        recursive: bool,
        chunk_mb: u64,
        sleep_secs: f64,
        force: bool,
        one_file_system: bool,
        roots: Vec<PathBuf>,
    ) -> Result<Self> {
        if roots.is_empty() {
            return Err(SlowrmError::MissingPaths);
        }
        if !sleep_secs.is_finite() || sleep_secs < 0.0 {
            return Err(SlowrmError::InvalidConfig {
                details: format!("sleep must be a non-negative number of seconds, got {sleep_secs}"),
            });
        }

        Ok(Self {
            recursive,
            chunk_bytes: chunk_mb_to_bytes(chunk_mb),
            pause: Duration::from_secs_f64(sleep_secs),
            force,
            one_file_system,
            roots,
        })
    }
}

/// Megabytize the argument; zero passes through.
#[must_use]
pub fn chunk_mb_to_bytes(chunk_mb: u64) -> u64 {
    if chunk_mb == 0 {
        0
    } else {
        chunk_mb.saturating_mul(1 << 20)
    }
}

/// Default for `--chunk`, overridable via `SLOWRM_CHUNK_MB`.
#[must_use]
pub fn default_chunk_mb() -> u64 {
    env_override("SLOWRM_CHUNK_MB").unwrap_or(DEFAULT_CHUNK_MB)
}

/// Default for `--sleep`, overridable via `SLOWRM_SLEEP_SECS`.
#[must_use]
pub fn default_sleep_secs() -> f64 {
    env_override("SLOWRM_SLEEP_SECS").unwrap_or(DEFAULT_SLEEP_SECS)
}

/// Parse an environment override, ignoring unset or unparseable values.
fn env_override<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| raw.trim().parse().ok())
}
