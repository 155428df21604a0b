//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use slowrm::prelude::*;
//! ```

// Core
pub use crate::core::config::{Config, DEFAULT_CHUNK_MB, DEFAULT_SLEEP_SECS};
pub use crate::core::errors::{Result, SlowrmError};
pub use crate::core::report::{MemoryReporter, Reporter, StderrReporter};

// Engine
pub use crate::engine::driver::Driver;
pub use crate::engine::remove::EntryDeleter;
pub use crate::engine::shred::Shredder;
pub use crate::engine::throttle::RateLimiter;
pub use crate::engine::walker::{EntryKind, TraversalEntry, TreeWalker};
