#![forbid(unsafe_code)]

//! slowrm: recursive removal with bounded deletion-I/O bursts.
//!
//! Plain `rm -rf` on a busy volume hands the filesystem an unbounded
//! burst of unlink and reclamation work. slowrm paces itself instead:
//!
//! 1. **Throttled unlinks**: a byte counter accumulates across small-file
//!    deletions and buys one blocking pause whenever it crosses the chunk
//!    threshold
//! 2. **Chunked truncation**: large, un-hardlinked files lose their name
//!    first, then shrink one chunk at a time through the surviving open
//!    handle, pausing after every step
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use slowrm::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use slowrm::core::config::Config;
//! use slowrm::engine::driver::Driver;
//! ```

pub mod prelude;

pub mod core;
pub mod engine;
