//! The deletion engine: traversal, pacing, shredding, and the driver.
//!
//! Layered leaf-first: [`walker`] yields entries, [`throttle`] owns the
//! byte counter and the blocking pause, [`remove`] is the unlink
//! chokepoint, [`shred`] handles chunked truncation of large files, and
//! [`driver`] wires them together per configured root.

pub mod driver;
pub mod remove;
pub mod shred;
pub mod throttle;
pub mod walker;
