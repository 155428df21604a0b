//! SRM-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, SlowrmError>;

/// Top-level error type for slowrm.
///
/// Configuration errors (1xxx) are always fatal at startup. Policy
/// violations (2xxx) and syscall failures (3xxx) are fatal unless the run
/// is in force mode, in which case the failure site reports the problem
/// and continues instead of constructing one of these.
#[derive(Debug, Error)]
pub enum SlowrmError {
    #[error("[SRM-1001] please provide at least one path")]
    MissingPaths,

    #[error("[SRM-1002] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[SRM-2001] directory ({path}) encountered in non-recursive mode")]
    NotRecursive { path: PathBuf },

    #[error("[SRM-3001] could not read ({path}): {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[SRM-3002] could not open ({path}) for truncation: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[SRM-3003] could not unlink ({path}): {source}")]
    Unlink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[SRM-3004] could not truncate ({path}): {source}")]
    Truncate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[SRM-3005] could not remove ({path}) directory: {source}")]
    Rmdir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SlowrmError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingPaths => "SRM-1001",
            Self::InvalidConfig { .. } => "SRM-1002",
            Self::NotRecursive { .. } => "SRM-2001",
            Self::Walk { .. } => "SRM-3001",
            Self::Open { .. } => "SRM-3002",
            Self::Unlink { .. } => "SRM-3003",
            Self::Truncate { .. } => "SRM-3004",
            Self::Rmdir { .. } => "SRM-3005",
        }
    }

    /// Whether force mode is allowed to downgrade this failure to a
    /// reported warning. Configuration errors never are.
    #[must_use]
    pub const fn is_forceable(&self) -> bool {
        !matches!(self, Self::MissingPaths | Self::InvalidConfig { .. })
    }

    /// Convenience constructor for traversal read failures.
    #[must_use]
    pub fn walk(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Walk {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Convenience constructor for unlink failures.
    #[must_use]
    pub fn unlink(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Unlink {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
