//! Depth-first post-order directory walker with subtree-skip control.
//!
//! One walker covers one root. Entries are produced lazily from an explicit
//! stack of open directory cursors: a directory is announced with a
//! pre-order event when first reached, its children (and their subtrees)
//! are yielded next, and the directory comes back as a post-order event
//! once everything under it has been consumed. The post-order event is the
//! caller's cue that the directory can be removed.
//!
//! The walker never follows symlinks and never changes working directory.
//! With `one_file_system`, entries on a different device than the root are
//! silently excluded from both descent and yielding.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, SlowrmError};

/// Classification of a yielded entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory, first visit; nothing under it has been yielded yet.
    PreDir,
    /// Directory, second visit; every entry under it has been yielded.
    PostDir,
    /// Regular file.
    File,
    /// Anything else: symlink, fifo, socket, device node.
    Other,
}

/// A single entry produced by the walk. Consumed once, not retained.
#[derive(Debug, Clone)]
pub struct TraversalEntry {
    /// Full path, for diagnostics.
    pub path: PathBuf,
    /// Path handed to syscalls. Equals `path`; the walker never chdirs.
    pub access_path: PathBuf,
    /// Entry classification.
    pub kind: EntryKind,
    /// Length from the pre-visit lstat.
    pub size_bytes: u64,
    /// Hard link count from the pre-visit lstat.
    pub nlink: u64,
    /// Device id from the pre-visit lstat.
    pub device: u64,
    /// Whether this entry is the configured root itself.
    pub is_root: bool,
}

/// A directory whose post-order visit is still pending.
struct DirFrame {
    entry: TraversalEntry,
    /// Open cursor over the directory's children. `None` until descent.
    children: Option<fs::ReadDir>,
    /// Set once an open was attempted, so a failed open still produces the
    /// post-order event instead of retrying forever.
    opened: bool,
}

/// Lazy post-order walker over a single root path.
pub struct TreeWalker {
    one_file_system: bool,
    root_device: u64,
    /// Root not yet visited. Taken on the first `next_entry` call.
    start: Option<PathBuf>,
    stack: Vec<DirFrame>,
}

impl TreeWalker {
    /// Walker positioned before `root`. No filesystem access happens until
    /// the first `next_entry` call.
    #[must_use]
    pub fn new(root: &Path, one_file_system: bool) -> Self {
        Self {
            one_file_system,
            root_device: 0,
            start: Some(root.to_path_buf()),
            stack: Vec::new(),
        }
    }

    /// Produce the next entry, or a traversal error the caller may choose
    /// to tolerate. `None` means the root is exhausted.
    ///
    /// After an `Err`, the walker stays usable: the failed entry has been
    /// skipped and iteration continues with whatever comes next.
    pub fn next_entry(&mut self) -> Option<Result<TraversalEntry>> {
        if let Some(root) = self.start.take() {
            return Some(self.enter_root(root));
        }

        loop {
            let frame = self.stack.last_mut()?;

            if frame.children.is_none() && !frame.opened {
                frame.opened = true;
                match fs::read_dir(&frame.entry.access_path) {
                    Ok(cursor) => frame.children = Some(cursor),
                    Err(err) => {
                        let path = frame.entry.path.clone();
                        return Some(Err(SlowrmError::walk(path, err)));
                    }
                }
            }

            let next_child = frame.children.as_mut().and_then(|cursor| cursor.next());
            match next_child {
                None => {
                    // Exhausted (or unreadable): the directory comes back
                    // post-order.
                    let mut entry = self.stack.pop().map(|f| f.entry)?;
                    entry.kind = EntryKind::PostDir;
                    return Some(Ok(entry));
                }
                Some(Err(err)) => {
                    let path = frame.entry.path.clone();
                    return Some(Err(SlowrmError::walk(path, err)));
                }
                Some(Ok(dirent)) => {
                    let child = dirent.path();
                    let meta = match fs::symlink_metadata(&child) {
                        Ok(meta) => meta,
                        Err(err) => return Some(Err(SlowrmError::walk(child, err))),
                    };
                    if self.excluded_by_device(&meta) {
                        continue;
                    }
                    let entry = build_entry(child, &meta, false);
                    if entry.kind == EntryKind::PreDir {
                        self.push_dir(entry.clone());
                    }
                    return Some(Ok(entry));
                }
            }
        }
    }

    /// Drop the remaining descendants of the directory whose `PreDir` entry
    /// was just yielded. The directory produces no post-order event; the
    /// walk continues with its siblings.
    pub fn skip_current_dir(&mut self) {
        debug_assert!(
            self.stack.last().is_some_and(|f| !f.opened),
            "skip_current_dir must follow a PreDir entry"
        );
        self.stack.pop();
    }

    fn enter_root(&mut self, root: PathBuf) -> Result<TraversalEntry> {
        let meta = match fs::symlink_metadata(&root) {
            Ok(meta) => meta,
            Err(err) => return Err(SlowrmError::walk(root, err)),
        };
        self.root_device = device_id(&meta);

        let entry = build_entry(root, &meta, true);
        if entry.kind == EntryKind::PreDir {
            self.push_dir(entry.clone());
        }
        Ok(entry)
    }

    fn push_dir(&mut self, entry: TraversalEntry) {
        self.stack.push(DirFrame {
            entry,
            children: None,
            opened: false,
        });
    }

    fn excluded_by_device(&self, meta: &fs::Metadata) -> bool {
        self.one_file_system && crosses_filesystem(self.root_device, device_id(meta))
    }
}

/// Single-filesystem guard: an entry on another device is pruned silently.
#[must_use]
pub fn crosses_filesystem(root_device: u64, entry_device: u64) -> bool {
    entry_device != root_device
}

fn build_entry(path: PathBuf, meta: &fs::Metadata, is_root: bool) -> TraversalEntry {
    let file_type = meta.file_type();
    let kind = if file_type.is_dir() {
        EntryKind::PreDir
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    };

    TraversalEntry {
        access_path: path.clone(),
        path,
        kind,
        size_bytes: meta.len(),
        nlink: link_count(meta),
        device: device_id(meta),
        is_root,
    }
}

fn device_id(meta: &fs::Metadata) -> u64 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        meta.dev()
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        0
    }
}

fn link_count(meta: &fs::Metadata) -> u64 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        meta.nlink()
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        1
    }
}
