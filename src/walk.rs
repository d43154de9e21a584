//! Depth-first directory traversal.
//!
//! [`walk`] visits a tree in pre-order: a directory is reported before
//! anything inside it. Siblings come in file-name order.
//!
//! ## Snapshot, then transform
//!
//! The tree is listed completely before the transform runs on the first file.
//! Transforms create (`photo.png`, `photo_resized.jpg`) and rename files in
//! the directories being walked; with a lazy listing those new names could be
//! picked up again in the same pass or entries could be skipped. Working from
//! a snapshot, every file present at the start is visited exactly once and
//! nothing created during the pass is visited at all.
//!
//! ## What is visited
//!
//! - The root itself, which may be a single regular file.
//! - Regular files and directories below it.
//! - Not hidden entries (names starting with `.`) below the root, and not the
//!   contents of hidden directories.
//! - Not symbolic links, which are neither followed nor transformed.

use crate::classify::{FileEntry, ensure_valid_root};
use crate::error::{Error, Result};
use crate::transform::{Action, FileTransform};
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Progress notification emitted while walking.
#[derive(Debug)]
pub enum WalkEvent<'a> {
    /// About to visit the contents of a directory.
    Directory { path: &'a Path, depth: usize },
    /// A file was visited; `action` is what the transform did, if anything.
    File {
        path: &'a Path,
        depth: usize,
        action: Option<&'a Action>,
    },
}

/// Counts for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub directories: usize,
    pub files: usize,
    /// Files the transform acted on.
    pub changed: usize,
}

/// One entry of a tree snapshot.
#[derive(Debug)]
pub struct SnapshotEntry {
    pub depth: usize,
    pub entry: FileEntry,
}

/// List the tree under `root` in pre-order.
///
/// `root` must be an existing file or directory.
pub fn snapshot(root: &Path) -> Result<Vec<SnapshotEntry>> {
    ensure_valid_root(root)?;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    let mut entries = Vec::new();
    for item in walker {
        let dir_entry = item.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            Error::Filesystem {
                path,
                source: io::Error::from(err),
            }
        })?;

        let file_type = dir_entry.file_type();
        let depth = dir_entry.depth();
        if file_type.is_dir() {
            entries.push(SnapshotEntry {
                depth,
                entry: FileEntry::new(dir_entry.into_path(), true),
            });
        } else if file_type.is_file() {
            entries.push(SnapshotEntry {
                depth,
                entry: FileEntry::new(dir_entry.into_path(), false),
            });
        } else {
            debug!(path = %dir_entry.path().display(), "skipping non-regular file");
        }
    }
    Ok(entries)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Walk `root` and apply `transform` to every file.
///
/// Stops at the first error; files after it are not visited.
pub fn walk<T>(
    root: &Path,
    transform: &T,
    mut on_event: impl FnMut(WalkEvent<'_>),
) -> Result<WalkSummary>
where
    T: FileTransform + ?Sized,
{
    let mut summary = WalkSummary::default();

    for SnapshotEntry { depth, entry } in snapshot(root)? {
        if entry.is_dir() {
            debug!(path = %entry.path().display(), depth, "entering directory");
            summary.directories += 1;
            on_event(WalkEvent::Directory {
                path: entry.path(),
                depth,
            });
            continue;
        }

        debug!(path = %entry.path().display(), depth, transform = %transform.kind(), "visiting file");
        summary.files += 1;
        let action = transform.apply(&entry)?;
        if action.is_some() {
            summary.changed += 1;
        }
        on_event(WalkEvent::File {
            path: entry.path(),
            depth,
            action: action.as_ref(),
        });
    }

    Ok(summary)
}
