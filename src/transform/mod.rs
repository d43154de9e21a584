//! Per-file transform strategies.
//!
//! Each transform looks at one [`FileEntry`] and either leaves it alone
//! (`Ok(None)`) or performs its filesystem side effects and reports them as an
//! [`Action`]. Transforms never recurse; the [walker](crate::walk) feeds them
//! files one at a time.
//!
//! | Transform | Acts on | Effect |
//! |---|---|---|
//! | [`ConvertTransform`] | files whose first line contains `JFIF` | writes `<stem>.png`, optionally deletes the source |
//! | [`RenameTransform`] | every file whose name is not sanitized | renames within the directory |
//! | [`ResizeTransform`] | image files by extension | overwrites, or writes `<stem><suffix>.<ext>` |
//! | [`RoundCornerTransform`] | image files by extension | clears the corners to transparent, in place |

mod convert;
mod corners;
mod rename;
mod resize;

pub use convert::ConvertTransform;
pub use corners::RoundCornerTransform;
pub use rename::RenameTransform;
pub use resize::{DEFAULT_RESIZE_SUFFIX, ResizeTransform};

use crate::classify::FileEntry;
use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// The transforms a run can perform, in the order a run performs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Convert,
    Rename,
    Resize,
    RoundCorners,
}

impl TransformKind {
    pub const ALL: [TransformKind; 4] = [
        TransformKind::Convert,
        TransformKind::Rename,
        TransformKind::Resize,
        TransformKind::RoundCorners,
    ];
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransformKind::Convert => "convert",
            TransformKind::Rename => "rename",
            TransformKind::Resize => "resize",
            TransformKind::RoundCorners => "round-corners",
        })
    }
}

/// Side effect performed on one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A PNG was written to `target`.
    Converted {
        target: PathBuf,
        removed_original: bool,
    },
    Renamed { target: PathBuf },
    /// A resized image was written to `target` (the source itself when not
    /// keeping originals).
    Resized {
        target: PathBuf,
        width: u32,
        height: u32,
    },
    CornersRounded,
}

/// Strategy applied to each file of a traversal.
pub trait FileTransform {
    fn kind(&self) -> TransformKind;

    /// Apply the transform to one file.
    fn apply(&self, entry: &FileEntry) -> Result<Option<Action>>;
}

/// Split a file path into its directory, lossy stem and lossy extension.
fn split_path(path: &Path) -> (&Path, String, Option<String>) {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned());
    (dir, stem, extension)
}
