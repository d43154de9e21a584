//! Renaming files to their sanitized names.

use super::{Action, FileTransform, TransformKind, split_path};
use crate::classify::FileEntry;
use crate::error::{Error, Result};
use crate::naming::{NamingRules, target_file_name, unique_target};
use std::ffi::OsStr;
use std::fs;
use tracing::{info, warn};

/// Renames every file whose name is not already sanitized.
///
/// The extension is preserved. If another file already holds the sanitized
/// name, a numeric suffix is appended rather than overwriting it.
pub struct RenameTransform {
    rules: NamingRules,
}

impl RenameTransform {
    pub fn new(rules: NamingRules) -> Self {
        Self { rules }
    }
}

impl FileTransform for RenameTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Rename
    }

    fn apply(&self, entry: &FileEntry) -> Result<Option<Action>> {
        if entry.is_dir() {
            return Ok(None);
        }

        let source = entry.path();
        let (dir, stem, extension) = split_path(source);
        let sanitized = self.rules.sanitize(&stem);
        if target_file_name(&sanitized, extension.as_deref()) == entry.file_name() {
            return Ok(None);
        }

        let target = unique_target(
            dir,
            &sanitized,
            extension.as_deref(),
            self.rules.replacement,
            source,
        );
        if target == source {
            return Ok(None);
        }
        if target.file_stem() != Some(OsStr::new(&sanitized)) {
            warn!(source = %source.display(), target = %target.display(), "sanitized name taken");
        }

        fs::rename(source, &target).map_err(Error::fs(source))?;
        info!(source = %source.display(), target = %target.display(), "renamed");
        Ok(Some(Action::Renamed { target }))
    }
}
