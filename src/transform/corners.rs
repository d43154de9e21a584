//! Rounding image corners.

use super::{Action, FileTransform, TransformKind};
use crate::classify::{FileEntry, image_format};
use crate::error::Result;
use crate::imaging::{CornerRadius, ImageCodec, round_corners};
use tracing::info;

/// Makes the corners of every image file (by extension) transparent, in place.
///
/// Fails on the first image whose format has no alpha channel (JPEG).
pub struct RoundCornerTransform<'a, C: ImageCodec> {
    codec: &'a C,
    radius: CornerRadius,
}

impl<'a, C: ImageCodec> RoundCornerTransform<'a, C> {
    pub fn new(codec: &'a C, radius: CornerRadius) -> Self {
        Self { codec, radius }
    }
}

impl<C: ImageCodec> FileTransform for RoundCornerTransform<'_, C> {
    fn kind(&self) -> TransformKind {
        TransformKind::RoundCorners
    }

    fn apply(&self, entry: &FileEntry) -> Result<Option<Action>> {
        let path = entry.path();
        if entry.is_dir() || image_format(path).is_none() {
            return Ok(None);
        }

        round_corners(self.codec, path, self.radius)?;
        info!(path = %path.display(), radius = self.radius.get(), "rounded corners");
        Ok(Some(Action::CornersRounded))
    }
}
