//! Resizing image files.

use super::{Action, FileTransform, TransformKind, split_path};
use crate::classify::{FileEntry, image_format};
use crate::error::Result;
use crate::imaging::{ImageCodec, ResizeSpec, resize_image};
use crate::naming::target_file_name;
use tracing::{debug, info};

/// Default suffix for resized copies when originals are kept.
pub const DEFAULT_RESIZE_SUFFIX: &str = "_resized";

/// Resizes every image file (by extension).
///
/// Without `keep_originals` the image is overwritten in place. With it, the
/// result goes to `<stem><suffix>.<ext>` and files whose stem already ends in
/// the suffix are skipped, so a second run does not shrink its own output.
pub struct ResizeTransform<'a, C: ImageCodec> {
    codec: &'a C,
    spec: ResizeSpec,
    keep_originals: bool,
    suffix: String,
}

impl<'a, C: ImageCodec> ResizeTransform<'a, C> {
    pub fn new(codec: &'a C, spec: ResizeSpec, keep_originals: bool) -> Self {
        Self {
            codec,
            spec,
            keep_originals,
            suffix: DEFAULT_RESIZE_SUFFIX.to_string(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl<C: ImageCodec> FileTransform for ResizeTransform<'_, C> {
    fn kind(&self) -> TransformKind {
        TransformKind::Resize
    }

    fn apply(&self, entry: &FileEntry) -> Result<Option<Action>> {
        let source = entry.path();
        if entry.is_dir() || image_format(source).is_none() {
            return Ok(None);
        }

        let output = if self.keep_originals {
            let (dir, stem, extension) = split_path(source);
            if stem.ends_with(&self.suffix) {
                debug!(path = %source.display(), "already a resized copy");
                return Ok(None);
            }
            dir.join(target_file_name(
                &format!("{stem}{}", self.suffix),
                extension.as_deref(),
            ))
        } else {
            source.to_path_buf()
        };

        let (width, height) = resize_image(self.codec, source, &output, &self.spec)?;
        info!(source = %source.display(), output = %output.display(), width, height, "resized");
        Ok(Some(Action::Resized {
            target: output,
            width,
            height,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::imaging::RustCodec;
    use crate::imaging::codec::tests::{MockCodec, RecordedOp};
    use crate::test_helpers::{file_names, write_jpeg, write_png, write_text};
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn overwrites_in_place_by_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.png");
        write_png(&path, 100, 60);

        let codec = RustCodec::new();
        let action = ResizeTransform::new(&codec, ResizeSpec::Ratio(0.5), false)
            .apply(&FileEntry::new(&path, false))
            .unwrap();

        assert_eq!(
            action,
            Some(Action::Resized {
                target: path.clone(),
                width: 50,
                height: 30
            })
        );
        assert_eq!(image::image_dimensions(&path).unwrap(), (50, 30));
        assert_eq!(file_names(tmp.path()), vec!["big.png"]);
    }

    #[test]
    fn keep_originals_writes_suffixed_sibling() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        write_jpeg(&path, 80, 40);

        let codec = RustCodec::new();
        ResizeTransform::new(&codec, ResizeSpec::Width(20), true)
            .apply(&FileEntry::new(&path, false))
            .unwrap();

        assert_eq!(file_names(tmp.path()), vec!["photo.jpg", "photo_resized.jpg"]);
        assert_eq!(image::image_dimensions(&path).unwrap(), (80, 40));
        assert_eq!(
            image::image_dimensions(tmp.path().join("photo_resized.jpg")).unwrap(),
            (20, 10)
        );
    }

    #[test]
    fn custom_suffix() {
        let codec = MockCodec::new(10, 10);
        let action = ResizeTransform::new(&codec, ResizeSpec::Height(5), true)
            .with_suffix("_small")
            .apply(&FileEntry::new("/pics/a.png", false))
            .unwrap();

        assert_eq!(
            action,
            Some(Action::Resized {
                target: Path::new("/pics/a_small.png").to_path_buf(),
                width: 5,
                height: 5
            })
        );
    }

    #[test]
    fn earlier_copies_skipped_when_keeping() {
        let codec = MockCodec::new(10, 10);
        let action = ResizeTransform::new(&codec, ResizeSpec::Ratio(0.5), true)
            .apply(&FileEntry::new("/pics/a_resized.png", false))
            .unwrap();

        assert_eq!(action, None);
        assert!(codec.get_operations().is_empty());
    }

    #[test]
    fn non_images_untouched() {
        let tmp = TempDir::new().unwrap();
        let notes = tmp.path().join("notes.txt");
        write_text(&notes, "hello");

        let codec = MockCodec::new(10, 10);
        let action = ResizeTransform::new(&codec, ResizeSpec::Ratio(0.5), false)
            .apply(&FileEntry::new(&notes, false))
            .unwrap();

        assert_eq!(action, None);
        assert!(codec.get_operations().is_empty());
    }

    #[test]
    fn exact_dimensions() {
        let codec = MockCodec::new(10, 10);
        ResizeTransform::new(
            &codec,
            ResizeSpec::Exact {
                width: 7,
                height: 3,
            },
            false,
        )
        .apply(&FileEntry::new("/pics/a.png", false))
        .unwrap();

        assert!(codec.get_operations().contains(&RecordedOp::Resize {
            width: 7,
            height: 3
        }));
    }

    #[test]
    fn empty_result_is_invalid_argument() {
        let codec = MockCodec::new(1, 1);
        let result = ResizeTransform::new(&codec, ResizeSpec::Ratio(0.5), false)
            .apply(&FileEntry::new("/pics/dot.png", false));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
