//! JPEG → PNG conversion.

use super::{Action, FileTransform, TransformKind, split_path};
use crate::classify::{EntryKind, FileEntry, classify};
use crate::error::{Error, Result};
use crate::imaging::{ImageCodec, convert_to_png};
use crate::naming::{NamingRules, unique_target};
use std::ffi::OsStr;
use std::fs;
use tracing::{info, warn};

/// Converts sniffed JPEG files to PNG next to the original.
///
/// The PNG is named after the source stem, or after the sanitized stem when
/// built with [`with_sanitized_names`](Self::with_sanitized_names). An existing
/// file is never overwritten: a taken name gets `_2`, `_3`, ... appended.
/// Unless originals are kept, the source is deleted once the PNG has been
/// written; a failed decode or encode leaves it untouched.
pub struct ConvertTransform<'a, C: ImageCodec> {
    codec: &'a C,
    keep_originals: bool,
    naming: Option<NamingRules>,
}

impl<'a, C: ImageCodec> ConvertTransform<'a, C> {
    pub fn new(codec: &'a C, keep_originals: bool) -> Self {
        Self {
            codec,
            keep_originals,
            naming: None,
        }
    }

    /// Name converted files after their sanitized stem.
    pub fn with_sanitized_names(mut self, rules: NamingRules) -> Self {
        self.naming = Some(rules);
        self
    }
}

impl<C: ImageCodec> FileTransform for ConvertTransform<'_, C> {
    fn kind(&self) -> TransformKind {
        TransformKind::Convert
    }

    fn apply(&self, entry: &FileEntry) -> Result<Option<Action>> {
        if classify(entry)? != EntryKind::JpegFile {
            return Ok(None);
        }

        let source = entry.path();
        let (dir, stem, _) = split_path(source);
        let (stem, separator) = match &self.naming {
            Some(rules) => (rules.sanitize(&stem), rules.replacement),
            None => (stem, NamingRules::default().replacement),
        };
        let target = unique_target(dir, &stem, Some("png"), separator, source);
        if target.file_stem() != Some(OsStr::new(&stem)) {
            warn!(source = %source.display(), target = %target.display(), "PNG name taken");
        }

        convert_to_png(self.codec, source, &target)?;
        info!(source = %source.display(), target = %target.display(), "converted");

        // A JFIF file already named like its target was re-encoded in place
        let removed_original = !self.keep_originals && target != source;
        if removed_original {
            fs::remove_file(source).map_err(Error::fs(source))?;
            info!(path = %source.display(), "removed original");
        }

        Ok(Some(Action::Converted {
            target,
            removed_original,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustCodec;
    use crate::imaging::codec::tests::{MockCodec, RecordedOp};
    use crate::test_helpers::{file_names, write_jpeg, write_text};
    use tempfile::TempDir;

    #[test]
    fn converts_and_deletes_original() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("photo.JPG");
        write_jpeg(&source, 24, 12);

        let codec = RustCodec::new();
        let action = ConvertTransform::new(&codec, false)
            .apply(&FileEntry::new(&source, false))
            .unwrap();

        let target = tmp.path().join("photo.png");
        assert_eq!(
            action,
            Some(Action::Converted {
                target: target.clone(),
                removed_original: true
            })
        );
        assert_eq!(file_names(tmp.path()), vec!["photo.png"]);
        assert_eq!(image::image_dimensions(&target).unwrap(), (24, 12));
    }

    #[test]
    fn keeps_original_when_asked() {
        let tmp = TempDir::new().unwrap();
        write_jpeg(&tmp.path().join("photo.jpg"), 8, 8);

        let codec = RustCodec::new();
        let entry = FileEntry::new(tmp.path().join("photo.jpg"), false);
        ConvertTransform::new(&codec, true).apply(&entry).unwrap();

        assert_eq!(file_names(tmp.path()), vec!["photo.jpg", "photo.png"]);
    }

    #[test]
    fn sanitized_names_variant() {
        let tmp = TempDir::new().unwrap();
        write_jpeg(&tmp.path().join("9 lives(2).jpeg"), 8, 8);

        let codec = RustCodec::new();
        let entry = FileEntry::new(tmp.path().join("9 lives(2).jpeg"), false);
        ConvertTransform::new(&codec, false)
            .with_sanitized_names(NamingRules::default())
            .apply(&entry)
            .unwrap();

        assert_eq!(file_names(tmp.path()), vec!["spr_ lives_2.png"]);
    }

    #[test]
    fn non_jpeg_untouched() {
        let tmp = TempDir::new().unwrap();
        let notes = tmp.path().join("notes.txt");
        write_text(&notes, "not a picture\n");

        let codec = MockCodec::new(8, 8);
        let action = ConvertTransform::new(&codec, false)
            .apply(&FileEntry::new(&notes, false))
            .unwrap();

        assert_eq!(action, None);
        assert!(codec.get_operations().is_empty());
        assert_eq!(std::fs::read_to_string(&notes).unwrap(), "not a picture\n");
    }

    #[test]
    fn failed_encode_keeps_original() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("photo.jpg");
        write_jpeg(&source, 8, 8);

        let codec = MockCodec::failing_encoder();
        let result = ConvertTransform::new(&codec, false).apply(&FileEntry::new(&source, false));

        assert!(matches!(result, Err(Error::Codec(_))));
        assert_eq!(file_names(tmp.path()), vec!["photo.jpg"]);
        assert!(matches!(
            codec.get_operations().last(),
            Some(RecordedOp::Encode { .. })
        ));
    }

    #[test]
    fn jpg_and_jpeg_with_same_stem_both_survive() {
        let tmp = TempDir::new().unwrap();
        write_jpeg(&tmp.path().join("photo.jpeg"), 8, 8);
        write_jpeg(&tmp.path().join("photo.jpg"), 12, 12);

        let codec = RustCodec::new();
        let convert = ConvertTransform::new(&codec, false);
        for name in ["photo.jpeg", "photo.jpg"] {
            convert
                .apply(&FileEntry::new(tmp.path().join(name), false))
                .unwrap();
        }

        assert_eq!(file_names(tmp.path()), vec!["photo.png", "photo_2.png"]);
        assert_eq!(
            image::image_dimensions(tmp.path().join("photo.png")).unwrap(),
            (8, 8)
        );
        assert_eq!(
            image::image_dimensions(tmp.path().join("photo_2.png")).unwrap(),
            (12, 12)
        );
    }

    #[test]
    fn sanitized_names_that_collide_both_survive() {
        let tmp = TempDir::new().unwrap();
        write_jpeg(&tmp.path().join("a(1).jpg"), 8, 8);
        write_jpeg(&tmp.path().join("a_1.jpg"), 8, 8);

        let codec = RustCodec::new();
        let convert =
            ConvertTransform::new(&codec, false).with_sanitized_names(NamingRules::default());
        for name in ["a(1).jpg", "a_1.jpg"] {
            convert
                .apply(&FileEntry::new(tmp.path().join(name), false))
                .unwrap();
        }

        assert_eq!(file_names(tmp.path()), vec!["spr_a_1.png", "spr_a_1_2.png"]);
    }

    #[test]
    fn existing_png_is_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        write_jpeg(&tmp.path().join("cover.jpg"), 8, 8);
        write_text(&tmp.path().join("cover.png"), "someone else's file");

        let codec = RustCodec::new();
        let action = ConvertTransform::new(&codec, true)
            .apply(&FileEntry::new(tmp.path().join("cover.jpg"), false))
            .unwrap();

        assert_eq!(
            action,
            Some(Action::Converted {
                target: tmp.path().join("cover_2.png"),
                removed_original: false
            })
        );
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("cover.png")).unwrap(),
            "someone else's file"
        );
    }

    #[test]
    fn jfif_already_named_png_is_not_deleted() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("odd.png");
        write_jpeg(&source, 10, 6);

        let codec = RustCodec::new();
        let action = ConvertTransform::new(&codec, false)
            .apply(&FileEntry::new(&source, false))
            .unwrap();

        assert!(matches!(
            action,
            Some(Action::Converted {
                removed_original: false,
                ..
            })
        ));
        assert_eq!(file_names(tmp.path()), vec!["odd.png"]);
        // Now a real PNG
        assert_eq!(
            image::guess_format(&std::fs::read(&source).unwrap()).unwrap(),
            image::ImageFormat::Png
        );
    }
}
