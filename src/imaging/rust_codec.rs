//! Pure Rust codec built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader`, format guessed from content |
//! | Encode | `DynamicImage::write_to` into a sibling temp file, renamed over the target |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//!
//! Decoding sniffs the format from the file content rather than trusting the
//! extension, since conversion picks its inputs by content too.
//!
//! Encoding never truncates the target: the image is written to a temp file
//! in the same directory and renamed into place, so an in-place encode that
//! fails leaves the previous file intact.

use super::codec::{CodecError, ImageCodec};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::{self, Permissions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Codec using the `image` crate's pure Rust decoders and encoders.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CodecError + '_ {
    move |source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Permissions the encoded file should end up with.
///
/// Temp files are created owner-only; a replaced file keeps its own mode and a
/// new one gets the usual `rw-r--r--`.
fn target_permissions(path: &Path) -> Option<Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

impl ImageCodec for RustCodec {
    fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError> {
        ImageReader::open(path)
            .map_err(io_error(path))?
            .with_guessed_format()
            .map_err(io_error(path))?
            .decode()
            .map_err(|e| {
                CodecError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
            })
    }

    fn encode(
        &self,
        image: &DynamicImage,
        path: &Path,
        format: ImageFormat,
    ) -> Result<(), CodecError> {
        // JPEG has no alpha channel; flatten instead of failing
        let flattened;
        let image = if format == ImageFormat::Jpeg && image.color().has_alpha() {
            flattened = DynamicImage::ImageRgb8(image.to_rgb8());
            &flattened
        } else {
            image
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir).map_err(io_error(path))?;
        if let Some(permissions) = target_permissions(path) {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(io_error(path))?;
        }
        let mut writer = BufWriter::new(temp);
        image.write_to(&mut writer, format).map_err(|e| {
            CodecError::ProcessingFailed(format!(
                "Failed to encode {} as {:?}: {}",
                path.display(),
                format,
                e
            ))
        })?;
        writer.flush().map_err(io_error(path))?;
        let temp = writer
            .into_inner()
            .map_err(|e| io_error(path)(e.into_error()))?;
        temp.persist(path).map_err(|e| io_error(path)(e.error))?;
        Ok(())
    }

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        image.resize_exact(width, height, FilterType::Lanczos3)
    }

    fn supports_alpha(&self, format: ImageFormat) -> bool {
        matches!(
            format,
            ImageFormat::Png | ImageFormat::Tiff | ImageFormat::WebP
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{write_jpeg, write_png};
    use tempfile::TempDir;

    #[test]
    fn decode_synthetic_jpeg() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        write_jpeg(&path, 200, 150);

        let img = RustCodec::new().decode(&path).unwrap();
        assert_eq!((img.width(), img.height()), (200, 150));
    }

    #[test]
    fn decode_ignores_misleading_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("actually-a-jpeg.png");
        write_jpeg(&path, 20, 10);

        let img = RustCodec::new().decode(&path).unwrap();
        assert_eq!((img.width(), img.height()), (20, 10));
    }

    #[test]
    fn decode_nonexistent_file_is_io_error() {
        let result = RustCodec::new().decode(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(CodecError::Io { .. })));
    }

    #[test]
    fn decode_garbage_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("garbage.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();
        assert!(matches!(
            RustCodec::new().decode(&path),
            Err(CodecError::ProcessingFailed(_))
        ));
    }

    #[test]
    fn encode_png_round_trips_dimensions() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        write_jpeg(&source, 64, 48);

        let codec = RustCodec::new();
        let img = codec.decode(&source).unwrap();
        let output = tmp.path().join("out.png");
        codec.encode(&img, &output, ImageFormat::Png).unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (64, 48));
    }

    #[test]
    fn encode_rgba_as_jpeg_flattens() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("alpha.png");
        write_png(&source, 16, 16);

        let codec = RustCodec::new();
        let img = codec.decode(&source).unwrap();
        assert!(img.color().has_alpha());
        let output = tmp.path().join("flat.jpg");
        codec.encode(&img, &output, ImageFormat::Jpeg).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn encode_in_place_replaces_file_without_leftovers() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pic.png");
        write_png(&path, 10, 10);

        let codec = RustCodec::new();
        let img = codec.decode(&path).unwrap().resize_exact(4, 4, FilterType::Nearest);
        codec.encode(&img, &path, ImageFormat::Png).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (4, 4));
        assert_eq!(crate::test_helpers::file_names(tmp.path()), vec!["pic.png"]);
    }

    #[test]
    fn failed_encode_leaves_existing_target_intact() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pic.png");
        write_png(&path, 10, 10);
        let before = std::fs::read(&path).unwrap();

        // GIF support is not compiled in, so encoding fails after the temp
        // file was created
        let img = DynamicImage::new_rgb8(3, 3);
        let result = RustCodec::new().encode(&img, &path, ImageFormat::Gif);

        assert!(matches!(result, Err(CodecError::ProcessingFailed(_))));
        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert_eq!(crate::test_helpers::file_names(tmp.path()), vec!["pic.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn encode_keeps_mode_of_replaced_file_and_defaults_new_ones() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let existing = tmp.path().join("existing.png");
        write_png(&existing, 4, 4);
        fs::set_permissions(&existing, Permissions::from_mode(0o640)).unwrap();

        let codec = RustCodec::new();
        let img = DynamicImage::new_rgb8(2, 2);
        codec.encode(&img, &existing, ImageFormat::Png).unwrap();
        let fresh = tmp.path().join("fresh.png");
        codec.encode(&img, &fresh, ImageFormat::Png).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&existing), 0o640);
        assert_eq!(mode(&fresh), 0o644);
    }

    #[test]
    fn encode_into_missing_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let img = DynamicImage::new_rgb8(2, 2);
        let target = tmp.path().join("no/such.png");
        let result = RustCodec::new().encode(&img, &target, ImageFormat::Png);
        assert!(matches!(result, Err(CodecError::Io { .. })));
    }

    #[test]
    fn resize_is_exact() {
        let img = DynamicImage::new_rgb8(100, 50);
        let resized = RustCodec::new().resize(&img, 30, 40);
        assert_eq!((resized.width(), resized.height()), (30, 40));
    }

    #[test]
    fn alpha_support() {
        let codec = RustCodec::new();
        assert!(codec.supports_alpha(ImageFormat::Png));
        assert!(codec.supports_alpha(ImageFormat::WebP));
        assert!(!codec.supports_alpha(ImageFormat::Jpeg));
    }
}
