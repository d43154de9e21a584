//! Shared test utilities: synthetic image fixtures and directory listings.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_jpeg(&tmp.path().join("a/b/c.jpg"), 40, 30);
//! write_text(&tmp.path().join("notes.txt"), "hello");
//!
//! assert_eq!(file_names(tmp.path()), vec!["a", "notes.txt"]);
//! ```

use image::{ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;

// =========================================================================
// Fixture writers (parent directories are created as needed)
// =========================================================================

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
}

/// Write a small gradient JPEG. The `image` encoder emits a JFIF APP0
/// segment, so the file is sniffed as JPEG.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a fully opaque RGBA PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    ensure_parent(path);
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

pub fn write_text(path: &Path, content: &str) {
    ensure_parent(path);
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Listings
// =========================================================================

/// Sorted names of the entries directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
