//! High-level image operations.
//!
//! These functions combine calculations with codec execution. They take
//! validated parameters, compute the pixel work, and call the codec. Deciding
//! *which* files get these operations is the job of the transforms.

use super::calculations::{calculate_resize_dimensions, corner_mask};
use super::codec::ImageCodec;
use super::params::{CornerRadius, ResizeSpec};
use crate::classify::image_format;
use crate::error::{Error, Result};
use image::{DynamicImage, ImageFormat, Rgba};
use std::path::Path;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Re-encode `source` as a PNG at `target`.
///
/// Returns the image dimensions.
pub fn convert_to_png(codec: &impl ImageCodec, source: &Path, target: &Path) -> Result<(u32, u32)> {
    let img = codec.decode(source)?;
    codec.encode(&img, target, ImageFormat::Png)?;
    Ok((img.width(), img.height()))
}

/// Resize `source` according to `spec` and write the result to `output`.
///
/// `output` keeps the format of `source`. Returns the new dimensions.
pub fn resize_image(
    codec: &impl ImageCodec,
    source: &Path,
    output: &Path,
    spec: &ResizeSpec,
) -> Result<(u32, u32)> {
    let format = require_image_format(source)?;
    let img = codec.decode(source)?;
    let (width, height) = calculate_resize_dimensions((img.width(), img.height()), spec);
    if width == 0 || height == 0 {
        return Err(Error::invalid_argument(format!(
            "resizing {}x{} image '{}' gives an empty {width}x{height} image",
            img.width(),
            img.height(),
            source.display()
        )));
    }
    let resized = codec.resize(&img, width, height);
    codec.encode(&resized, output, format)?;
    Ok((width, height))
}

/// Make the four corners of the image at `path` transparent, in place.
///
/// Fails with [`Error::UnsupportedFormat`] before decoding when the file's
/// format cannot carry alpha.
pub fn round_corners(codec: &impl ImageCodec, path: &Path, radius: CornerRadius) -> Result<()> {
    let format = require_image_format(path)?;
    if !codec.supports_alpha(format) {
        return Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
            format: format_name(format),
        });
    }

    let mut rgba = codec.decode(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    for (x, y) in corner_mask(width, height, radius.get()) {
        rgba.put_pixel(x, y, TRANSPARENT);
    }
    codec.encode(&DynamicImage::ImageRgba8(rgba), path, format)?;
    Ok(())
}

fn require_image_format(path: &Path) -> Result<ImageFormat> {
    image_format(path).ok_or_else(|| {
        Error::invalid_argument(format!("not an image file: '{}'", path.display()))
    })
}

fn format_name(format: ImageFormat) -> String {
    format
        .extensions_str()
        .first()
        .map(|ext| ext.to_uppercase())
        .unwrap_or_else(|| format!("{format:?}"))
}
