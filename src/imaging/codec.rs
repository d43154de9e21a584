//! Image codec trait and shared error type.
//!
//! The [`ImageCodec`] trait is the seam between the transforms, which decide
//! what should happen to a file, and the pixel work itself. Pixel access and
//! dimensions come from [`DynamicImage`] directly.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_codec::RustCodec), built on the `image` crate.

use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Decode, encode and resize primitives.
pub trait ImageCodec {
    /// Read and decode the image at `path`.
    fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError>;

    /// Encode `image` as `format` and write it to `path`.
    ///
    /// Nothing is written unless encoding succeeded.
    fn encode(&self, image: &DynamicImage, path: &Path, format: ImageFormat)
    -> Result<(), CodecError>;

    /// Resample `image` to exactly `width` x `height`.
    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage;

    /// Whether `format` can store an alpha channel.
    fn supports_alpha(&self, format: ImageFormat) -> bool;
}
