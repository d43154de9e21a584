//! Image processing: pure Rust on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with content-guessed format |
//! | **Encode** | `DynamicImage::write_to` (PNG, JPEG, TIFF, WebP) |
//! | **Resize** | `resize_exact` + `Lanczos3` |
//! | **Round corners** | `RgbaImage::put_pixel` over a computed mask |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and mask math (unit testable)
//! - **Parameters**: Validated descriptions of resize and corner operations
//! - **Codec**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Operations**: High-level functions combining calculations + codec

mod calculations;
pub mod codec;
pub mod operations;
mod params;
pub mod rust_codec;

pub use calculations::{calculate_resize_dimensions, corner_lengths, corner_mask};
pub use codec::{CodecError, ImageCodec};
pub use operations::{convert_to_png, resize_image, round_corners};
pub use params::{CornerRadius, ResizeSpec};
pub use rust_codec::RustCodec;
