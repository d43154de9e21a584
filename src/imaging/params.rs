//! Parameter types for image operations.
//!
//! These describe *what* to do to an image, independent of the codec that
//! does the pixel work. Both are validated on construction, so an operation
//! holding one never has to re-check it.
//!
//! - [`ResizeSpec`]: how to derive the new dimensions from the original ones.
//! - [`CornerRadius`]: radius of the transparent rounded corners, always > 0.

use crate::error::{Error, Result};

/// Target size of a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeSpec {
    /// Scale both sides by a factor.
    Ratio(f64),
    /// Fixed width, height follows the aspect ratio.
    Width(u32),
    /// Fixed height, width follows the aspect ratio.
    Height(u32),
    /// Fixed width and height.
    Exact { width: u32, height: u32 },
}

impl ResizeSpec {
    /// Build a spec from optional parts.
    ///
    /// Exactly one of `ratio`, `width`, `height` or `width + height` must be
    /// given.
    pub fn from_parts(ratio: Option<f64>, width: Option<u32>, height: Option<u32>) -> Result<Self> {
        if width == Some(0) || height == Some(0) {
            return Err(Error::invalid_argument("resize width and height must be > 0"));
        }
        match (ratio, width, height) {
            (Some(r), None, None) if r.is_finite() && r > 0.0 => Ok(Self::Ratio(r)),
            (Some(r), None, None) => Err(Error::invalid_argument(format!(
                "resize ratio must be a positive number, got {r}"
            ))),
            (Some(_), _, _) => Err(Error::invalid_argument(
                "resize ratio cannot be combined with width or height",
            )),
            (None, Some(width), Some(height)) => Ok(Self::Exact { width, height }),
            (None, Some(width), None) => Ok(Self::Width(width)),
            (None, None, Some(height)) => Ok(Self::Height(height)),
            (None, None, None) => Err(Error::invalid_argument(
                "resize needs a ratio, a width or a height",
            )),
        }
    }
}

/// Radius in pixels of the rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerRadius(u32);

impl CornerRadius {
    pub fn new(radius: u32) -> Result<Self> {
        if radius == 0 {
            return Err(Error::invalid_argument("corner radius must be > 0"));
        }
        Ok(Self(radius))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}
