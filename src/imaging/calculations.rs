//! Pure calculation functions for image dimensions and corner masks.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::ResizeSpec;

/// Calculate the output dimensions of a resize.
///
/// Ratios truncate toward zero. A single fixed side keeps the aspect ratio
/// using integer division, so `1000x667` at width `500` gives height
/// `667 * 500 / 1000 = 333`, not the rounded `334`.
///
/// A zero-sized original yields a zero for the derived side; callers reject
/// zero-sized results.
pub fn calculate_resize_dimensions(original: (u32, u32), spec: &ResizeSpec) -> (u32, u32) {
    let (w, h) = original;
    match *spec {
        ResizeSpec::Ratio(ratio) => (
            (ratio * w as f64).floor() as u32,
            (ratio * h as f64).floor() as u32,
        ),
        ResizeSpec::Width(width) => (width, scale_side(h, width, w)),
        ResizeSpec::Height(height) => (scale_side(w, height, h), height),
        ResizeSpec::Exact { width, height } => (width, height),
    }
}

/// `side * numerator / denominator` in 64-bit integer arithmetic.
fn scale_side(side: u32, numerator: u32, denominator: u32) -> u32 {
    (side as u64 * numerator as u64)
        .checked_div(denominator as u64)
        .map(|v| v.min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}

/// Number of pixels to clear from the edge on each of the `radius` rows of a
/// corner, outermost row first.
///
/// Row 0 clears `radius` pixels; row `y >= 1` clears
/// `round(r - sqrt(r² - (r - y)²)) + 1`, rounding half to even.
pub fn corner_lengths(radius: u32) -> Vec<u32> {
    let r = radius as f64;
    std::iter::once(radius)
        .chain((1..radius).map(|y| {
            let dy = r - y as f64;
            (r - (r * r - dy * dy).sqrt()).round_ties_even() as u32 + 1
        }))
        .collect()
}

/// Coordinates of every pixel cleared by rounding all four corners.
///
/// The top corners use [`corner_lengths`] top-down, the bottom corners use it
/// bottom-up. Coordinates outside the image are dropped, so radii larger than
/// the image are safe. Pixels may repeat when corners overlap.
pub fn corner_mask(width: u32, height: u32, radius: u32) -> Vec<(u32, u32)> {
    let lengths = corner_lengths(radius);
    let mut pixels = Vec::new();

    let mut clear_row = |y: u32, len: u32| {
        for x in 0..len.min(width) {
            pixels.push((x, y));
            pixels.push((width - 1 - x, y));
        }
    };

    for (y, &len) in (0..height).zip(lengths.iter()) {
        clear_row(y, len);
    }

    for (offset, &len) in (0..radius).zip(lengths.iter().rev()) {
        // Row `height - radius + offset`, skipped while above the image
        if let Some(y) = (height + offset).checked_sub(radius) {
            clear_row(y, len);
        }
    }

    pixels
}
