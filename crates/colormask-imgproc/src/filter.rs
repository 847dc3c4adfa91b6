use colormask_image::{Image, ImageError};

use crate::{color, core, threshold};

/// An error type for the HSV range filter.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    /// The input raster is empty or has a zero dimension.
    #[error("Invalid image format: expected a non-empty 3-channel image, got {0}x{1}")]
    InvalidImageFormat(usize, usize),

    /// A range bound does not hold exactly three values.
    #[error("Invalid range spec: expected 3 values per bound, got {0}")]
    InvalidRangeSpec(usize),

    /// An underlying image operation failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Compute the selection mask for an HSV color range.
///
/// The input is converted to HSV (hue in [0, 179]) and each pixel is tested
/// against the closed per-channel intervals `[lower[i], upper[i]]`. A pixel
/// is selected only when all three channel tests pass.
///
/// # Arguments
///
/// * `src` - The input BGR image, 8-bit per channel. Callers holding RGB
///   data must convert with [`crate::color::bgr_from_rgb`] first.
/// * `lower` - The inclusive lower (H, S, V) bound, exactly 3 values.
/// * `upper` - The inclusive upper (H, S, V) bound, exactly 3 values.
///
/// # Returns
///
/// A freshly allocated single-channel mask of the same size, 255 for
/// selected pixels and 0 otherwise.
///
/// # Errors
///
/// * [`FilterError::InvalidImageFormat`] if the image has a zero dimension.
/// * [`FilterError::InvalidRangeSpec`] if a bound is not exactly 3 values.
///
/// An inverted interval (`lower[i] > upper[i]`) is not an error: it selects
/// nothing, yielding an all-zero mask.
pub fn hsv_range_mask(
    src: &Image<u8, 3>,
    lower: &[u8],
    upper: &[u8],
) -> Result<Image<u8, 1>, FilterError> {
    if src.width() == 0 || src.height() == 0 {
        return Err(FilterError::InvalidImageFormat(src.width(), src.height()));
    }

    let lower: [u8; 3] = lower
        .try_into()
        .map_err(|_| FilterError::InvalidRangeSpec(lower.len()))?;
    let upper: [u8; 3] = upper
        .try_into()
        .map_err(|_| FilterError::InvalidRangeSpec(upper.len()))?;

    let mut hsv = Image::from_size_val(src.size(), 0u8)?;
    color::hsv_from_bgr(src, &mut hsv)?;

    let mut mask = Image::from_size_val(src.size(), 0u8)?;
    threshold::in_range(&hsv, &mut mask, &lower, &upper)?;

    Ok(mask)
}

/// Keep only the pixels of an image whose HSV value lies within a range.
///
/// The image is converted to HSV, the per-pixel range test of
/// [`hsv_range_mask`] produces a selection mask, and the mask is applied to
/// the original image: selected pixels pass through unchanged, everything
/// else becomes (0, 0, 0).
///
/// The operation is pure: it never mutates `src`, allocates a fresh output
/// on every call and is deterministic for identical inputs, so it can be
/// called concurrently on independent images without coordination.
///
/// # Arguments
///
/// * `src` - The input BGR image, 8-bit per channel.
/// * `lower` - The inclusive lower (H, S, V) bound, exactly 3 values.
/// * `upper` - The inclusive upper (H, S, V) bound, exactly 3 values.
///
/// # Returns
///
/// A freshly allocated BGR image of the same size with unselected pixels
/// zeroed.
///
/// # Errors
///
/// * [`FilterError::InvalidImageFormat`] if the image has a zero dimension.
/// * [`FilterError::InvalidRangeSpec`] if a bound is not exactly 3 values.
///
/// # Example
///
/// ```
/// use colormask_image::{Image, ImageSize};
/// use colormask_imgproc::filter::hsv_range_filter;
///
/// // a 2x2 pure red image, BGR order
/// let image = Image::<u8, 3>::new(
///     ImageSize { width: 2, height: 2 },
///     vec![0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0, 255],
/// ).unwrap();
///
/// // the red hue band selects every pixel
/// let filtered = hsv_range_filter(&image, &[0, 100, 100], &[10, 255, 255]).unwrap();
/// assert_eq!(filtered.as_slice(), image.as_slice());
///
/// // a green hue band selects none
/// let filtered = hsv_range_filter(&image, &[60, 100, 100], &[70, 255, 255]).unwrap();
/// assert!(filtered.as_slice().iter().all(|&v| v == 0));
/// ```
pub fn hsv_range_filter(
    src: &Image<u8, 3>,
    lower: &[u8],
    upper: &[u8],
) -> Result<Image<u8, 3>, FilterError> {
    let mask = hsv_range_mask(src, lower, upper)?;

    let mut dst = Image::from_size_val(src.size(), 0u8)?;
    core::bitwise_and(src, src, &mut dst, &mask)?;

    Ok(dst)
}
