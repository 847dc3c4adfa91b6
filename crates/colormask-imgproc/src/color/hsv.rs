use crate::parallel;
use colormask_image::{Image, ImageError};

/// Convert a BGR image to an HSV image.
///
/// The input image is assumed to have 3 channels in the order B, G, R.
///
/// # Arguments
///
/// * `src` - The input BGR image assumed to have 3 channels.
/// * `dst` - The output HSV image.
///
/// # Returns
///
/// The HSV image with the following channels:
///
/// * H: The hue channel in the range [0, 179] (the angle in degrees halved).
/// * S: The saturation channel in the range [0, 255].
/// * V: The value channel in the range [0, 255].
///
/// Achromatic pixels (no chroma) get hue 0. A hue that rounds to 180 wraps
/// back to 0 so the channel stays within [0, 179].
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use colormask_image::{Image, ImageSize};
/// use colormask_imgproc::color::hsv_from_bgr;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///        width: 4,
///        height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut hsv = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// hsv_from_bgr(&image, &mut hsv).unwrap();
///
/// assert_eq!(hsv.num_channels(), 3);
/// assert_eq!(hsv.size().width, 4);
/// assert_eq!(hsv.size().height, 5);
/// ```
pub fn hsv_from_bgr(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // compute the HSV values
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        // Normalize the input to the range [0, 1]
        let b = src_pixel[0] as f32 / 255.;
        let g = src_pixel[1] as f32 / 255.;
        let r = src_pixel[2] as f32 / 255.;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        // Ensure h is in the range [0, 360)
        let h = if h < 0.0 { h + 360.0 } else { h };

        // 8-bit hue encoding halves the angle; 180 wraps back to 0
        let h = ((h / 2.0).round() as u16 % 180) as u8;

        let s = if max == 0.0 {
            0
        } else {
            ((delta / max) * 255.0).round() as u8
        };

        let v = (max * 255.0).round() as u8;

        dst_pixel[0] = h;
        dst_pixel[1] = s;
        dst_pixel[2] = v;
    });

    Ok(())
}
