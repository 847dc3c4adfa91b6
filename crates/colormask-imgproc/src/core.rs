use rayon::prelude::*;

use colormask_image::{Image, ImageError};

/// Perform a bitwise AND operation between two images using a mask.
///
/// The mask is a binary image where the value 0 is considered as False
/// and any other value is considered as True. Where the mask is True the
/// output is the byte-wise AND of the two sources; elsewhere it is 0.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `src2` - The second input image.
/// * `dst` - The output image.
/// * `mask` - The binary mask to apply to the image.
///
/// # Returns
///
/// The output image after applying the mask.
///
/// # Example
///
/// ```
/// use colormask_image::{Image, ImageSize};
/// use colormask_imgproc::core::bitwise_and;
///
/// let image = Image::<u8, 3>::new(
///    ImageSize {
///        width: 2,
///        height: 2,
///    },
///    vec![0, 1, 2, 253, 254, 255, 128, 129, 130, 64, 65, 66],
/// ).unwrap();
///
/// let mask = Image::<u8, 1>::new(
///    ImageSize {
///        width: 2,
///        height: 2,
///    },
///    vec![255, 0, 255, 0],
/// ).unwrap();
///
/// let mut output = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// bitwise_and(&image, &image, &mut output, &mask).unwrap();
///
/// assert_eq!(output.as_slice(), &[0, 1, 2, 0, 0, 0, 128, 129, 130, 0, 0, 0]);
/// ```
pub fn bitwise_and<const CHANNELS: usize>(
    src1: &Image<u8, CHANNELS>,
    src2: &Image<u8, CHANNELS>,
    dst: &mut Image<u8, CHANNELS>,
    mask: &Image<u8, 1>,
) -> Result<(), ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            src2.width(),
            src2.height(),
        ));
    }

    if src1.size() != mask.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            mask.width(),
            mask.height(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let cols = src1.cols();
    let stride = CHANNELS * cols;
    if stride == 0 {
        return Ok(());
    }

    // apply the mask to the image, row chunks in parallel
    src1.as_slice()
        .par_chunks_exact(stride)
        .zip(src2.as_slice().par_chunks_exact(stride))
        .zip(mask.as_slice().par_chunks_exact(cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(stride))
        .for_each(|(((src1_row, src2_row), mask_row), dst_row)| {
            src1_row
                .chunks_exact(CHANNELS)
                .zip(src2_row.chunks_exact(CHANNELS))
                .zip(mask_row.iter())
                .zip(dst_row.chunks_exact_mut(CHANNELS))
                .for_each(|(((src1_pixel, src2_pixel), mask_val), dst_pixel)| {
                    for c in 0..CHANNELS {
                        dst_pixel[c] = if *mask_val != 0 {
                            src1_pixel[c] & src2_pixel[c]
                        } else {
                            0
                        };
                    }
                });
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use colormask_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_bitwise_and() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 1, 2, 253, 254, 255, 128, 129, 130, 64, 65, 66],
        )?;

        let mask = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![255, 0, 255, 0],
        )?;

        let mut output = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        super::bitwise_and(&image, &image, &mut output, &mask)?;

        assert_eq!(output.size().width, 2);
        assert_eq!(output.size().height, 2);
        assert_eq!(output.num_channels(), 3);

        assert_eq!(
            output.as_slice(),
            vec![0, 1, 2, 0, 0, 0, 128, 129, 130, 0, 0, 0]
        );
        Ok(())
    }

    #[test]
    fn test_bitwise_and_full_mask() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 2, 3, 4, 5, 6],
        )?;

        let mask = Image::<u8, 1>::from_size_val(image.size(), 255)?;
        let mut output = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        super::bitwise_and(&image, &image, &mut output, &mask)?;

        assert_eq!(output.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn test_bitwise_and_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 1,
            },
            0,
        )?;
        let mask = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 1,
                height: 1,
            },
            0,
        )?;
        let mut output = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        let res = super::bitwise_and(&image, &image, &mut output, &mask);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(..))));

        Ok(())
    }
}
