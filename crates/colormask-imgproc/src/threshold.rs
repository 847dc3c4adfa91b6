use std::cmp::PartialOrd;

use colormask_image::{Image, ImageError};

use crate::parallel;

/// Apply a range threshold to an image.
///
/// A pixel is selected only if every channel value lies within the closed
/// interval `[lower_bound[i], upper_bound[i]]` for its channel (logical AND
/// across channels). An inverted interval (`lower_bound[i] > upper_bound[i]`)
/// matches nothing for that channel, so no pixel is selected.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output mask with a single channel as byte values.
/// * `lower_bound` - The inclusive lower bound for each channel.
/// * `upper_bound` - The inclusive upper bound for each channel.
///
/// # Returns
///
/// The thresholded mask with value 255 for selected pixels and 0 otherwise.
///
/// Precondition: the input image and the output mask must have the same size.
///
/// # Examples
///
/// ```
/// use colormask_image::{Image, ImageSize};
/// use colormask_imgproc::threshold::in_range;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
///
/// let image = Image::<u8, 3>::new(
///    ImageSize {
///       width: 2,
///       height: 1,
///    },
///    data,
/// )
/// .unwrap();
///
/// let mut thresholded = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// in_range(&image, &mut thresholded, &[100, 150, 0], &[200, 200, 200]).unwrap();
/// assert_eq!(thresholded.num_channels(), 1);
/// assert_eq!(thresholded.size().width, 2);
///
/// assert_eq!(thresholded.get_pixel(0, 0, 0).unwrap(), &255);
/// assert_eq!(thresholded.get_pixel(1, 0, 0).unwrap(), &0);
/// ```
pub fn in_range<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<u8, 1>,
    lower_bound: &[T; C],
    upper_bound: &[T; C],
) -> Result<(), ImageError>
where
    T: Clone + Send + Sync + PartialOrd,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // parallelize the operation by rows
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let mut is_in_range = true;
        src_pixel
            .iter()
            .zip(lower_bound.iter().zip(upper_bound.iter()))
            .for_each(|(src_val, (lower, upper))| {
                is_in_range &= src_val >= lower && src_val <= upper;
            });
        dst_pixel[0] = if is_in_range { 255 } else { 0 };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use colormask_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_in_range() -> Result<(), ImageError> {
        let data = vec![100u8, 200, 50, 150, 200, 250];
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            data,
        )?;

        let mut thresholded = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        super::in_range(&image, &mut thresholded, &[100, 150, 0], &[200, 200, 200])?;

        assert_eq!(thresholded.num_channels(), 1);
        assert_eq!(thresholded.size().width, 2);
        assert_eq!(thresholded.size().height, 1);

        assert_eq!(thresholded.get([0, 0, 0]), Some(&255));
        assert_eq!(thresholded.get([0, 1, 0]), Some(&0));

        Ok(())
    }

    #[test]
    fn test_in_range_inverted_interval() -> Result<(), ImageError> {
        let data = vec![100u8, 200, 50, 150, 200, 250];
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            data,
        )?;

        let mut thresholded = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        // lower > upper on the first channel matches nothing
        super::in_range(&image, &mut thresholded, &[200, 0, 0], &[100, 255, 255])?;

        assert_eq!(thresholded.as_slice(), &[0, 0]);

        Ok(())
    }

    #[test]
    fn test_in_range_single_channel() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![10, 128, 250],
        )?;

        let mut thresholded = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        super::in_range(&image, &mut thresholded, &[100], &[200])?;

        assert_eq!(thresholded.as_slice(), &[0, 255, 0]);

        Ok(())
    }

    #[test]
    fn test_in_range_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 1,
            },
            0,
        )?;
        let mut thresholded = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;

        let res = super::in_range(&image, &mut thresholded, &[0, 0, 0], &[255, 255, 255]);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(..))));

        Ok(())
    }
}
