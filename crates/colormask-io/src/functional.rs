use std::path::Path;

use colormask_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as RGB8.
///
/// The method tries to read from any image format supported by the image
/// crate. An alpha channel, if present, is dropped; grayscale inputs are
/// rejected because the masking pipeline expects three color channels.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB8 image containing the decoded pixel data.
///
/// # Example
///
/// ```no_run
/// use colormask_image::Image;
/// use colormask_io::functional as F;
///
/// let image: Image<u8, 3> = F::read_image_any_rgb8("photo.png").unwrap();
/// ```
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    match img.color() {
        image::ColorType::L8
        | image::ColorType::La8
        | image::ColorType::L16
        | image::ColorType::La16 => Err(IoError::UnsupportedImageFormat(file_path.to_path_buf())),
        // any color layout flattens to rgb8, dropping alpha
        _ => Ok(Image::new(size, img.into_rgb8().into_raw())?),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::IoError;
    use crate::functional::read_image_any_rgb8;
    use crate::png::{write_image_png_gray8, write_image_png_rgb8};
    use colormask_image::{Image, ImageSize};

    #[test]
    fn read_any_rgb8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("pixels.png");

        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![255, 0, 0, 0, 255, 0],
        )?;
        write_image_png_rgb8(&file_path, &image)?;

        let image_back = read_image_any_rgb8(&file_path)?;

        assert_eq!(image_back.size().width, 2);
        assert_eq!(image_back.size().height, 1);
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn read_any_rejects_grayscale() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 64, 128, 255],
        )?;
        write_image_png_gray8(&file_path, &image)?;

        let res = read_image_any_rgb8(&file_path);
        assert!(matches!(res, Err(IoError::UnsupportedImageFormat(_))));

        Ok(())
    }

    #[test]
    fn read_any_missing_file() {
        let res = read_image_any_rgb8("definitely/not/here.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }
}
