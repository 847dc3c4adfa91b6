use std::path::{Path, PathBuf};

use crate::error::IoError;

/// File extensions the scanner accepts, lowercase.
const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Walk a directory and collect the paths of the images inside it.
///
/// The scan is recursive and case-insensitive on the extension. The result
/// is sorted so an index into it is stable across runs.
///
/// # Arguments
///
/// * `images_dir` - The directory to scan.
///
/// # Returns
///
/// The sorted image paths.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] if the directory does not exist.
/// * [`IoError::NoImagesFound`] if the scan comes back empty.
pub fn list_images(images_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, IoError> {
    let images_dir = images_dir.as_ref();

    if !images_dir.exists() {
        return Err(IoError::FileDoesNotExist(images_dir.to_path_buf()));
    }

    let mut images_paths = walkdir::WalkDir::new(images_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect::<Vec<_>>();

    if images_paths.is_empty() {
        return Err(IoError::NoImagesFound(images_dir.to_path_buf()));
    }

    images_paths.sort();
    log::debug!(
        "found {} images under {}",
        images_paths.len(),
        images_dir.display()
    );

    Ok(images_paths)
}
