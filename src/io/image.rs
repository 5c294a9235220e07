//! Level image decoding and PNG export of representative cell images

use crate::classify::level::ImageMap;
use crate::io::error::{PuzzleError, Result, file_system_error};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Decode an image file into an 8-bit RGB raster
///
/// Alpha is discarded and paletted or grayscale images are expanded.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| PuzzleError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Write every representative cell image as `<slug>.png` into `directory`
///
/// Returns the written paths in tag order.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - An image cannot be encoded or saved
pub fn export_cell_images(images: &ImageMap, directory: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(directory)
        .map_err(|e| file_system_error(directory, "create directory", e))?;

    let mut written = Vec::with_capacity(images.len());
    for (tag, image) in images {
        let path = directory.join(format!("{}.png", tag.slug()));
        image.save(&path).map_err(|e| PuzzleError::ImageExport {
            path: path.clone(),
            source: e,
        })?;
        written.push(path);
    }

    Ok(written)
}
