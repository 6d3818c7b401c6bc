//! Download naming and saving generated images as PNG files.

use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::ImageError;
use crate::ports::GeneratedImage;

/// File name for the image at `index` (zero-based).
#[must_use]
pub fn download_file_name(index: usize) -> String {
    format!("generated-image-{index}.png")
}

/// Save an image into `dir` as `generated-image-<index>.png`.
///
/// PNG payloads are written unchanged; other decodable formats are
/// re-encoded as PNG. An existing file with the same name is replaced.
///
/// # Errors
///
/// Returns an error if the reference cannot be decoded, the payload is not
/// an image, or the file cannot be written.
pub fn save_download(image: &GeneratedImage, index: usize, dir: &Path) -> Result<PathBuf, ImageError> {
    let data = image.decode()?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name(index));

    match image::guess_format(&data) {
        Ok(ImageFormat::Png) => std::fs::write(&path, &data)?,
        Ok(format) => {
            tracing::debug!(?format, index, "converting download to png");
            convert_to_png(&data, &path)?;
        }
        Err(e) => {
            return Err(ImageError::ImageConversion(format!("unrecognized image data: {e}")));
        }
    }

    tracing::info!(index, path = %path.display(), "saved download");
    Ok(path)
}

fn convert_to_png(data: &[u8], path: &Path) -> Result<(), ImageError> {
    let img = image::load_from_memory(data)
        .map_err(|e| ImageError::ImageConversion(format!("Failed to decode image: {e}")))?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| ImageError::ImageConversion(format!("Failed to save as png: {e}")))
}
