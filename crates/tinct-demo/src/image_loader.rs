//! Image decoding and encoding for the command-line session.

use std::path::Path;

use tinct_core::{CoreError, PixelBuffer};

/// Load an image from disk and convert it to the engine's BGR buffer.
///
/// Supports the formats enabled in the `image` crate (PNG, JPEG, BMP, WebP,
/// ...). Alpha is dropped; higher bit depths are reduced to 8 bits.
pub fn load_image(path: &Path) -> Result<PixelBuffer, ImageLoadError> {
    let img = image::open(path).map_err(ImageLoadError::Decode)?;
    tracing::info!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(PixelBuffer::from_dynamic_image(&img)?)
}

/// Encode `buffer` to `path`; the format follows the file extension.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<(), ImageLoadError> {
    buffer.to_rgb_image().save(path).map_err(ImageLoadError::Encode)?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

/// Errors that can occur while reading or writing images.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("unusable image: {0}")]
    Buffer(#[from] CoreError),
}
