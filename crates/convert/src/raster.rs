use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::error::ConvertError;

/// Decode an image in any supported format and re-encode it as `target`.
///
/// JPEG has no alpha channel, so it is flattened to RGB first; every other
/// target is encoded from RGBA.
pub(crate) fn transcode(data: &[u8], target: ImageFormat) -> Result<Vec<u8>, ConvertError> {
    let decoded = image::load_from_memory(data)
        .map_err(|e| ConvertError::Conversion(format!("failed to decode image: {e}")))?;

    let prepared = match target {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(decoded.to_rgb8()),
        _ => DynamicImage::ImageRgba8(decoded.to_rgba8()),
    };

    let mut buffer = Cursor::new(Vec::new());
    prepared
        .write_to(&mut buffer, target)
        .map_err(|e| ConvertError::Conversion(format!("failed to encode image: {e}")))?;
    Ok(buffer.into_inner())
}
