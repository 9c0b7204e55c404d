use std::path::Path;

use anyhow::Context;

use crate::{
    assets::source::{SourceEncoding, SourceImage},
    foundation::error::PackResult,
};

/// Decode an encoded image (PNG, TGA, JPEG, ...) into a straight-alpha source image.
pub fn decode_image(bytes: &[u8]) -> PackResult<SourceImage> {
    let format = image::guess_format(bytes).context("detect image format")?;
    let dyn_img =
        image::load_from_memory_with_format(bytes, format).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let img = SourceImage::from_rgba8(width, height, rgba.into_raw())?;
    Ok(img.with_encoding(encoding_of(format)))
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> PackResult<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = decode_image(&bytes).with_context(|| format!("decode image '{}'", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        width = img.width,
        height = img.height,
        "loaded source image"
    );
    Ok(img)
}

fn encoding_of(format: image::ImageFormat) -> SourceEncoding {
    match format {
        image::ImageFormat::Jpeg | image::ImageFormat::Avif => SourceEncoding::Lossy,
        _ => SourceEncoding::Lossless,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
