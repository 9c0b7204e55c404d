use std::sync::Arc;

use crate::{
    assets::source::SourceImage,
    foundation::error::{PackError, PackResult},
};

/// Resample `src` to a `side x side` square with bilinear filtering.
///
/// Used to bring small or non-square sources up to the packing size. Texel
/// centers are aligned and edges clamp.
pub fn upscale_bilinear(src: &SourceImage, side: u32) -> PackResult<SourceImage> {
    if side == 0 {
        return Err(PackError::validation("upscale side must be > 0"));
    }
    if src.width == 0 || src.height == 0 {
        return Err(PackError::validation("cannot upscale an empty image"));
    }

    let scale_x = src.width as f32 / side as f32;
    let scale_y = src.height as f32 / side as f32;
    let max_x = (src.width - 1) as f32;
    let max_y = (src.height - 1) as f32;

    let mut out = Vec::with_capacity((side as usize) * (side as usize) * 4);
    for y in 0..side {
        let sy = ((y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, max_y);
        for x in 0..side {
            let sx = ((x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, max_x);
            out.extend_from_slice(&sample_bilinear(src, sx, sy));
        }
    }

    Ok(SourceImage {
        width: side,
        height: side,
        rgba8: Arc::new(out),
        encoding: src.encoding,
    })
}

fn sample_bilinear(src: &SourceImage, x: f32, y: f32) -> [u8; 4] {
    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(src.width - 1);
    let y1 = (y0 + 1).min(src.height - 1);
    let dx = x - x.floor();
    let dy = y - y.floor();

    let c00 = src.pixel(x0, y0);
    let c10 = src.pixel(x1, y0);
    let c01 = src.pixel(x0, y1);
    let c11 = src.pixel(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v0 = f32::from(c00[i]) + dx * (f32::from(c10[i]) - f32::from(c00[i]));
        let v1 = f32::from(c01[i]) + dx * (f32::from(c11[i]) - f32::from(c01[i]));
        result[i] = (v0 + dy * (v1 - v0)).round().clamp(0.0, 255.0) as u8;
    }
    result
}

#[cfg(test)]
#[path = "../../tests/unit/assets/scale.rs"]
mod tests;
