use std::sync::Arc;

use crate::foundation::error::{PackError, PackResult};

/// Origin of a decoded source image, used to judge whether it was lossy-compressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Raw pixels or a lossless container (PNG, TGA, BMP, ...).
    #[default]
    Lossless,
    /// Decoded from a lossy format such as JPEG.
    Lossy,
}

#[derive(Clone, Debug)]
/// Immutable straight-alpha RGBA8 source image.
pub struct SourceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major straight RGBA8.
    pub rgba8: Arc<Vec<u8>>,
    /// How the pixels were stored before decoding.
    pub encoding: SourceEncoding,
}

/// One level of a box-filtered mip chain, as normalized RGBA floats.
#[derive(Clone, Debug, PartialEq)]
pub struct MipLevel {
    /// Side length of this level (levels are only taken from square sources).
    pub side: u32,
    /// Row-major texels, components in `[0,1]`.
    pub texels: Vec<[f32; 4]>,
}

impl SourceImage {
    /// Wrap a tightly packed RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> PackResult<Self> {
        let img = Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
            encoding: SourceEncoding::Lossless,
        };
        img.check_buffer()?;
        Ok(img)
    }

    /// Single-color image, handy for fixtures and placeholders.
    pub fn solid(side: u32, rgba: [u8; 4]) -> Self {
        let px = (side as usize) * (side as usize);
        Self {
            width: side,
            height: side,
            rgba8: Arc::new(rgba.repeat(px)),
            encoding: SourceEncoding::Lossless,
        }
    }

    /// Mark the image as decoded from the given encoding.
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Ensure the pixel buffer holds exactly `width * height` RGBA8 texels.
    ///
    /// Fields are public, so a struct literal can bypass [`SourceImage::from_rgba8`].
    pub fn check_buffer(&self) -> PackResult<()> {
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| PackError::validation("source buffer size overflow"))?;
        if self.rgba8.len() != expected {
            return Err(PackError::validation(format!(
                "source buffer has {} bytes, expected {expected} for {}x{} rgba8",
                self.rgba8.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// RGBA8 value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.rgba8[idx],
            self.rgba8[idx + 1],
            self.rgba8[idx + 2],
            self.rgba8[idx + 3],
        ]
    }

    /// Box-filtered level `level` of a square source.
    ///
    /// Each output texel is the mean of the `2^level x 2^level` block of
    /// source pixels it covers, which is what repeated 2x2 averaging yields.
    pub fn mip_level(&self, level: u32) -> PackResult<MipLevel> {
        if self.width != self.height {
            return Err(PackError::AspectRatio {
                width: self.width,
                height: self.height,
            });
        }
        self.check_buffer()?;
        if level >= 32 || (self.width >> level) == 0 {
            return Err(PackError::validation(format!(
                "mip level {level} out of range for side {}",
                self.width
            )));
        }

        let src_side = self.width as usize;
        let block = 1usize << level;
        let side = src_side / block;
        let denom = (block * block) as f32 * 255.0;

        let mut texels = Vec::with_capacity(side * side);
        for oy in 0..side {
            for ox in 0..side {
                let mut acc = [0u64; 4];
                for sy in oy * block..(oy + 1) * block {
                    let row = sy * src_side;
                    for sx in ox * block..(ox + 1) * block {
                        let idx = (row + sx) * 4;
                        for (c, a) in acc.iter_mut().enumerate() {
                            *a += u64::from(self.rgba8[idx + c]);
                        }
                    }
                }
                texels.push(acc.map(|v| v as f32 / denom));
            }
        }

        Ok(MipLevel {
            side: side as u32,
            texels,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
