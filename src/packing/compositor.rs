use std::{io::Cursor, path::Path};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    foundation::core::unit_to_u8,
    foundation::error::{PackError, PackResult},
    packing::model::{ChannelSlot, PackingRequest},
    packing::sampler::sample_channel,
};

/// Execution options for [`pack_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackOptions {
    /// Sample the four channels concurrently on a dedicated thread pool.
    pub parallel: bool,
    /// Override the worker count. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Packed output: a square, row-major, straight RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedImage {
    /// Side length in pixels.
    pub side: u32,
    /// `side * side * 4` bytes.
    pub rgba8: Vec<u8>,
}

impl PackedImage {
    /// RGBA8 value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.side as usize) + (x as usize)) * 4;
        [
            self.rgba8[idx],
            self.rgba8[idx + 1],
            self.rgba8[idx + 2],
            self.rgba8[idx + 3],
        ]
    }

    /// Copy into an `image` buffer.
    pub fn to_rgba_image(&self) -> PackResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.side, self.side, self.rgba8.clone())
            .ok_or_else(|| PackError::validation("packed buffer does not match its side length"))
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> PackResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.to_rgba_image()?
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode packed png")?;
        Ok(buf)
    }

    /// Write a PNG file, creating parent directories as needed.
    pub fn write_png(&self, path: &Path) -> PackResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Pack a request sequentially. See [`pack_with`].
pub fn pack(request: &PackingRequest) -> PackResult<PackedImage> {
    pack_with(request, PackOptions::default())
}

/// Sample every channel of `request` and interleave the results into one RGBA8 image.
///
/// All-or-nothing: the first failing channel aborts the call.
#[tracing::instrument(skip(request), fields(side = request.side()))]
pub fn pack_with(request: &PackingRequest, opts: PackOptions) -> PackResult<PackedImage> {
    request.validate()?;
    let side = request.side();

    let planes = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            ChannelSlot::ALL
                .par_iter()
                .map(|&slot| sample_channel(request.channel(slot), side))
                .collect::<PackResult<Vec<_>>>()
        })?
    } else {
        ChannelSlot::ALL
            .iter()
            .map(|&slot| sample_channel(request.channel(slot), side))
            .collect::<PackResult<Vec<_>>>()?
    };

    let px = (side as usize) * (side as usize);
    let mut acc = vec![[0.0f32; 4]; px];
    for (slot, plane) in ChannelSlot::ALL.into_iter().zip(&planes) {
        accumulate_max(&mut acc, plane, slot.factor())?;
    }

    let mut rgba8 = Vec::with_capacity(px * 4);
    for texel in &acc {
        rgba8.extend(texel.iter().map(|&v| unit_to_u8(v)));
    }
    tracing::debug!(side, "packed image");

    Ok(PackedImage { side, rgba8 })
}

/// Merge `plane` into `dst` through a per-component factor using elementwise max.
///
/// With a one-hot factor and a zeroed destination this is plain assignment of
/// one component; the max rule only matters when a plane targets several
/// components or a component receives several planes.
pub fn accumulate_max(dst: &mut [[f32; 4]], plane: &[f32], factor: [f32; 4]) -> PackResult<()> {
    if dst.len() != plane.len() {
        return Err(PackError::SizeMismatch {
            expected: dst.len(),
            actual: plane.len(),
        });
    }
    for (d, &v) in dst.iter_mut().zip(plane) {
        for c in 0..4 {
            d[c] = d[c].max(factor[c] * v);
        }
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> PackResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PackError::validation(
            "pack threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PackError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/packing/compositor.rs"]
mod tests;
