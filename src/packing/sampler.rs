use crate::{
    foundation::core::{clamp01, mip_level_for},
    foundation::error::{PackError, PackResult},
    packing::model::{ChannelConfig, ComponentWeights, MixMode},
};

/// Produce `side * side` intensities in `[0,1]` for one channel config.
///
/// Fixed configs and configs without a source yield a constant plane. Sourced
/// configs read the mip level whose side equals `side`, weight each texel's
/// components and collapse them according to the mix mode.
#[tracing::instrument(skip(cfg), fields(mode = ?cfg.mode, sourced = cfg.uses_source()))]
pub fn sample_channel(cfg: &ChannelConfig, side: u32) -> PackResult<Vec<f32>> {
    let len = (side as usize)
        .checked_mul(side as usize)
        .ok_or_else(|| PackError::validation("channel size overflow"))?;

    let source = match (&cfg.source, cfg.mode) {
        (Some(source), mode) if mode != MixMode::Fixed => source,
        _ => {
            let value = if cfg.mode == MixMode::Fixed {
                clamp01(cfg.constant_value as f32 / 255.0)
            } else {
                0.0
            };
            return Ok(vec![apply_invert(value, cfg.invert); len]);
        }
    };

    if source.width != source.height {
        return Err(PackError::AspectRatio {
            width: source.width,
            height: source.height,
        });
    }
    if !source.width.is_power_of_two() {
        return Err(PackError::NotPowerOfTwo { side: source.width });
    }
    let weight_sum = cfg.weights.sum();
    if cfg.mode == MixMode::Avg && (weight_sum == 0.0 || !weight_sum.is_finite()) {
        return Err(PackError::DegenerateWeights);
    }

    let level = mip_level_for(source.width, side).ok_or(PackError::SizeMismatch {
        expected: len,
        actual: (source.width as usize) * (source.height as usize),
    })?;
    tracing::debug!(source_side = source.width, level, "selected mip level");

    let mip = source.mip_level(level)?;
    if mip.texels.len() != len {
        return Err(PackError::SizeMismatch {
            expected: len,
            actual: mip.texels.len(),
        });
    }

    Ok(mip
        .texels
        .iter()
        .map(|&texel| apply_invert(clamp01(mix(texel, cfg.weights, cfg.mode)), cfg.invert))
        .collect())
}

/// Collapse one texel's weighted components to a scalar (unclamped).
///
/// `Avg` divides by the weight sum; callers reject a zero or non-finite sum beforehand.
/// `Fixed` never reaches this point and is treated as `Max`.
pub fn mix(texel: [f32; 4], weights: ComponentWeights, mode: MixMode) -> f32 {
    let w = weights.to_array();
    let weighted: [f32; 4] = std::array::from_fn(|i| texel[i] * w[i]);
    match mode {
        MixMode::Min => weighted.into_iter().fold(f32::INFINITY, f32::min),
        MixMode::Avg => weighted.iter().sum::<f32>() / weights.sum(),
        MixMode::Max | MixMode::Fixed => weighted.into_iter().fold(f32::NEG_INFINITY, f32::max),
    }
}

fn apply_invert(v: f32, invert: bool) -> f32 {
    if invert { 1.0 - v } else { v }
}

#[cfg(test)]
#[path = "../../tests/unit/packing/sampler.rs"]
mod tests;
