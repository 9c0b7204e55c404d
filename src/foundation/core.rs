use crate::foundation::error::{PackError, PackResult};

/// Discrete output size tier. Tier `t` maps to a square side of `2 << (t + 6)` pixels.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct SizeTier(u8);

impl SizeTier {
    /// Number of selectable tiers (128 through 8192).
    pub const TIERS: u8 = 7;

    /// Build a tier from its index (`0..TIERS`).
    pub fn new(index: u8) -> PackResult<Self> {
        if index >= Self::TIERS {
            return Err(PackError::validation(format!(
                "size tier must be in 0..{}, got {index}",
                Self::TIERS
            )));
        }
        Ok(Self(index))
    }

    /// Find the tier whose side equals `side`.
    pub fn from_side(side: u32) -> PackResult<Self> {
        (0..Self::TIERS)
            .map(Self)
            .find(|t| t.side() == side)
            .ok_or_else(|| {
                PackError::validation(format!(
                    "side {side} is not a supported output size (128..=8192, power of two)"
                ))
            })
    }

    /// Tier index.
    pub fn index(self) -> u8 {
        self.0
    }

    /// Output side length in pixels.
    pub fn side(self) -> u32 {
        2u32 << (u32::from(self.0) + 6)
    }
}

impl Default for SizeTier {
    fn default() -> Self {
        Self(4)
    }
}

impl TryFrom<u8> for SizeTier {
    type Error = PackError;

    fn try_from(value: u8) -> PackResult<Self> {
        Self::new(value)
    }
}

impl From<SizeTier> for u8 {
    fn from(value: SizeTier) -> Self {
        value.0
    }
}

pub(crate) fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Round-to-nearest quantization of a unit float into a byte.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Mip level that reduces `source_side` to exactly `target_side`, if one exists.
pub(crate) fn mip_level_for(source_side: u32, target_side: u32) -> Option<u32> {
    if target_side == 0 || source_side < target_side || source_side % target_side != 0 {
        return None;
    }
    let ratio = source_side / target_side;
    ratio.is_power_of_two().then(|| ratio.trailing_zeros())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
