use std::sync::Arc;

use crate::{
    assets::source::SourceImage,
    foundation::core::SizeTier,
    foundation::error::{PackError, PackResult},
};

/// How the weighted components of a source collapse into one intensity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixMode {
    /// Largest weighted component.
    #[default]
    Max,
    /// Weighted sum divided by the weight sum.
    Avg,
    /// Smallest weighted component.
    Min,
    /// Constant value, source is ignored.
    Fixed,
}

/// Per-component factors applied to a source's R, G, B and A before mixing.
///
/// Usually each factor is `0.0` (ignore) or `1.0` (use).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct ComponentWeights {
    /// Red factor.
    pub r: f32,
    /// Green factor.
    pub g: f32,
    /// Blue factor.
    pub b: f32,
    /// Alpha factor.
    pub a: f32,
}

impl ComponentWeights {
    /// Select only red.
    pub const R: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// Select only green.
    pub const G: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// Select only blue.
    pub const B: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// Select only alpha.
    pub const A: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Select every component.
    pub const ALL: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Build weights from explicit factors.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Weights as an `[r, g, b, a]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Sum of all factors (the `Avg` divisor).
    pub fn sum(self) -> f32 {
        self.r + self.g + self.b + self.a
    }
}

impl From<[f32; 4]> for ComponentWeights {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<ComponentWeights> for [f32; 4] {
    fn from(w: ComponentWeights) -> Self {
        w.to_array()
    }
}

/// Configuration for one output channel.
#[derive(Clone, Debug, Default)]
pub struct ChannelConfig {
    /// Constant used when `mode == Fixed`, nominally `0..=255`.
    pub constant_value: i32,
    /// Flip the computed intensity (`1 - x`).
    pub invert: bool,
    /// Factors selecting which source components feed the mix.
    pub weights: ComponentWeights,
    /// Mixing mode.
    pub mode: MixMode,
    /// Square power-of-two source at least as large as the output.
    pub source: Option<Arc<SourceImage>>,
}

impl ChannelConfig {
    /// Constant channel.
    pub fn fixed(value: i32) -> Self {
        Self {
            constant_value: value,
            mode: MixMode::Fixed,
            ..Self::default()
        }
    }

    /// Channel sampled from `source`.
    pub fn sampled(source: Arc<SourceImage>, mode: MixMode, weights: ComponentWeights) -> Self {
        Self {
            mode,
            weights,
            source: Some(source),
            ..Self::default()
        }
    }

    /// Toggle inversion.
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Whether sampling reads the source (rather than a constant).
    pub fn uses_source(&self) -> bool {
        self.mode != MixMode::Fixed && self.source.is_some()
    }
}

/// One of the four output channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelSlot {
    /// Red output.
    Red,
    /// Green output.
    Green,
    /// Blue output.
    Blue,
    /// Alpha output.
    Alpha,
}

impl ChannelSlot {
    /// All slots in output component order.
    pub const ALL: [Self; 4] = [Self::Red, Self::Green, Self::Blue, Self::Alpha];

    /// Component index in an RGBA pixel.
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Alpha => 3,
        }
    }

    /// One-hot factor selecting this slot's component.
    pub fn factor(self) -> [f32; 4] {
        let mut f = [0.0; 4];
        f[self.index()] = 1.0;
        f
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Alpha => "alpha",
        }
    }
}

/// A full pack request: output size plus one config per output channel.
#[derive(Clone, Debug, Default)]
pub struct PackingRequest {
    /// Output size tier.
    pub size: SizeTier,
    /// Red channel config.
    pub red: ChannelConfig,
    /// Green channel config.
    pub green: ChannelConfig,
    /// Blue channel config.
    pub blue: ChannelConfig,
    /// Alpha channel config.
    pub alpha: ChannelConfig,
}

impl PackingRequest {
    /// Config assigned to `slot`.
    pub fn channel(&self, slot: ChannelSlot) -> &ChannelConfig {
        match slot {
            ChannelSlot::Red => &self.red,
            ChannelSlot::Green => &self.green,
            ChannelSlot::Blue => &self.blue,
            ChannelSlot::Alpha => &self.alpha,
        }
    }

    /// Mutable config assigned to `slot`.
    pub fn channel_mut(&mut self, slot: ChannelSlot) -> &mut ChannelConfig {
        match slot {
            ChannelSlot::Red => &mut self.red,
            ChannelSlot::Green => &mut self.green,
            ChannelSlot::Blue => &mut self.blue,
            ChannelSlot::Alpha => &mut self.alpha,
        }
    }

    /// Output side length in pixels.
    pub fn side(&self) -> u32 {
        self.size.side()
    }

    /// Reject non-finite weights (or weight sums) before any sampling.
    pub fn validate(&self) -> PackResult<()> {
        for slot in ChannelSlot::ALL {
            let cfg = self.channel(slot);
            if cfg.weights.to_array().iter().any(|w| !w.is_finite()) {
                return Err(PackError::validation(format!(
                    "{} channel weights must be finite",
                    slot.name()
                )));
            }
            if !cfg.weights.sum().is_finite() {
                return Err(PackError::validation(format!(
                    "{} channel weight sum must be finite",
                    slot.name()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/packing/model.rs"]
mod tests;
