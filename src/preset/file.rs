use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode::load_image,
    assets::source::SourceImage,
    foundation::core::SizeTier,
    foundation::error::{PackError, PackResult},
    packing::model::{ChannelConfig, ChannelSlot, ComponentWeights, MixMode, PackingRequest},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Persisted packer configuration, stored as JSON next to its sources.
///
/// A preset is pure data; [`PackPreset::resolve`] loads the referenced
/// images and turns it into a [`PackingRequest`].
pub struct PackPreset {
    /// Output size tier (`0` = 128 ... `6` = 8192).
    #[serde(default)]
    pub texture_size: SizeTier,
    /// Red channel.
    #[serde(default)]
    pub red: ChannelPreset,
    /// Green channel.
    #[serde(default)]
    pub green: ChannelPreset,
    /// Blue channel.
    #[serde(default)]
    pub blue: ChannelPreset,
    /// Alpha channel.
    #[serde(default)]
    pub alpha: ChannelPreset,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Serialized form of one [`ChannelConfig`].
pub struct ChannelPreset {
    /// Mixing mode.
    #[serde(default)]
    pub mode: MixMode,
    /// Constant for `fixed` mode.
    #[serde(default)]
    pub value: i32,
    /// Flip the result.
    #[serde(default)]
    pub invert: bool,
    /// Component factors `[r, g, b, a]`.
    #[serde(default)]
    pub weights: ComponentWeights,
    /// Source image path, relative to the preset file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PackPreset {
    /// Parse a preset from JSON text.
    pub fn from_json_str(json: &str) -> PackResult<Self> {
        let preset: Self =
            serde_json::from_str(json).map_err(|e| PackError::serde(e.to_string()))?;
        preset.validate()?;
        Ok(preset)
    }

    /// Read and parse a preset file.
    pub fn from_path(path: &Path) -> PackResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read preset '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Pretty JSON form.
    pub fn to_json_string(&self) -> PackResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PackError::serde(e.to_string()))
    }

    /// Preset for `slot`.
    pub fn channel(&self, slot: ChannelSlot) -> &ChannelPreset {
        match slot {
            ChannelSlot::Red => &self.red,
            ChannelSlot::Green => &self.green,
            ChannelSlot::Blue => &self.blue,
            ChannelSlot::Alpha => &self.alpha,
        }
    }

    /// Check values that JSON alone cannot constrain.
    pub fn validate(&self) -> PackResult<()> {
        for slot in ChannelSlot::ALL {
            let ch = self.channel(slot);
            let name = slot.name();
            if !(0..=255).contains(&ch.value) {
                return Err(PackError::validation(format!(
                    "{name}.value must be in 0..=255, got {}",
                    ch.value
                )));
            }
            if ch.weights.to_array().iter().any(|w| !w.is_finite()) {
                return Err(PackError::validation(format!(
                    "{name}.weights must be finite"
                )));
            }
            if let Some(source) = &ch.source {
                validate_rel_source(source, &format!("{name}.source"))?;
            }
        }
        Ok(())
    }

    /// Source paths referenced by channels that actually sample them.
    pub fn source_paths(&self, root: &Path) -> Vec<(ChannelSlot, PathBuf)> {
        ChannelSlot::ALL
            .into_iter()
            .filter_map(|slot| {
                let ch = self.channel(slot);
                match (&ch.source, ch.mode) {
                    (Some(src), mode) if mode != MixMode::Fixed => Some((slot, root.join(src))),
                    _ => None,
                }
            })
            .collect()
    }

    /// Load every referenced source (each file once) and build a request.
    #[tracing::instrument(skip(self), fields(root = %root.display()))]
    pub fn resolve(&self, root: &Path) -> PackResult<PackingRequest> {
        self.validate()?;

        let mut loaded: HashMap<PathBuf, Arc<SourceImage>> = HashMap::new();
        let mut request = PackingRequest {
            size: self.texture_size,
            ..PackingRequest::default()
        };
        for slot in ChannelSlot::ALL {
            let ch = self.channel(slot);
            let mut cfg = ChannelConfig {
                constant_value: ch.value,
                invert: ch.invert,
                weights: ch.weights,
                mode: ch.mode,
                source: None,
            };
            if ch.mode != MixMode::Fixed
                && let Some(rel) = &ch.source
            {
                let path = root.join(rel);
                let image = match loaded.get(&path) {
                    Some(image) => image.clone(),
                    None => {
                        let image = Arc::new(load_image(&path)?);
                        loaded.insert(path, image.clone());
                        image
                    }
                };
                cfg.source = Some(image);
            }
            *request.channel_mut(slot) = cfg;
        }
        tracing::debug!(sources = loaded.len(), "resolved preset");
        Ok(request)
    }

    /// Output path used when none is given: the preset path with a `.png` extension.
    pub fn default_output_path(preset_path: &Path) -> PathBuf {
        preset_path.with_extension("png")
    }
}

fn validate_rel_source(source: &str, field: &str) -> PackResult<()> {
    if source.trim().is_empty() {
        return Err(PackError::validation(format!("{field} must be non-empty")));
    }
    let s = source.replace('\\', "/");
    if s.starts_with('/') || Path::new(source).is_absolute() {
        return Err(PackError::validation(format!(
            "{field} must be a relative path"
        )));
    }
    if s.split('/').any(|part| part == "..") {
        return Err(PackError::validation(format!(
            "{field} must not contain '..'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/preset/file.rs"]
mod tests;
