//! Chanpack packs up to four grayscale mask signals into the R, G, B and A
//! channels of one texture.
//!
//! Typical uses are metallic/roughness/occlusion/height maps: each output
//! channel is filled either from a constant or from a source image whose
//! components are weighted and collapsed to one intensity.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `PackPreset + directory -> PackingRequest` (load source images)
//! 2. **Sample**: `ChannelConfig + side -> [f32]` per channel, reading the
//!    box-filtered mip level whose side matches the output
//! 3. **Composite**: four planes -> one interleaved RGBA8 `PackedImage`
//! 4. **Encode** (optional): PNG via the `image` crate
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure packing**: [`pack`] takes an immutable request and returns a new
//!   image; a failing channel aborts the whole call.
//! - **Validated inputs**: sources must be square, power-of-two and at least
//!   as large as the output. [`check_source`] and [`upscale_bilinear`] help
//!   host tooling get there.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod packing;
mod preset;

pub use assets::check::{SourceCapabilities, SourceIssue, check_source};
pub use assets::decode::{decode_image, load_image};
pub use assets::scale::upscale_bilinear;
pub use assets::source::{MipLevel, SourceEncoding, SourceImage};
pub use foundation::core::SizeTier;
pub use foundation::error::{PackError, PackResult};
pub use packing::compositor::{PackOptions, PackedImage, accumulate_max, pack, pack_with};
pub use packing::model::{
    ChannelConfig, ChannelSlot, ComponentWeights, MixMode, PackingRequest,
};
pub use packing::sampler::{mix, sample_channel};
pub use preset::file::{ChannelPreset, PackPreset};
