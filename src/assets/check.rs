use crate::assets::source::{SourceEncoding, SourceImage};

/// What the packer needs to know about a source before sampling it.
///
/// Host tooling implements this for its own texture handles; [`SourceImage`]
/// implements it for decoded files.
pub trait SourceCapabilities {
    /// Pixels can be read on the CPU.
    fn is_readable(&self) -> bool;
    /// Pixels were not stored with lossy compression.
    fn is_uncompressed(&self) -> bool;
    /// `(width, height)` in pixels.
    fn side_length(&self) -> (u32, u32);
}

impl SourceCapabilities for SourceImage {
    fn is_readable(&self) -> bool {
        true
    }

    fn is_uncompressed(&self) -> bool {
        self.encoding == SourceEncoding::Lossless
    }

    fn side_length(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// A problem that must be fixed before a source can be packed at a given size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceIssue {
    /// Pixel data cannot be read.
    NotReadable,
    /// Source went through lossy compression; packing would compress it twice.
    Compressed,
    /// Width and height differ.
    NotSquare {
        /// Source width.
        width: u32,
        /// Source height.
        height: u32,
    },
    /// Side length is not a power of two.
    NotPowerOfTwo {
        /// Offending side.
        side: u32,
    },
    /// Source is smaller than the output; it has to be upscaled.
    TooSmall {
        /// Smallest source side.
        side: u32,
        /// Required output side.
        required: u32,
    },
}

impl SourceIssue {
    /// Whether [`crate::upscale_bilinear`] resolves this issue.
    pub fn fixable_by_upscale(self) -> bool {
        matches!(
            self,
            Self::NotSquare { .. } | Self::NotPowerOfTwo { .. } | Self::TooSmall { .. }
        )
    }
}

impl std::fmt::Display for SourceIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReadable => write!(f, "source is not readable"),
            Self::Compressed => write!(f, "source is lossy-compressed; use an uncompressed original"),
            Self::NotSquare { width, height } => {
                write!(f, "source is {width}x{height}, expected a square image")
            }
            Self::NotPowerOfTwo { side } => write!(f, "source side {side} is not a power of two"),
            Self::TooSmall { side, required } => {
                write!(f, "source side {side} is smaller than output side {required}")
            }
        }
    }
}

/// Collect every issue preventing `source` from being packed at `target_side`.
pub fn check_source(source: &impl SourceCapabilities, target_side: u32) -> Vec<SourceIssue> {
    let mut issues = Vec::new();
    if !source.is_readable() {
        issues.push(SourceIssue::NotReadable);
    }
    if !source.is_uncompressed() {
        issues.push(SourceIssue::Compressed);
    }

    let (width, height) = source.side_length();
    if width != height {
        issues.push(SourceIssue::NotSquare { width, height });
    } else if !width.is_power_of_two() {
        issues.push(SourceIssue::NotPowerOfTwo { side: width });
    }

    let smallest = width.min(height);
    if smallest < target_side {
        issues.push(SourceIssue::TooSmall {
            side: smallest,
            required: target_side,
        });
    }

    for issue in &issues {
        tracing::warn!(%issue, target_side, "source check failed");
    }
    issues
}

#[cfg(test)]
#[path = "../../tests/unit/assets/check.rs"]
mod tests;
