/// Convenience result type used across chanpack.
pub type PackResult<T> = Result<T, PackError>;

/// Top-level error taxonomy used by packing APIs.
///
/// Every variant aborts the current pack call; no partial output is produced.
#[derive(thiserror::Error, Debug)]
pub enum PackError {
    /// Resampled source pixel count does not match the target pixel count.
    #[error("size mismatch: expected {expected} pixels, got {actual}")]
    SizeMismatch {
        /// Target pixel count (`N * N`).
        expected: usize,
        /// Pixel count produced by the source at the selected mip level.
        actual: usize,
    },

    /// Source image is not square.
    #[error("aspect ratio error: source is {width}x{height}, expected a square image")]
    AspectRatio {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },

    /// Source side length is not a power of two.
    #[error("not a power of two: source side {side}")]
    NotPowerOfTwo {
        /// Offending side length.
        side: u32,
    },

    /// `Avg` mixing with weights that sum to zero.
    #[error("degenerate weights: avg mode requires a non-zero weight sum")]
    DegenerateWeights,

    /// Invalid user-provided request or preset data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing presets.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PackError {
    /// Build a [`PackError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PackError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
