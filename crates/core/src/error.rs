//! Error types for the Langevin sampler core.

use thiserror::Error;

/// Errors produced by buffer allocation, configuration, and snapshot I/O.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// Width or height was zero, or the byte size of the buffer overflows `usize`.
    #[error("invalid dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    /// A row pitch smaller than `width * 4` bytes was requested.
    #[error("invalid pitch {pitch}: rows need at least {min} bytes")]
    InvalidPitch { pitch: usize, min: usize },

    /// A configuration value was out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Writing a snapshot failed.
    #[error("I/O error: {0}")]
    Io(String),
}
