//! PNG snapshot of a rendered frame.
//!
//! Row padding is dropped before encoding, so buffers with any pitch
//! produce a tightly packed image.

use std::path::Path;

use langevin_core::{PixelBuffer, SamplerError};

/// Writes `buffer` as an RGBA PNG.
///
/// Returns `SamplerError::InvalidDimensions` if the buffer does not fit in
/// `u32` image dimensions, or `SamplerError::Io` on encode/write failure.
pub fn write_png(buffer: &PixelBuffer, path: &Path) -> Result<(), SamplerError> {
    let invalid = || SamplerError::InvalidDimensions {
        width: buffer.width(),
        height: buffer.height(),
    };
    let w = u32::try_from(buffer.width()).map_err(|_| invalid())?;
    let h = u32::try_from(buffer.height()).map_err(|_| invalid())?;
    let img = image::RgbaImage::from_raw(w, h, buffer.to_packed_rgba())
        .ok_or_else(|| SamplerError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SamplerError::Io(e.to_string()))
}
