//! Contour-banded tri-color palette for the energy landscape.
//!
//! A normalized intensity in [0, 1] is quantized to 8 bits and its low three
//! bits are cleared, leaving 32 flat bands whose edges read as contour lines.
//! Each channel then scales the banded intensity by its own peak value.

use serde::{Deserialize, Serialize};

use crate::pixel::Rgba;

/// Mask applied to the 8-bit intensity; clears the low three bits.
pub const BAND_MASK: u8 = 0xf8;

/// Per-channel peak values for a banded intensity of 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourPalette {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for ContourPalette {
    /// Soft orchid: `#e098c6` at full intensity.
    fn default() -> Self {
        Self {
            r: 0xe0,
            g: 0x98,
            b: 0xc6,
        }
    }
}

impl ContourPalette {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantizes `t` to a banded intensity in [0, 1].
    ///
    /// Out-of-range and NaN inputs saturate to the nearest band.
    pub fn band(t: f32) -> f32 {
        let level = (t * 255.0) as u8 & BAND_MASK;
        f32::from(level) / 255.0
    }

    /// Opaque color for normalized intensity `t`.
    pub fn color(&self, t: f32) -> Rgba {
        let banded = Self::band(t);
        [
            (banded * f32::from(self.r)) as u8,
            (banded * f32::from(self.g)) as u8,
            (banded * f32::from(self.b)) as u8,
            0xff,
        ]
    }
}
