//! Owned RGBA8 pixel buffer with an explicit row pitch.
//!
//! Pixels are addressed as `row * pitch + col * BYTES_PER_PIXEL`; the pitch
//! may exceed `width * 4` when the display surface pads its rows, so no code
//! in this crate assumes tightly packed rows.

use crate::error::SamplerError;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A single pixel in R, G, B, A byte order.
pub type Rgba = [u8; 4];

/// Fully transparent black.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Opaque white.
pub const WHITE: Rgba = [0xff, 0xff, 0xff, 0xff];

/// A rectangular grid of RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pitch: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a tightly packed, fully transparent buffer.
    ///
    /// Returns `SamplerError::InvalidDimensions` if either dimension is zero
    /// or the byte size overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, SamplerError> {
        let pitch = width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or(SamplerError::InvalidDimensions { width, height })?;
        Self::with_pitch(width, height, pitch)
    }

    /// Allocates a transparent buffer whose rows are `pitch` bytes apart.
    ///
    /// Returns `SamplerError::InvalidPitch` if `pitch < width * 4`.
    pub fn with_pitch(width: usize, height: usize, pitch: usize) -> Result<Self, SamplerError> {
        if width == 0 || height == 0 {
            return Err(SamplerError::InvalidDimensions { width, height });
        }
        let min = width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or(SamplerError::InvalidDimensions { width, height })?;
        if pitch < min {
            return Err(SamplerError::InvalidPitch { pitch, min });
        }
        let len = pitch
            .checked_mul(height)
            .ok_or(SamplerError::InvalidDimensions { width, height })?;
        log::debug!("allocating {width}x{height} pixel buffer (pitch {pitch})");
        Ok(Self {
            width,
            height,
            pitch,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn bytes_per_pixel(&self) -> usize {
        BYTES_PER_PIXEL
    }

    /// Raw bytes including any row padding, for handing to a display surface.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Byte offset of the pixel at `(row, col)`.
    pub fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({col}, {row}) out of bounds for {}x{} buffer",
            self.width,
            self.height
        );
        row * self.pitch + col * BYTES_PER_PIXEL
    }

    /// Reads the pixel at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Rgba {
        let i = self.offset(row, col);
        let mut px = TRANSPARENT;
        px.copy_from_slice(&self.data[i..i + BYTES_PER_PIXEL]);
        px
    }

    /// Writes the pixel at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, px: Rgba) {
        let i = self.offset(row, col);
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&px);
    }

    /// The visible pixels of row `row`, excluding padding.
    pub fn row(&self, row: usize) -> &[u8] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.width * BYTES_PER_PIXEL]
    }

    /// Mutable view of the visible pixels of row `row`.
    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = self.offset(row, 0);
        let end = start + self.width * BYTES_PER_PIXEL;
        &mut self.data[start..end]
    }

    /// Sets every visible pixel to `px`. Padding bytes are left alone.
    pub fn fill(&mut self, px: Rgba) {
        for row in 0..self.height {
            self.row_mut(row)
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .for_each(|dst| dst.copy_from_slice(&px));
        }
    }

    /// Copies the visible pixels into a tightly packed `width * height * 4` vector.
    pub fn to_packed_rgba(&self) -> Vec<u8> {
        (0..self.height)
            .flat_map(|row| self.row(row).iter().copied())
            .collect()
    }
}
