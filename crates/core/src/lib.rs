#![deny(unsafe_code)]
//! Core of the Langevin sampler: a particle performing gradient-guided random
//! walk sampling over a fixed 2D energy landscape, rendered in software.
//!
//! Provides the `EnergyField` and its analytic gradient, the Box–Muller
//! `NormalSampler` over a seedable `Xorshift64`, the `LangevinIntegrator`,
//! the pitch-aware `PixelBuffer` and rasterizer, `SimState`/`Input`, and the
//! `FrameController` that ties one frame together.

pub mod config;
pub mod energy;
pub mod error;
pub mod frame;
pub mod langevin;
pub mod normal;
pub mod palette;
pub mod pixel;
pub mod prng;
pub mod raster;
pub mod state;

pub use config::{SamplerConfig, SeedMode};
pub use energy::EnergyField;
pub use error::SamplerError;
pub use frame::{FrameController, FrameReport};
pub use langevin::{step_size, LangevinIntegrator};
pub use normal::NormalSampler;
pub use palette::ContourPalette;
pub use pixel::PixelBuffer;
pub use prng::Xorshift64;
pub use state::{Input, SimState};

pub use glam::Vec2;
