//! Unadjusted Langevin step over the energy field.
//!
//! One step moves the particle by `ε · ∇E(x)` plus Gaussian jitter with
//! standard deviation `√ε`. The drift follows the gradient uphill, so the
//! walker settles around the bump peaks: they act as the wells of the
//! sampled distribution. There is no Metropolis correction, so detailed
//! balance holds only approximately and shrinks with `ε`.

use glam::Vec2;

use crate::energy::EnergyField;
use crate::normal::NormalSampler;

/// Exponent per step-size level: `ε = exp(level · CHANGE_MODIFIER)`.
pub const CHANGE_MODIFIER: f64 = 0.25;

/// Levels beyond this magnitude would overflow or underflow `ε` in `f32`.
pub const MAX_STEP_LEVEL: i32 = 320;

/// Step size for an integer level. Always finite and strictly positive for
/// levels in `[-MAX_STEP_LEVEL, MAX_STEP_LEVEL]`.
pub fn step_size(level: i32) -> f32 {
    (f64::from(level) * CHANGE_MODIFIER).exp() as f32
}

/// Advances a single particle through the energy landscape.
#[derive(Debug, Clone, Copy, Default)]
pub struct LangevinIntegrator {
    field: EnergyField,
}

impl LangevinIntegrator {
    pub fn new(field: EnergyField) -> Self {
        Self { field }
    }

    /// The deterministic part of a step: `ε · ∇E(position)`.
    pub fn drift(&self, position: Vec2, step_size: f32) -> Vec2 {
        step_size * self.field.gradient(position)
    }

    /// One full step: drift plus `N(0, ε)` jitter on each axis.
    pub fn step(&self, position: Vec2, step_size: f32, sampler: &mut NormalSampler) -> Vec2 {
        let drift = self.drift(position, step_size);
        let jitter = sampler.sample_2d(step_size.sqrt());
        position + drift + jitter
    }
}
