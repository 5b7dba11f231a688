//! Gaussian jitter via the Box–Muller transform.

use std::f64::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SeedMode;
use crate::prng::Xorshift64;

/// Draws pairs of independent `N(0, scale²)` samples.
///
/// Owns its uniform generator; the seed is fixed at construction and kept
/// so the run can be reported and replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalSampler {
    rng: Xorshift64,
    seed: u64,
}

impl NormalSampler {
    /// Creates a sampler from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xorshift64::new(seed),
            seed,
        }
    }

    /// Creates a sampler according to `mode`, resolving clock seeds once.
    pub fn from_mode(mode: SeedMode) -> Self {
        match mode {
            SeedMode::Fixed(seed) => Self::new(seed),
            SeedMode::Clock => {
                let (rng, seed) = Xorshift64::from_clock();
                log::info!("seeded sampler from wall clock: {seed}");
                Self { rng, seed }
            }
        }
    }

    /// The seed this sampler was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Two independent Gaussian samples with mean 0 and standard deviation `scale`.
    pub fn sample_2d(&mut self, scale: f32) -> Vec2 {
        let u1 = self.rng.next_open01();
        let u2 = self.rng.next_open01();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = TAU * u2;
        let scale = f64::from(scale);
        Vec2::new(
            (scale * r * theta.cos()) as f32,
            (scale * r * theta.sin()) as f32,
        )
    }
}
