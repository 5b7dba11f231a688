//! Closed-form energy landscape: a sum of inverse-square bumps.
//!
//! Each of the four attractors contributes `1 / (1 + s * d²)`, peaked at 1
//! on the attractor and decaying with squared distance `d²`. The gradient is
//! the exact analytic derivative of that sum.
//!
//! Squared distances and denominators are evaluated in `f64` and only the
//! final sums are narrowed to `f32`, so large denominators far from the
//! attractors do not lose precision.

use glam::Vec2;

/// The fixed attractor points of the landscape, in normalized field coordinates.
pub const ATTRACTORS: [Vec2; 4] = [
    Vec2::new(0.3, 0.3),
    Vec2::new(-0.2, -0.2),
    Vec2::new(-0.6, 0.7),
    Vec2::new(0.3, -0.3),
];

/// Bump sharpness `s`: larger values make narrower peaks.
pub const SHARPNESS: f64 = 16.0;

/// The scalar energy field over [`ATTRACTORS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnergyField;

impl EnergyField {
    /// Field value at `(x, y)`, in `(0, 4]`.
    pub fn energy_at(&self, x: f32, y: f32) -> f32 {
        let sum: f64 = ATTRACTORS
            .iter()
            .map(|a| 1.0 / denominator(x, y, *a))
            .sum();
        // Far from every attractor the sum underflows f32; floor it so the
        // field stays strictly positive.
        (sum as f32).max(f32::MIN_POSITIVE)
    }

    /// Analytic gradient of [`EnergyField::energy_at`] at `(x, y)`.
    pub fn gradient_at(&self, x: f32, y: f32) -> Vec2 {
        let (gx, gy) = ATTRACTORS.iter().fold((0.0_f64, 0.0_f64), |(gx, gy), a| {
            let dx = f64::from(x) - f64::from(a.x);
            let dy = f64::from(y) - f64::from(a.y);
            let denom = denominator(x, y, *a);
            let denom_sq = denom * denom;
            (
                gx - 2.0 * SHARPNESS * dx / denom_sq,
                gy - 2.0 * SHARPNESS * dy / denom_sq,
            )
        });
        Vec2::new(gx as f32, gy as f32)
    }

    /// Convenience wrapper taking a point.
    pub fn energy(&self, p: Vec2) -> f32 {
        self.energy_at(p.x, p.y)
    }

    /// Convenience wrapper taking a point.
    pub fn gradient(&self, p: Vec2) -> Vec2 {
        self.gradient_at(p.x, p.y)
    }
}

/// `1 + s * ((x - ax)² + (y - ay)²)` in double precision.
fn denominator(x: f32, y: f32, a: Vec2) -> f64 {
    let dx = f64::from(x) - f64::from(a.x);
    let dy = f64::from(y) - f64::from(a.y);
    1.0 + SHARPNESS * (dx * dx + dy * dy)
}
