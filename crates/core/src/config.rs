//! Reproducible run configuration.
//!
//! A [`SamplerConfig`] captures everything needed to recreate a session:
//! buffer size, noise seed, starting step level, and the presentation knobs.
//! Two identical configs fed the same inputs produce bit-identical frames.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SamplerError;
use crate::langevin::MAX_STEP_LEVEL;
use crate::palette::ContourPalette;
use crate::state::INITIAL_STEP_LEVEL;

pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;
pub const DEFAULT_SEED: u64 = 42;
/// Marker radius in pixels.
pub const DEFAULT_MARKER_RADIUS: u32 = 10;
/// View pan per frame per held button, in field units.
pub const DEFAULT_PAN_SPEED: f32 = 0.02;

/// Largest accepted buffer side; keeps pixel coordinates well inside `i64`.
pub(crate) const MAX_SIDE: usize = 1 << 15;
pub const MAX_MARKER_RADIUS: u32 = 1024;

/// How the noise generator is seeded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// Same seed every run; trajectories are reproducible.
    Fixed(u64),
    /// Seeded from the wall clock once at startup.
    Clock,
}

impl Default for SeedMode {
    fn default() -> Self {
        SeedMode::Fixed(DEFAULT_SEED)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    pub width: usize,
    pub height: usize,
    pub seed: SeedMode,
    pub initial_step_level: i32,
    pub marker_radius: u32,
    pub pan_speed: f32,
    pub palette: ContourPalette,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: SeedMode::default(),
            initial_step_level: INITIAL_STEP_LEVEL,
            marker_radius: DEFAULT_MARKER_RADIUS,
            pan_speed: DEFAULT_PAN_SPEED,
            palette: ContourPalette::default(),
        }
    }
}

impl SamplerConfig {
    /// Default config at the given size and fixed seed.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            seed: SeedMode::Fixed(seed),
            ..Self::default()
        }
    }

    /// Reads overrides from a JSON object, keeping defaults for anything
    /// missing or of the wrong type.
    ///
    /// `seed` may be an unsigned integer or the string `"clock"`.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        let seed = match params.get("seed") {
            Some(Value::String(s)) if s == "clock" => SeedMode::Clock,
            Some(v) => v.as_u64().map(SeedMode::Fixed).unwrap_or(d.seed),
            None => d.seed,
        };
        let palette = params
            .get("palette")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or(d.palette);
        Self {
            width: param_usize(params, "width", d.width),
            height: param_usize(params, "height", d.height),
            seed,
            initial_step_level: param_i32(params, "initial_step_level", d.initial_step_level),
            marker_radius: param_u32(params, "marker_radius", d.marker_radius),
            pan_speed: param_f32(params, "pan_speed", d.pan_speed),
            palette,
        }
    }

    /// Checks dimensions, step level and presentation knobs.
    pub fn validate(&self) -> Result<(), SamplerError> {
        validate_dimensions(self.width, self.height)?;
        if !(-MAX_STEP_LEVEL..=MAX_STEP_LEVEL).contains(&self.initial_step_level) {
            return Err(SamplerError::InvalidConfig(format!(
                "initial_step_level {} outside [-{MAX_STEP_LEVEL}, {MAX_STEP_LEVEL}]",
                self.initial_step_level
            )));
        }
        if !(1..=MAX_MARKER_RADIUS).contains(&self.marker_radius) {
            return Err(SamplerError::InvalidConfig(format!(
                "marker_radius must be in 1..={MAX_MARKER_RADIUS}, got {}",
                self.marker_radius
            )));
        }
        if !(self.pan_speed.is_finite() && self.pan_speed > 0.0) {
            return Err(SamplerError::InvalidConfig(format!(
                "pan_speed must be positive, got {}",
                self.pan_speed
            )));
        }
        Ok(())
    }
}

/// Both sides must be in `1..=MAX_SIDE`.
pub(crate) fn validate_dimensions(width: usize, height: usize) -> Result<(), SamplerError> {
    let side = 1..=MAX_SIDE;
    if side.contains(&width) && side.contains(&height) {
        Ok(())
    } else {
        Err(SamplerError::InvalidDimensions { width, height })
    }
}

fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

fn param_i32(params: &Value, name: &str, default: i32) -> i32 {
    params
        .get(name)
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(default)
}

fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}
