//! Simulation state and the per-frame input snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::langevin::{step_size, MAX_STEP_LEVEL};

/// Starting step-size level; `exp(-26 / 4)` is about 0.0015.
pub const INITIAL_STEP_LEVEL: i32 = -26;

/// Everything that evolves from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    /// Particle location in field coordinates.
    pub position: Vec2,
    /// Log-scale step control; see [`SimState::step_size`].
    pub step_size_level: i32,
    /// Pan applied to the rendered window into field space.
    pub view_offset: Vec2,
    /// Largest energy seen by any landscape scan, used to normalize colors.
    pub max_energy_observed: f32,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(INITIAL_STEP_LEVEL)
    }
}

impl SimState {
    /// Particle at the origin, no pan, running max of 1.
    pub fn new(step_size_level: i32) -> Self {
        Self {
            position: Vec2::ZERO,
            step_size_level: step_size_level.clamp(-MAX_STEP_LEVEL, MAX_STEP_LEVEL),
            view_offset: Vec2::ZERO,
            max_energy_observed: 1.0,
        }
    }

    /// Current Langevin step size, always positive.
    pub fn step_size(&self) -> f32 {
        step_size(self.step_size_level)
    }

    /// Shifts the step-size level by `delta`, keeping it representable.
    pub fn adjust_step_level(&mut self, delta: i32) {
        self.step_size_level = self
            .step_size_level
            .saturating_add(delta)
            .clamp(-MAX_STEP_LEVEL, MAX_STEP_LEVEL);
    }

    /// Maps a screen pixel to field coordinates under the current view offset.
    pub fn screen_to_field(&self, sx: i64, sy: i64, width: usize, height: usize) -> Vec2 {
        Vec2::new(
            2.0 * sx as f32 / width as f32 - 1.0,
            2.0 * sy as f32 / height as f32 - 1.0,
        ) + self.view_offset
    }

    /// Maps a field point to the screen pixel containing it.
    pub fn field_to_screen(&self, p: Vec2, width: usize, height: usize) -> (i64, i64) {
        let local = p - self.view_offset;
        let sx = (width as f32 * (local.x + 1.0) / 2.0).floor();
        let sy = (height as f32 * (local.y + 1.0) / 2.0).floor();
        // `as` saturates, so wildly distant particles land far off-screen.
        (sx as i64, sy as i64)
    }
}

/// Button states and one-shot events for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub increase_step: bool,
    pub decrease_step: bool,
    /// Target screen column for a direct placement.
    pub set_x: i64,
    /// Target screen row for a direct placement.
    pub set_y: i64,
    /// When set, the particle jumps to `(set_x, set_y)` this frame.
    pub do_set: bool,
}

impl Input {
    /// An input whose only event is placing the particle at a screen pixel.
    pub fn place(set_x: i64, set_y: i64) -> Self {
        Self {
            set_x,
            set_y,
            do_set: true,
            ..Self::default()
        }
    }

    /// Net pan direction: -1, 0 or +1 on each axis, screen-down positive.
    pub fn pan_direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec2::new(
            axis(self.move_left, self.move_right),
            axis(self.move_up, self.move_down),
        )
    }

    /// Net step-level change: -1, 0 or +1.
    pub fn step_delta(&self) -> i32 {
        i32::from(self.increase_step) - i32::from(self.decrease_step)
    }
}
