//! Per-frame orchestration: input, one Langevin step, one full render.
//!
//! The [`FrameController`] owns the simulation state, the noise source and
//! the pixel buffer. An embedding application calls [`FrameController::tick`]
//! once per frame with that frame's [`Input`] and then presents
//! [`FrameController::buffer`]. When the display surface pads its rows,
//! [`FrameController::resize_with_pitch`] makes the frame buffer use the
//! surface's pitch so its bytes can be copied across unchanged.

use glam::Vec2;
use serde::Serialize;

use crate::config::{validate_dimensions, SamplerConfig, MAX_MARKER_RADIUS};
use crate::energy::EnergyField;
use crate::error::SamplerError;
use crate::langevin::LangevinIntegrator;
use crate::normal::NormalSampler;
use crate::palette::ContourPalette;
use crate::pixel::PixelBuffer;
use crate::raster::{composite_sprite, draw_circle, fill_landscape};
use crate::state::{Input, SimState};

/// Summary of one completed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    /// 1-based index of the frame just rendered.
    pub frame: u64,
    pub position: Vec2,
    pub step_size: f32,
    pub max_energy: f32,
}

pub struct FrameController {
    state: SimState,
    field: EnergyField,
    integrator: LangevinIntegrator,
    sampler: NormalSampler,
    palette: ContourPalette,
    pan_speed: f32,
    marker_radius: u32,
    marker: PixelBuffer,
    buffer: PixelBuffer,
    frame: u64,
}

impl FrameController {
    /// Validates `config`, seeds the sampler and allocates the frame buffer.
    pub fn new(config: &SamplerConfig) -> Result<Self, SamplerError> {
        config.validate()?;
        let field = EnergyField;
        let sampler = NormalSampler::from_mode(config.seed);
        log::info!(
            "sampler ready: {}x{}, seed {}, step level {}",
            config.width,
            config.height,
            sampler.seed(),
            config.initial_step_level
        );
        Ok(Self {
            state: SimState::new(config.initial_step_level),
            field,
            integrator: LangevinIntegrator::new(field),
            sampler,
            palette: config.palette,
            pan_speed: config.pan_speed,
            marker_radius: config.marker_radius,
            marker: marker_sprite(config.marker_radius)?,
            buffer: PixelBuffer::new(config.width, config.height)?,
            frame: 0,
        })
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// The most recently rendered frame.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Seed of the noise source, for replaying a clock-seeded run.
    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    pub fn marker_radius(&self) -> u32 {
        self.marker_radius
    }

    /// Replaces the frame buffer with a fresh one of the new size.
    ///
    /// Nothing from the old buffer is kept; the next [`tick`](Self::tick)
    /// repaints every pixel.
    /// Sizes are checked against the same limits as [`SamplerConfig::validate`];
    /// on error the old buffer stays in place.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), SamplerError> {
        validate_dimensions(width, height)?;
        self.replace_buffer(PixelBuffer::new(width, height)?);
        Ok(())
    }

    /// Like [`resize`](Self::resize), with rows `pitch` bytes apart.
    pub fn resize_with_pitch(
        &mut self,
        width: usize,
        height: usize,
        pitch: usize,
    ) -> Result<(), SamplerError> {
        validate_dimensions(width, height)?;
        self.replace_buffer(PixelBuffer::with_pitch(width, height, pitch)?);
        Ok(())
    }

    fn replace_buffer(&mut self, buffer: PixelBuffer) {
        log::debug!(
            "resize {}x{} -> {}x{} (pitch {})",
            self.buffer.width(),
            self.buffer.height(),
            buffer.width(),
            buffer.height(),
            buffer.pitch()
        );
        self.buffer = buffer;
    }

    /// Rebuilds the particle marker sprite at a new radius.
    pub fn set_marker_radius(&mut self, radius: u32) -> Result<(), SamplerError> {
        if !(1..=MAX_MARKER_RADIUS).contains(&radius) {
            return Err(SamplerError::InvalidConfig(format!(
                "marker_radius must be in 1..={MAX_MARKER_RADIUS}, got {radius}"
            )));
        }
        self.marker = marker_sprite(radius)?;
        self.marker_radius = radius;
        Ok(())
    }

    /// Applies button states and the placement event to the state.
    pub fn apply_input(&mut self, input: &Input) {
        self.state.view_offset += input.pan_direction() * self.pan_speed;
        self.state.adjust_step_level(input.step_delta());
        if input.do_set {
            self.state.position = self.state.screen_to_field(
                input.set_x,
                input.set_y,
                self.buffer.width(),
                self.buffer.height(),
            );
        }
    }

    /// Moves the particle by one Langevin step.
    pub fn advance(&mut self) {
        let eps = self.state.step_size();
        self.state.position = self
            .integrator
            .step(self.state.position, eps, &mut self.sampler);
    }

    /// Paints the landscape and stamps the marker on the particle.
    pub fn render(&mut self) {
        fill_landscape(&mut self.buffer, &mut self.state, &self.field, &self.palette);
        let (sx, sy) = self.state.field_to_screen(
            self.state.position,
            self.buffer.width(),
            self.buffer.height(),
        );
        let r = i64::from(self.marker_radius);
        composite_sprite(
            &mut self.buffer,
            &self.marker,
            sx.saturating_sub(r),
            sy.saturating_sub(r),
        );
    }

    /// Runs one full frame: input, integrator step, render.
    pub fn tick(&mut self, input: &Input) -> FrameReport {
        self.apply_input(input);
        self.advance();
        self.render();
        self.frame += 1;

        let report = FrameReport {
            frame: self.frame,
            position: self.state.position,
            step_size: self.state.step_size(),
            max_energy: self.state.max_energy_observed,
        };
        log::trace!("{report:?}");
        report
    }
}

/// Transparent `(2r + 1)²` sprite with a white disc of radius `r` centered in it.
fn marker_sprite(radius: u32) -> Result<PixelBuffer, SamplerError> {
    let side = 2 * radius as usize + 1;
    let mut sprite = PixelBuffer::new(side, side)?;
    let r = i64::from(radius);
    draw_circle(&mut sprite, r, r, r);
    Ok(sprite)
}
