//! Per-frame sequencing
//!
//! [`Simulation`] owns every piece of mutable state. The host calls
//! [`Simulation::tick`] once per animation frame with a [`Surface`] to draw on
//! and schedules the next frame itself.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::accumulation::AccumulationField;
use crate::config::SnowConfig;
use crate::constants::STIPPLE_STEP;
use crate::particles::{ParticleSystem, StepContext};
use crate::wind::WindState;

/// The drawing operations one frame needs.
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);

    /// Fills the area under `skyline` down to `bottom` with the ground
    /// gradient running from `gradient_top` to `bottom`.
    fn fill_ground(&mut self, skyline: &[(f32, f32)], bottom: f32, gradient_top: f32);

    /// Only called after `fill_ground` in the same frame.
    fn fill_stipple(&mut self, x: f32, y: f32);

    fn fill_flake(&mut self, x: f32, y: f32, radius: f32, opacity: f32);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub settled: u32,
    pub wind: f32,
    pub particle_count: u32,
}

pub struct Simulation<R = SmallRng> {
    config: SnowConfig,
    width: f32,
    height: f32,
    field: AccumulationField,
    wind: WindState,
    particles: ParticleSystem,
    rng: R,
    skyline: Vec<(f32, f32)>,
}

impl Simulation<SmallRng> {
    pub fn new(config: SnowConfig, width: f32, height: f32, now: f64, seed: u64) -> Self {
        Self::with_rng(config, width, height, now, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Sizes the field and seeds the full snowflake pool.
    pub fn with_rng(config: SnowConfig, width: f32, height: f32, now: f64, mut rng: R) -> Self {
        let particles =
            ParticleSystem::seeded(config.max_snowflakes as usize, width, height, &mut rng);
        Self {
            config,
            width,
            height,
            field: AccumulationField::for_surface(width, config.max_accumulation_height),
            wind: WindState::new(config.wind_decay, now),
            particles,
            rng,
            skyline: Vec::new(),
        }
    }

    pub fn config(&self) -> &SnowConfig {
        &self.config
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn field(&self) -> &AccumulationField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut AccumulationField {
        &mut self.field
    }

    pub fn wind(&self) -> &WindState {
        &self.wind
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSystem {
        &mut self.particles
    }

    /// New surface size. Accumulated snow is discarded.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.field = AccumulationField::for_surface(width, self.config.max_accumulation_height);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, now: f64) {
        self.wind.pointer_move(x, y, now);
    }

    pub fn pointer_leave(&mut self) {
        self.wind.pointer_leave();
    }

    pub fn tick<S: Surface + ?Sized>(&mut self, now: f64, surface: &mut S) -> FrameStats {
        surface.clear(self.width, self.height);
        self.draw_ground(surface);

        let wind = self.wind.frame(now);
        let ctx = StepContext {
            width: self.width,
            height: self.height,
            wind: &wind,
            config: &self.config,
        };
        let settled = self.particles.step(ctx, &mut self.field, &mut self.rng, |flake| {
            surface.fill_flake(flake.x, flake.y, flake.radius, flake.opacity)
        });

        if wind.decays {
            self.wind.decay_step();
        }

        FrameStats {
            settled: settled as u32,
            wind: wind.speed,
            particle_count: self.particles.len() as u32,
        }
    }

    fn draw_ground<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.field.is_empty() {
            return;
        }

        let columns = self.width.max(0.0).ceil() as usize;
        let field = &self.field;
        let bottom = self.height;
        self.skyline.clear();
        self.skyline.extend(
            (0..columns).map(|x| (x as f32, bottom - field.height_at(x as isize))),
        );
        surface.fill_ground(
            &self.skyline,
            self.height,
            self.height - self.field.max_height(),
        );

        for (x, &depth) in self.field.heights().iter().enumerate().step_by(STIPPLE_STEP) {
            if depth > 0.0 {
                surface.fill_stipple(x as f32, self.height - depth);
            }
        }
    }
}
