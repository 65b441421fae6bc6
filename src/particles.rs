//! Snowflake pool

use rand::Rng;

use crate::accumulation::{column_of, AccumulationField};
use crate::config::SnowConfig;
use crate::constants::*;
use crate::wind::WindFrame;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    pub opacity: f32,
    pub settled: bool,
    pub wind_velocity_x: f32,
    pub wind_velocity_y: f32,
}

impl Snowflake {
    /// A flake anywhere on a `width` x `height` surface.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            radius: FLAKE_MIN_RADIUS + rng.gen::<f32>() * FLAKE_RADIUS_RANGE,
            speed: FLAKE_MIN_SPEED + rng.gen::<f32>() * FLAKE_SPEED_RANGE,
            opacity: FLAKE_MIN_OPACITY + rng.gen::<f32>() * FLAKE_OPACITY_RANGE,
            settled: false,
            wind_velocity_x: 0.0,
            wind_velocity_y: 0.0,
        }
    }

    fn apply_wind(&mut self, wind: &WindFrame, config: &SnowConfig) {
        let radius = config.mouse_influence_radius;
        let dx = self.x - wind.pointer_x;
        let dy = self.y - wind.pointer_y;
        let projection = dx * wind.direction_x + dy * wind.direction_y;
        let perpendicular = (dx * dx + dy * dy - projection * projection).max(0.0).sqrt();
        let half_width = (projection * CONE_SPREAD).min(radius * CONE_WIDTH_RATIO);

        if projection <= 0.0 || projection >= radius || perpendicular >= half_width {
            return;
        }

        let strength = (1.0 - projection / radius) * (1.0 - perpendicular / half_width);
        let force = config.wind_force
            * strength
            * (wind.speed / WIND_SPEED_DIVISOR).min(WIND_SPEED_FACTOR_MAX);
        let horizontal = force * (1.0 + wind.direction_x.abs() * HORIZONTAL_BOOST);
        let vertical = force * wind.direction_y.abs() * VERTICAL_SCALE;
        let target_x = wind.direction_x * horizontal;
        let target_y = wind.direction_y * vertical;

        self.wind_velocity_x += (target_x - self.wind_velocity_x) * config.wind_inertia;
        self.wind_velocity_y += (target_y - self.wind_velocity_y) * config.wind_inertia;
        self.x += self.wind_velocity_x;
        self.y += self.wind_velocity_y;
    }
}

/// Surface and wind a particle pass runs against.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    pub width: f32,
    pub height: f32,
    pub wind: &'a WindFrame,
    pub config: &'a SnowConfig,
}

#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    flakes: Vec<Snowflake>,
}

impl ParticleSystem {
    pub fn seeded<R: Rng + ?Sized>(count: usize, width: f32, height: f32, rng: &mut R) -> Self {
        let flakes = (0..count)
            .map(|_| Snowflake::random(rng, width, height))
            .collect();
        Self { flakes }
    }

    pub fn from_flakes(flakes: Vec<Snowflake>) -> Self {
        Self { flakes }
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    /// Advances every live flake one frame. `draw` is called for each flake
    /// that is still falling afterwards; flakes recycled this frame are
    /// skipped. Returns how many flakes settled.
    pub fn step<R, F>(
        &mut self,
        ctx: StepContext<'_>,
        field: &mut AccumulationField,
        rng: &mut R,
        mut draw: F,
    ) -> usize
    where
        R: Rng + ?Sized,
        F: FnMut(&Snowflake),
    {
        let mut settled = 0;

        for flake in self.flakes.iter_mut() {
            if flake.settled {
                continue;
            }

            let ground = ctx.height - field.height_at(column_of(flake.x));
            let recycled = flake.y + flake.radius >= ground;

            if recycled {
                flake.settled = true;
                field.accumulate(
                    column_of(flake.x),
                    ctx.config.accumulation_rate,
                    ctx.config.smoothing_probability,
                    rng,
                );
                settled += 1;

                flake.y = RESPAWN_Y;
                flake.x = rng.gen::<f32>() * ctx.width;
                flake.settled = false;
            } else {
                flake.y += flake.speed;
                flake.x += (flake.y * SWAY_FREQUENCY).sin() * SWAY_AMPLITUDE;

                if ctx.wind.active {
                    flake.apply_wind(ctx.wind, ctx.config);
                }
                flake.wind_velocity_x *= ctx.config.wind_friction;
                flake.wind_velocity_y *= ctx.config.wind_friction;
            }

            if flake.x > ctx.width {
                flake.x = 0.0;
            } else if flake.x < 0.0 {
                flake.x = ctx.width;
            }

            if !recycled {
                draw(flake);
            }
        }

        settled
    }
}
