//! Pointer-driven wind
//!
//! Pointer samples set the wind velocity directly; between samples it decays
//! toward zero. Timestamps are milliseconds on the host's monotonic clock.

use crate::constants::*;

/// Wind as seen by one simulation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindFrame {
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub speed: f32,
    pub pointer_x: f32,
    pub pointer_y: f32,
    /// Unit direction, zero unless `active`.
    pub direction_x: f32,
    pub direction_y: f32,
    /// Particles receive wind this frame.
    pub active: bool,
    /// The wind vector decays at the end of this frame.
    pub decays: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct WindState {
    velocity_x: f32,
    velocity_y: f32,
    pointer_x: f32,
    pointer_y: f32,
    prev_x: f32,
    prev_y: f32,
    prev_sample_time: f64,
    last_movement: f64,
    decay: f32,
}

impl WindState {
    pub fn new(decay: f32, now: f64) -> Self {
        Self {
            velocity_x: 0.0,
            velocity_y: 0.0,
            pointer_x: OFF_SURFACE,
            pointer_y: OFF_SURFACE,
            prev_x: OFF_SURFACE,
            prev_y: OFF_SURFACE,
            prev_sample_time: now,
            last_movement: 0.0,
            decay,
        }
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.velocity_x, self.velocity_y)
    }

    pub fn speed(&self) -> f32 {
        self.velocity_x.hypot(self.velocity_y)
    }

    pub fn pointer(&self) -> (f32, f32) {
        (self.pointer_x, self.pointer_y)
    }

    pub fn on_surface(&self) -> bool {
        self.pointer_x != OFF_SURFACE && self.pointer_y != OFF_SURFACE
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, now: f64) {
        self.prev_x = self.pointer_x;
        self.prev_y = self.pointer_y;
        self.pointer_x = x;
        self.pointer_y = y;

        if self.prev_x != OFF_SURFACE && self.prev_y != OFF_SURFACE {
            let elapsed = ((now - self.prev_sample_time) / FRAME_UNIT_MS).max(MIN_ELAPSED_UNITS);
            let dx = self.pointer_x - self.prev_x;
            let dy = self.pointer_y - self.prev_y;
            let distance = dx.hypot(dy);

            if distance > JITTER_DISTANCE {
                let speed = distance / elapsed as f32;
                let wind_speed = (speed * POINTER_TO_WIND).min(MAX_WIND_SPEED);
                self.velocity_x = dx / distance * wind_speed;
                self.velocity_y = dy / distance * wind_speed;
                self.last_movement = now;
            } else {
                self.velocity_x = 0.0;
                self.velocity_y = 0.0;
            }
        }

        self.prev_sample_time = now;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_x = OFF_SURFACE;
        self.pointer_y = OFF_SURFACE;
        self.prev_x = OFF_SURFACE;
        self.prev_y = OFF_SURFACE;
        self.decay_step();
    }

    /// Scales the velocity by the decay factor; snaps it to zero when it was
    /// already below the snap threshold.
    pub fn decay_step(&mut self) {
        let speed = self.speed();
        self.velocity_x *= self.decay;
        self.velocity_y *= self.decay;
        if speed < WIND_SNAP_SPEED {
            self.velocity_x = 0.0;
            self.velocity_y = 0.0;
        }
    }

    pub fn frame(&self, now: f64) -> WindFrame {
        let speed = self.speed();
        let active = speed > WIND_ACTIVE_SPEED && self.on_surface();
        let decays = speed < WIND_ACTIVE_SPEED || now - self.last_movement > WIND_HOLD_MS;
        let (direction_x, direction_y) = if active {
            (self.velocity_x / speed, self.velocity_y / speed)
        } else {
            (0.0, 0.0)
        };

        WindFrame {
            velocity_x: self.velocity_x,
            velocity_y: self.velocity_y,
            speed,
            pointer_x: self.pointer_x,
            pointer_y: self.pointer_y,
            direction_x,
            direction_y,
            active,
            decays,
        }
    }
}
