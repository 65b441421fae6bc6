//! Snowfall constants
//!
//! `DEFAULT_*` values seed [`SnowConfig`](crate::SnowConfig); the rest are
//! fixed tuning constants of the simulation.

// Configuration defaults
pub const DEFAULT_MAX_SNOWFLAKES: u32 = 400;
pub const DEFAULT_ACCUMULATION_RATE: f32 = 0.6;
pub const DEFAULT_MAX_ACCUMULATION_HEIGHT: f32 = 50.0;
pub const DEFAULT_MOUSE_INFLUENCE_RADIUS: f32 = 250.0;
pub const DEFAULT_WIND_FORCE: f32 = 20.0;
pub const DEFAULT_WIND_DECAY: f32 = 0.85;
pub const DEFAULT_WIND_INERTIA: f32 = 0.15;
pub const DEFAULT_WIND_FRICTION: f32 = 0.92;
pub const DEFAULT_SMOOTHING_PROBABILITY: f32 = 0.3;

// Accumulation
pub const DEPOSIT_SPREAD: usize = 20;
pub const SMOOTH_SIDE_WEIGHT: f32 = 0.2;
pub const SMOOTH_CENTER_WEIGHT: f32 = 0.6;

// Snowflakes
pub const FLAKE_MIN_RADIUS: f32 = 1.0;
pub const FLAKE_RADIUS_RANGE: f32 = 3.0;
pub const FLAKE_MIN_SPEED: f32 = 0.5;
pub const FLAKE_SPEED_RANGE: f32 = 2.0;
pub const FLAKE_MIN_OPACITY: f32 = 0.3;
pub const FLAKE_OPACITY_RANGE: f32 = 0.5;
pub const RESPAWN_Y: f32 = -10.0;
pub const SWAY_FREQUENCY: f32 = 0.01;
pub const SWAY_AMPLITUDE: f32 = 0.5;

// Wind cone
pub const CONE_WIDTH_RATIO: f32 = 0.3;
pub const CONE_SPREAD: f32 = 0.4;
pub const WIND_SPEED_DIVISOR: f32 = 10.0;
pub const WIND_SPEED_FACTOR_MAX: f32 = 2.5;
pub const HORIZONTAL_BOOST: f32 = 0.5;
pub const VERTICAL_SCALE: f32 = 0.3;

// Pointer wind
pub const OFF_SURFACE: f32 = -1000.0;
pub const FRAME_UNIT_MS: f64 = 16.0;
pub const MIN_ELAPSED_UNITS: f64 = 0.1;
pub const JITTER_DISTANCE: f32 = 0.1;
pub const POINTER_TO_WIND: f32 = 0.25;
pub const MAX_WIND_SPEED: f32 = 35.0;
pub const WIND_ACTIVE_SPEED: f32 = 0.5;
pub const WIND_HOLD_MS: f64 = 50.0;
pub const WIND_SNAP_SPEED: f32 = 0.1;

// Ground rendering
pub const STIPPLE_STEP: usize = 8;
pub const STIPPLE_SIZE: f64 = 2.0;
