//! Snowfall configuration

use crate::constants::*;
use wasm_bindgen::prelude::*;

/// Simulation parameters, fixed once a [`SnowfallCanvas`](crate::SnowfallCanvas)
/// is constructed. Values are taken as given; nothing is range-checked.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowConfig {
    pub max_snowflakes: u32,
    pub accumulation_rate: f32,
    pub max_accumulation_height: f32,
    pub mouse_influence_radius: f32,
    pub wind_force: f32,
    pub wind_decay: f32,
    pub wind_inertia: f32,
    pub wind_friction: f32,
    /// Chance that a deposit is followed by a smoothing pass.
    pub smoothing_probability: f32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            max_snowflakes: DEFAULT_MAX_SNOWFLAKES,
            accumulation_rate: DEFAULT_ACCUMULATION_RATE,
            max_accumulation_height: DEFAULT_MAX_ACCUMULATION_HEIGHT,
            mouse_influence_radius: DEFAULT_MOUSE_INFLUENCE_RADIUS,
            wind_force: DEFAULT_WIND_FORCE,
            wind_decay: DEFAULT_WIND_DECAY,
            wind_inertia: DEFAULT_WIND_INERTIA,
            wind_friction: DEFAULT_WIND_FRICTION,
            smoothing_probability: DEFAULT_SMOOTHING_PROBABILITY,
        }
    }
}

#[wasm_bindgen]
impl SnowConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnowConfig {
    /// Reads a plain JS object with camelCase keys. A bare number is taken as
    /// the snowflake count; anything else falls back to defaults.
    pub fn from_js(value: JsValue) -> Self {
        let mut config = Self::default();

        if !value.is_object() {
            if let Some(count) = value.as_f64() {
                config.max_snowflakes = count as u32;
            }
            return config;
        }

        macro_rules! extract {
            ($field:ident, $key:expr, $ty:ty) => {
                if let Ok(v) = js_sys::Reflect::get(&value, &$key.into()) {
                    if let Some(num) = v.as_f64() {
                        config.$field = num as $ty;
                    }
                }
            };
        }

        extract!(max_snowflakes, "maxSnowflakes", u32);
        extract!(accumulation_rate, "accumulationRate", f32);
        extract!(max_accumulation_height, "maxAccumulationHeight", f32);
        extract!(mouse_influence_radius, "mouseInfluenceRadius", f32);
        extract!(wind_force, "windForce", f32);
        extract!(wind_decay, "windDecay", f32);
        extract!(wind_inertia, "windInertia", f32);
        extract!(wind_friction, "windFriction", f32);
        extract!(smoothing_probability, "smoothingProbability", f32);

        config
    }
}
