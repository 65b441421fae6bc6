//! Snowdrift - pointer-reactive canvas snowfall with ground accumulation, in WASM

use wasm_bindgen::prelude::*;
use web_sys::console;

pub mod accumulation;
pub mod config;
pub mod constants;
pub mod frame;
pub mod palette;
pub mod particles;
pub mod renderer;
pub mod wind;

pub use accumulation::AccumulationField;
pub use config::SnowConfig;
pub use constants::*;
pub use frame::{FrameStats, Simulation, Surface};
pub use particles::{ParticleSystem, Snowflake};
pub use renderer::{RenderResult, SnowfallCanvas};
pub use wind::{WindFrame, WindState};

#[wasm_bindgen(start)]
pub fn main() {
    console::log_1(&"[Snowdrift] WASM loaded".into());
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
