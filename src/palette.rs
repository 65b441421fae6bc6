//! Canvas fill styles

/// Ground gradient stops, top of the drift to the bottom of the surface.
pub const GROUND_GRADIENT_STOPS: [(f32, &str); 3] = [
    (0.0, "rgba(255, 255, 255, 0.8)"),
    (0.5, "rgba(255, 255, 255, 0.9)"),
    (1.0, "rgba(255, 255, 255, 1)"),
];

pub const STIPPLE_FILL: &str = "rgba(255, 255, 255, 0.3)";

/// Snowflakes are white; only their alpha varies.
pub fn flake_fill(opacity: f32) -> String {
    format!("rgba(255, 255, 255, {opacity})")
}
