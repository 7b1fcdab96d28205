//! Material styling and the default sizes used across builders.

use lunar_config::Rgba;
use serde::Serialize;

/// Radius of connecting cylinders.
pub const DEFAULT_LINE_RADIUS: f64 = 0.005;
/// Radius of the heavier lines in projection rigs.
pub const HEAVY_LINE_RADIUS: f64 = 0.007;
/// Marker size (sphere radius or cube edge) in scene units.
pub const DEFAULT_MARKER_SIZE: f64 = 0.02;
/// Curve bevel depth as a fraction of the sphere radius.
pub const CURVE_BEVEL_FRACTION: f64 = 0.002;
/// Graticule bevel depth as a fraction of the sphere radius.
pub const GRATICULE_BEVEL_FRACTION: f64 = 0.005;
/// Label text height as a fraction of the sphere radius.
pub const LABEL_SIZE_FRACTION: f64 = 0.1;

pub const DEFAULT_LINE_COLOR: Rgba = [0.2, 0.5, 1.0, 1.0];
pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: Rgba = [0.0, 1.0, 0.0, 1.0];
pub const LINK_BLUE: Rgba = [0.0, 0.3, 1.0, 1.0];
pub const YELLOW: Rgba = [1.0, 1.0, 0.0, 1.0];
pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const PINK: Rgba = [1.0, 0.3, 0.6, 1.0];

/// Material assignment for a created object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub material: String,
    pub color: Rgba,
}

impl Style {
    pub fn new(material: impl Into<String>, color: Rgba) -> Self {
        Self {
            material: material.into(),
            color,
        }
    }

    /// Per-object material, named `"{object}Material"`.
    pub fn for_object(object: &str, color: Rgba) -> Self {
        Self::new(format!("{object}Material"), color)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new("LineCylinderMaterial", DEFAULT_LINE_COLOR)
    }
}
