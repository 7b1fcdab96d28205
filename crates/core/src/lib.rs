//! Core constants, value types, and shared primitives for the lunar scene toolkit.

pub mod shapes;
pub mod vector;

pub use shapes::{Plane, Ray, ShapeError, Sphere};
pub use vector::{DegenerateVectorError, Point3, Vector3, lerp, normalize};

/// Numeric thresholds shared by every geometry routine.
pub mod constants {
    /// Magnitude below which a vector is treated as degenerate.
    pub const EPSILON: f64 = 1.0e-6;
    /// Fraction of the sphere radius used to lift labels off the surface.
    pub const LABEL_OFFSET_FRACTION: f64 = 0.05;
}

/// Angle helpers.
pub mod units {
    /// Wrap an angle in degrees into `[0, 360)`.
    #[inline]
    pub fn wrap_degrees_360(deg: f64) -> f64 {
        let wrapped = deg.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }

    /// Wrap an angle in degrees into `(-180, 180]`.
    #[inline]
    pub fn wrap_degrees_180(deg: f64) -> f64 {
        let wrapped = wrap_degrees_360(deg);
        if wrapped > 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        }
    }

    /// Full turn in radians.
    pub const FULL_TURN_RAD: f64 = std::f64::consts::TAU;
}
