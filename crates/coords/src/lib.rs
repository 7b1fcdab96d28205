//! Geographic coordinates on sphere-relative scenes.
//!
//! Latitude is measured from the equator toward +Z, longitude from +X toward +Y. Both conversions
//! are plain trigonometry: out-of-range angles are not rejected and simply wrap through the
//! periodicity of sine and cosine. Only [`GeoCoordinate::from_str`] validates latitude, because
//! parsed text usually comes from a person typing coordinates.

pub mod graticule;

use std::fmt;
use std::str::FromStr;

use lunar_core::units::wrap_degrees_180;
use lunar_core::{Point3, Sphere};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use graticule::{GraticuleLine, GraticuleSpec, LineKind, graticule, meridian, parallel};

/// Errors surfaced while parsing coordinates or sampling graticules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("expected `<lat> <lon>` in degrees, got `{0}`")]
    Malformed(String),
    #[error("latitude {0} lies outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("at least 2 samples are required per line, got {0}")]
    TooFewSamples(usize),
    #[error("graticule step must lie in [1, 360] degrees, got {0}")]
    InvalidStep(u32),
}

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Same coordinate with longitude wrapped into `(-180, 180]`.
    pub fn normalized(&self) -> Self {
        Self::new(self.latitude_deg, wrap_degrees_180(self.longitude_deg))
    }

    /// Longitude corrected for a body that has spun `rotation_deg` about its polar axis.
    pub fn with_longitude_offset(&self, rotation_deg: f64) -> Self {
        Self::new(self.latitude_deg, self.longitude_deg - rotation_deg)
    }

    /// Point on the surface of `sphere`.
    pub fn to_point(&self, sphere: &Sphere) -> Point3 {
        self.at_altitude(sphere, 0.0)
    }

    /// Point `altitude` units above the surface of `sphere`.
    pub fn at_altitude(&self, sphere: &Sphere, altitude: f64) -> Point3 {
        let local = spherical_to_cartesian(
            self.latitude_deg,
            self.longitude_deg,
            sphere.radius() + altitude,
        );
        sphere.center() + local.to_vector()
    }

    /// Coordinate of `point` relative to the center of `sphere`.
    pub fn from_point(point: Point3, sphere: &Sphere) -> Self {
        let local = Point3::ORIGIN + (point - sphere.center());
        cartesian_to_spherical(local, sphere.radius())
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° {}°", self.latitude_deg, self.longitude_deg)
    }
}

impl FromStr for GeoCoordinate {
    type Err = CoordinateError;

    /// Parse `"lat lon"` (whitespace or comma separated, `.` as decimal separator).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed(s.to_string());
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .collect();
        let [lat, lon] = parts.as_slice() else {
            return Err(malformed());
        };
        let latitude_deg: f64 = lat.parse().map_err(|_| malformed())?;
        let longitude_deg: f64 = lon.parse().map_err(|_| malformed())?;
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() {
            return Err(malformed());
        }
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude_deg));
        }
        Ok(Self::new(latitude_deg, longitude_deg))
    }
}

/// Convert latitude/longitude in degrees to a point on an origin-centered sphere of `radius`.
pub fn spherical_to_cartesian(lat_deg: f64, lon_deg: f64, radius: f64) -> Point3 {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    Point3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.cos() * lon.sin(),
        radius * lat.sin(),
    )
}

/// Inverse of [`spherical_to_cartesian`] on the shell of `radius`.
///
/// `radius` must be positive. At the poles the longitude is undefined and reported as `0`.
/// Longitude is returned in `(-180, 180]`.
pub fn cartesian_to_spherical(point: Point3, radius: f64) -> GeoCoordinate {
    let lat = (point.z / radius).clamp(-1.0, 1.0).asin();
    let equatorial = point.x.hypot(point.y);
    let lon_deg = if equatorial < lunar_core::constants::EPSILON * radius.max(1.0) {
        0.0
    } else {
        wrap_degrees_180(point.y.atan2(point.x).to_degrees())
    };
    GeoCoordinate::new(lat.to_degrees(), lon_deg)
}
