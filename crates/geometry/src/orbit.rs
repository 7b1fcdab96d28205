//! Keplerian conics drawn around a body: bound ellipses and flyby hyperbolas.
//!
//! Positions use the focal form `r = p / (1 + e cos ν)` with the focus on the body center and
//! periapsis on +X. The orbital plane starts as the XY plane and is tilted about +X by the
//! inclination, so an inclination of 90° puts the orbit in the XZ plane.

use lunar_core::constants::EPSILON;
use lunar_core::{Point3, Vector3};
use serde::Serialize;

use crate::GeometryError;

/// Shape and tilt of a conic orbit. Units follow the scene, angles are degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConicOrbit {
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_deg: f64,
}

impl ConicOrbit {
    /// `semi_major_axis` is the magnitude `|a|` for hyperbolas as well.
    ///
    /// Parabolic orbits (`e == 1`) have no finite semi-major axis and are rejected.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
    ) -> Result<Self, GeometryError> {
        let invalid = GeometryError::InvalidConic {
            semi_major_axis,
            eccentricity,
        };
        let parabolic = (eccentricity - 1.0).abs() < EPSILON;
        if !semi_major_axis.is_finite() || semi_major_axis <= 0.0 {
            return Err(invalid);
        }
        if !eccentricity.is_finite() || eccentricity < 0.0 || parabolic {
            return Err(invalid);
        }
        if !inclination_deg.is_finite() {
            return Err(invalid);
        }
        Ok(Self {
            semi_major_axis,
            eccentricity,
            inclination_deg,
        })
    }

    #[inline]
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    #[inline]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    #[inline]
    pub fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    pub fn is_hyperbolic(&self) -> bool {
        self.eccentricity > 1.0
    }

    /// `p = |a| |1 - e²|`.
    pub fn semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).abs()
    }

    /// Closest approach to the focus.
    pub fn periapsis(&self) -> f64 {
        self.semi_latus_rectum() / (1.0 + self.eccentricity)
    }

    /// Asymptotic true anomaly `acos(-1/e)` of a hyperbola; `None` for closed orbits.
    pub fn true_anomaly_limit(&self) -> Option<f64> {
        self.is_hyperbolic().then(|| (-1.0 / self.eccentricity).acos())
    }

    /// True anomaly in `[0, π]` where the orbit crosses `radius` on its way out.
    ///
    /// `None` when the orbit never reaches that distance (inside periapsis, outside apoapsis, or a
    /// circle of a different radius).
    pub fn anomaly_at_radius(&self, radius: f64) -> Option<f64> {
        if self.eccentricity < EPSILON || !radius.is_finite() || radius <= 0.0 {
            return None;
        }
        let cos_nu = (self.semi_latus_rectum() / radius - 1.0) / self.eccentricity;
        (-1.0..=1.0).contains(&cos_nu).then(|| cos_nu.acos())
    }

    /// Offset from the focus at true anomaly `nu` (radians).
    pub fn offset_at(&self, nu: f64) -> Result<Vector3, GeometryError> {
        let denominator = 1.0 + self.eccentricity * nu.cos();
        if denominator <= EPSILON {
            return Err(GeometryError::BeyondAsymptote(nu));
        }
        let r = self.semi_latus_rectum() / denominator;
        let (x, y) = (r * nu.cos(), r * nu.sin());
        let inclination = self.inclination_deg.to_radians();
        Ok(Vector3::new(x, y * inclination.cos(), y * inclination.sin()))
    }

    /// Position around a body centered at `focus`.
    pub fn position_at(&self, focus: Point3, nu: f64) -> Result<Point3, GeometryError> {
        Ok(focus + self.offset_at(nu)?)
    }

    /// `segments + 1` positions from anomaly `from` to `to`, evenly spaced in anomaly.
    pub fn trail(
        &self,
        focus: Point3,
        from: f64,
        to: f64,
        segments: usize,
    ) -> Result<Vec<Point3>, GeometryError> {
        if segments == 0 {
            return Err(GeometryError::ZeroSegments);
        }
        (0..=segments)
            .map(|i| {
                let t = i as f64 / segments as f64;
                self.position_at(focus, from + (to - from) * t)
            })
            .collect()
    }
}
