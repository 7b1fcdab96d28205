//! Plane and sphere geometry for sphere-relative scenes.
//!
//! Every routine here is a pure function of its inputs. Misses are reported as
//! [`Intersection::NoHit`] rather than errors; degenerate inputs surface as
//! [`DegenerateVectorError`](lunar_core::DegenerateVectorError).

pub mod orbit;
pub mod plane;
pub mod segment;
pub mod sphere;

use lunar_core::{DegenerateVectorError, Point3};
use serde::Serialize;
use thiserror::Error;

pub use orbit::ConicOrbit;
pub use plane::{intersect_ray_plane, project_point_onto_plane, signed_distance};
pub use segment::{CylinderPose, cylinder_between};
pub use sphere::{
    angular_separation, arc_points, intersect_ray_sphere, project_onto_sphere, slerp_on_sphere,
    view_surface_point,
};

/// Errors surfaced by geometry routines that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error(transparent)]
    Degenerate(#[from] DegenerateVectorError),
    #[error("arc needs at least one segment")]
    ZeroSegments,
    #[error(
        "conic needs a positive semi-major axis and an eccentricity >= 0 other than 1, got a = {semi_major_axis}, e = {eccentricity}"
    )]
    InvalidConic {
        semi_major_axis: f64,
        eccentricity: f64,
    },
    #[error("true anomaly {0} rad lies on or beyond the hyperbola's asymptote")]
    BeyondAsymptote(f64),
}

/// Why a ray produced no usable intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoHit {
    /// Ray runs parallel to the plane.
    Parallel,
    /// The intersection lies behind the ray origin (or the origin is inside the sphere).
    BehindOrigin,
    /// The ray passes the sphere without touching it.
    Missed,
}

/// Outcome of a ray intersection query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Intersection {
    Hit { point: Point3, t: f64 },
    NoHit(NoHit),
}

impl Intersection {
    pub fn point(&self) -> Option<Point3> {
        match self {
            Intersection::Hit { point, .. } => Some(*point),
            Intersection::NoHit(_) => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Intersection::Hit { .. })
    }
}
