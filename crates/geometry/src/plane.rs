//! Point-to-plane projection and ray–plane intersection.

use lunar_core::constants::EPSILON;
use lunar_core::{Plane, Point3, Ray};

use crate::{Intersection, NoHit};

/// Signed distance of `point` above `plane` along its normal.
#[inline]
pub fn signed_distance(point: Point3, plane: &Plane) -> f64 {
    (point - plane.point()).dot(plane.normal())
}

/// Orthogonal projection of `point` onto `plane`.
pub fn project_point_onto_plane(point: Point3, plane: &Plane) -> Point3 {
    point - plane.normal() * signed_distance(point, plane)
}

/// Forward intersection of `ray` with `plane`.
///
/// Unlike the sphere query, the direction is used as supplied: `t` is measured in units of
/// `ray.direction()`, so it is a metric distance only for unit directions. Parallel rays and
/// planes behind the origin yield [`NoHit`].
pub fn intersect_ray_plane(ray: &Ray, plane: &Plane) -> Intersection {
    let denom = ray.direction().dot(plane.normal());
    if denom.abs() < EPSILON {
        return Intersection::NoHit(NoHit::Parallel);
    }
    let t = (plane.point() - ray.origin()).dot(plane.normal()) / denom;
    if t < 0.0 {
        return Intersection::NoHit(NoHit::BehindOrigin);
    }
    Intersection::Hit {
        point: ray.at(t),
        t,
    }
}
