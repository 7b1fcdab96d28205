//! Ray–sphere intersection and surface interpolation.
//!
//! Surface interpolation uses the "normalize the lerp" approximation: the two radial unit
//! directions are interpolated linearly, renormalized, and scaled back to the radius. Points
//! therefore stay on the sphere and on the great circle through both endpoints, but are not
//! evenly spaced in angle. The spacing error grows with angular separation (about 4° across a
//! 90° arc) and the interpolation degenerates as the endpoints approach antipodes.

use lunar_core::{DegenerateVectorError, Point3, Ray, Sphere, Vector3};

use crate::{GeometryError, Intersection, NoHit};

/// Radial projection of `point` onto the surface of `sphere`.
pub fn project_onto_sphere(
    point: Point3,
    sphere: &Sphere,
) -> Result<Point3, DegenerateVectorError> {
    let outward = (point - sphere.center()).normalize()?;
    Ok(sphere.center() + outward * sphere.radius())
}

/// Angle in radians between the radial directions of `a` and `b`.
pub fn angular_separation(
    a: Point3,
    b: Point3,
    sphere: &Sphere,
) -> Result<f64, DegenerateVectorError> {
    let ua = (a - sphere.center()).normalize()?;
    let ub = (b - sphere.center()).normalize()?;
    Ok(ua.dot(ub).clamp(-1.0, 1.0).acos())
}

/// Nearest forward hit of `ray` on the outside of `sphere`.
///
/// The ray direction is normalized internally, so the reported `t` is a metric distance whatever
/// the caller supplied. An origin inside the sphere, or a near root behind the origin, gives
/// [`NoHit::BehindOrigin`]; the far root is never used.
pub fn intersect_ray_sphere(ray: &Ray, sphere: &Sphere) -> Intersection {
    let direction = ray.unit_direction();
    let l = sphere.center() - ray.origin();
    let tca = l.dot(direction);
    let d2 = l.length_squared() - tca * tca;
    let r2 = sphere.radius() * sphere.radius();
    if d2 > r2 {
        return Intersection::NoHit(NoHit::Missed);
    }
    let thc = (r2 - d2).sqrt();
    let t = tca - thc;
    if t < 0.0 {
        return Intersection::NoHit(NoHit::BehindOrigin);
    }
    Intersection::Hit {
        point: ray.origin() + direction * t,
        t,
    }
}

/// Surface point a fraction `t` of the way from `a` to `b` (see the module docs for the
/// approximation). `t` is not clamped.
///
/// Fails when either endpoint sits at the center or the interpolated direction vanishes
/// (antipodal endpoints at `t = 0.5`).
pub fn slerp_on_sphere(
    a: Point3,
    b: Point3,
    t: f64,
    sphere: &Sphere,
) -> Result<Point3, DegenerateVectorError> {
    let ua = (a - sphere.center()).normalize()?;
    let ub = (b - sphere.center()).normalize()?;
    interpolate_directions(ua, ub, t, sphere)
}

/// Polyline of `segments + 1` surface points from `a` to `b`, at `t = i / segments`.
///
/// The first and last entries equal [`project_onto_sphere`] of `a` and `b` exactly.
pub fn arc_points(
    a: Point3,
    b: Point3,
    sphere: &Sphere,
    segments: usize,
) -> Result<Vec<Point3>, GeometryError> {
    if segments == 0 {
        return Err(GeometryError::ZeroSegments);
    }
    let ua = (a - sphere.center()).normalize()?;
    let ub = (b - sphere.center()).normalize()?;
    let start = sphere.center() + ua * sphere.radius();
    let end = sphere.center() + ub * sphere.radius();

    let mut points = Vec::with_capacity(segments + 1);
    points.push(start);
    for i in 1..segments {
        let t = i as f64 / segments as f64;
        points.push(interpolate_directions(ua, ub, t, sphere)?);
    }
    points.push(end);
    Ok(points)
}

/// Where a view line from `eye` along `look_direction` meets the sphere, approximately.
///
/// The sphere center is projected onto the view line and that foot point is pushed radially onto
/// the surface. When the line passes through the surface this is the point under the line's
/// closest approach to the center, not the entry point. A line through the center itself lands on
/// the near side, facing `eye`.
pub fn view_surface_point(
    eye: Point3,
    look_direction: Vector3,
    sphere: &Sphere,
) -> Result<Point3, DegenerateVectorError> {
    let look = look_direction.normalize()?;
    let along = (sphere.center() - eye).dot(look);
    let foot = eye + look * along;
    match project_onto_sphere(foot, sphere) {
        Ok(point) => Ok(point),
        Err(_) => Ok(sphere.center() - look * sphere.radius()),
    }
}

fn interpolate_directions(
    ua: Vector3,
    ub: Vector3,
    t: f64,
    sphere: &Sphere,
) -> Result<Point3, DegenerateVectorError> {
    let direction = ua.lerp(ub, t).normalize()?;
    Ok(sphere.center() + direction * sphere.radius())
}
