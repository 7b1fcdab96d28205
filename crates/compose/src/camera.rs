//! Camera framing, the camera's view line, and observer sight lines.

use lunar_config::{Rgba, SightLineConfig};
use lunar_coords::GeoCoordinate;
use lunar_core::{Point3, Ray, Sphere, Vector3};
use lunar_geometry::{Intersection, intersect_ray_sphere, view_surface_point};
use lunar_orientation::{Axis, Orientation, track_to};
use serde::Serialize;
use tracing::{debug, warn};

use crate::ComposeError;
use crate::composer::{Group, SceneComposer};
use crate::host::{Pose, Primitive, SceneHost};
use crate::style::{CURVE_BEVEL_FRACTION, DEFAULT_MARKER_SIZE, RED, Style, YELLOW};

/// Where the camera sits and how it is turned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPlacement {
    pub position: Point3,
    pub orientation: Orientation,
}

impl CameraPlacement {
    /// Camera looking from `position` at `target` (local -Z forward, +Y up).
    pub fn looking_at(position: Point3, target: Point3) -> Result<Self, ComposeError> {
        let orientation = track_to(target - position, Axis::NegZ, Axis::PosY)?;
        Ok(Self {
            position,
            orientation,
        })
    }

    /// Unit view direction (the camera's local -Z).
    pub fn look_direction(&self) -> Vector3 {
        self.orientation.rotate(-Vector3::Z)
    }

    /// The camera's local +Z, pointing backwards out of the lens.
    pub fn back_direction(&self) -> Vector3 {
        self.orientation.rotate(Vector3::Z)
    }
}

/// Placement `altitude` above `coordinate`, looking at the sphere center.
pub fn camera_placement(
    sphere: &Sphere,
    coordinate: GeoCoordinate,
    altitude: f64,
) -> Result<CameraPlacement, ComposeError> {
    let position = coordinate.at_altitude(sphere, altitude);
    CameraPlacement::looking_at(position, sphere.center())
}

/// Create (or move) the camera named `name` above `coordinate`.
pub fn frame_camera<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    sphere: &Sphere,
    name: &str,
    coordinate: GeoCoordinate,
    altitude: f64,
) -> Result<CameraPlacement, ComposeError> {
    let placement = camera_placement(sphere, coordinate, altitude)?;
    let pose = Pose::new(placement.position, placement.orientation);
    composer.upsert(
        Group::Camera,
        name,
        Primitive::Camera { pose },
        &Style::for_object(name, [1.0; 4]),
    )?;
    debug!(
        camera = name,
        lat = coordinate.latitude_deg,
        lon = coordinate.longitude_deg,
        altitude,
        "camera framed"
    );
    Ok(placement)
}

/// Draw the camera's look line to the surface and mark where it lands.
pub fn draw_view_line<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    sphere: &Sphere,
    camera: &CameraPlacement,
    color: Rgba,
) -> Result<Point3, ComposeError> {
    let landing = view_surface_point(camera.position, camera.look_direction(), sphere)?;
    composer.polyline(
        Group::Camera,
        "Camera_Look_Line",
        vec![camera.position, landing],
        false,
        sphere.radius() * CURVE_BEVEL_FRACTION,
        &Style::for_object("Camera_Look_Line", color),
    )?;
    composer.marker(
        Group::Camera,
        "Camera_Look_Point",
        Default::default(),
        DEFAULT_MARKER_SIZE,
        Pose::at(landing),
        &Style::for_object("Camera_Look_Point", RED),
    )?;
    Ok(landing)
}

/// Cast each observer's sight line and mark where it first meets the sphere.
///
/// Lines are drawn `length` units toward the target whether or not they hit. Returns the number
/// of hits; misses and coincident observer/target pairs are logged and skipped.
pub fn draw_sight_lines<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    sphere: &Sphere,
    sight_lines: &[SightLineConfig],
) -> Result<usize, ComposeError> {
    composer.clear_group(Group::SightLines)?;
    let mut hits = 0;
    for sight in sight_lines {
        let start = Point3::from(sight.position);
        let target = Point3::from(sight.target);
        let line_name = format!("{}_Line", sight.name);
        let ray = Ray::toward(start, target).map_err(ComposeError::from);
        let Some(ray) = composer.or_skip(&line_name, ray)? else {
            continue;
        };
        composer.polyline(
            Group::SightLines,
            &line_name,
            vec![start, ray.at(sight.length)],
            false,
            sphere.radius() * CURVE_BEVEL_FRACTION,
            &Style::for_object(&line_name, YELLOW),
        )?;
        match intersect_ray_sphere(&ray, sphere) {
            Intersection::Hit { point, .. } => {
                let hit_name = format!("{}_Hit", sight.name);
                composer.marker(
                    Group::SightLines,
                    &hit_name,
                    Default::default(),
                    DEFAULT_MARKER_SIZE,
                    Pose::at(point),
                    &Style::for_object(&hit_name, RED),
                )?;
                hits += 1;
            }
            Intersection::NoHit(reason) => {
                warn!(observer = %sight.name, ?reason, "sight line does not reach the sphere");
            }
        }
    }
    Ok(hits)
}
