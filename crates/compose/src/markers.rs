//! Surface markers and the arcs and links drawn between them.

use lunar_config::{MarkerConfig, Rgba};
use lunar_coords::GeoCoordinate;
use lunar_core::{Point3, Sphere};
use lunar_geometry::arc_points;
use lunar_orientation::{Axis, track_to};

use crate::ComposeError;
use crate::composer::{Group, SceneComposer};
use crate::host::{Handle, Pose, SceneHost};
use crate::style::{CURVE_BEVEL_FRACTION, DEFAULT_MARKER_SIZE, RED, Style};

/// Surface position of `coordinate`, oriented with local +Z pointing away from the center.
pub fn marker_pose(sphere: &Sphere, coordinate: GeoCoordinate) -> Result<Pose, ComposeError> {
    let location = coordinate.to_point(sphere);
    let orientation = track_to(location - sphere.center(), Axis::PosZ, Axis::PosY)?;
    Ok(Pose::new(location, orientation))
}

/// Place (or replace) a marker. Returns its handle and surface position.
pub fn place_marker<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    sphere: &Sphere,
    marker: &MarkerConfig,
) -> Result<(Handle, Point3), ComposeError> {
    let pose = marker_pose(sphere, GeoCoordinate::new(marker.lat, marker.lon))?;
    let style = Style::for_object(&marker.name, marker.color.unwrap_or(RED));
    let handle = composer.marker(
        Group::Markers,
        &marker.name,
        marker.shape,
        marker.size.unwrap_or(DEFAULT_MARKER_SIZE),
        pose,
        &style,
    )?;
    Ok((handle, pose.location))
}

/// Surface curve `Arc_{from}_{to}` between two points on the sphere.
pub fn draw_arc<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    sphere: &Sphere,
    (from, start): (&str, Point3),
    (to, end): (&str, Point3),
    segments: usize,
    color: Rgba,
) -> Result<Handle, ComposeError> {
    let name = format!("Arc_{from}_{to}");
    let points = arc_points(start, end, sphere, segments)?;
    composer.polyline(
        Group::Arcs,
        &name,
        points,
        false,
        sphere.radius() * CURVE_BEVEL_FRACTION,
        &Style::for_object(&name, color),
    )
}

/// Straight cylinder `Line_{from}_{to}` between two points.
pub fn link_markers<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    (from, start): (&str, Point3),
    (to, end): (&str, Point3),
    radius: f64,
    color: Rgba,
) -> Result<Handle, ComposeError> {
    let name = format!("Line_{from}_{to}");
    let style = Style::for_object(&name, color);
    composer.cylinder(Group::Links, &name, start, end, radius, &style)
}
