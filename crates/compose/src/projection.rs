//! Projection rig: how the separation of two surface markers appears from a camera.
//!
//! A plane through the markers' midpoint, perpendicular to the line from the sphere center to the
//! camera, receives the orthogonal projection of each marker. An optional image plane is hit by
//! rays running from each marker toward (and past) the camera, and by the camera's backward ray.

use lunar_config::Rgba;
use lunar_core::{Plane, Point3, Ray, Sphere};
use lunar_geometry::{Intersection, intersect_ray_plane, project_point_onto_plane};
use lunar_orientation::{Axis, Orientation, track_to};
use serde::Serialize;
use tracing::warn;

use crate::ComposeError;
use crate::camera::CameraPlacement;
use crate::composer::{Group, SceneComposer};
use crate::host::{Pose, Primitive, SceneHost};
use crate::style::{
    BLACK, DEFAULT_LINE_RADIUS, DEFAULT_MARKER_SIZE, HEAVY_LINE_RADIUS, LINK_BLUE, PINK, RED, Style,
};

const PROJECTED_LINE_RADIUS: f64 = 0.02;
const PROJECTED_DOT_SIZE: f64 = 0.015;

/// One marker taking part in the rig.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RigMarker {
    pub name: String,
    pub position: Point3,
    pub color: Rgba,
}

/// Everything the rig draws, computed up front.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionLayout {
    pub markers: [RigMarker; 2],
    pub camera: CameraPlacement,
    pub sphere_center: Point3,
    pub midpoint: Point3,
    pub plane: Plane,
    pub plane_orientation: Orientation,
    pub projected: [Point3; 2],
    /// Marker-to-camera rays against the image plane, when one is given.
    pub image_hits: Option<[Intersection; 2]>,
    /// The camera's +Z ray against the image plane.
    pub back_hit: Option<Intersection>,
}

/// Compute the rig for two markers seen from `camera`.
pub fn projection_layout(
    sphere: &Sphere,
    markers: [RigMarker; 2],
    camera: CameraPlacement,
    image_plane: Option<&Plane>,
) -> Result<ProjectionLayout, ComposeError> {
    let midpoint = markers[0].position.midpoint(markers[1].position);
    let normal = (camera.position - sphere.center()).normalize()?;
    let plane = Plane::new(midpoint, normal)?;
    let plane_orientation = track_to(normal, Axis::PosZ, Axis::PosY)?;
    let projected = [
        project_point_onto_plane(markers[0].position, &plane),
        project_point_onto_plane(markers[1].position, &plane),
    ];

    let (image_hits, back_hit) = match image_plane {
        Some(image) => {
            let hit = |from: Point3| -> Result<Intersection, ComposeError> {
                let ray = Ray::toward(from, camera.position)?;
                Ok(intersect_ray_plane(&ray, image))
            };
            let hits = [hit(markers[0].position)?, hit(markers[1].position)?];
            let back = Ray::new(camera.position, camera.back_direction())?;
            (Some(hits), Some(intersect_ray_plane(&back, image)))
        }
        None => (None, None),
    };

    Ok(ProjectionLayout {
        markers,
        camera,
        sphere_center: sphere.center(),
        midpoint,
        plane,
        plane_orientation,
        projected,
        image_hits,
        back_hit,
    })
}

/// Replace the projection group with the objects described by `layout`.
pub fn build_projection<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    layout: &ProjectionLayout,
    plane_size: f64,
) -> Result<(), ComposeError> {
    composer.clear_group(Group::Projection)?;
    let [a, b] = &layout.markers;

    let result = composer.cylinder(
        Group::Projection,
        "Line Blue",
        a.position,
        b.position,
        HEAVY_LINE_RADIUS,
        &Style::for_object("Line Blue", LINK_BLUE),
    );
    composer.or_skip("Line Blue", result)?;

    let result = composer.cylinder(
        Group::Projection,
        "Line Red",
        layout.sphere_center,
        layout.camera.position,
        HEAVY_LINE_RADIUS,
        &Style::for_object("Line Red", RED),
    );
    composer.or_skip("Line Red", result)?;

    composer.upsert(
        Group::Projection,
        "Plane Pink",
        Primitive::Plane {
            pose: Pose::new(layout.midpoint, layout.plane_orientation),
            size: plane_size,
        },
        &Style::new("PinkMaterial", PINK),
    )?;

    for (marker, projected) in layout.markers.iter().zip(layout.projected) {
        let name = format!("{} To Plane", marker.name);
        let style = Style::for_object(&name, marker.color);
        let result = composer.cylinder(
            Group::Projection,
            &name,
            marker.position,
            projected,
            DEFAULT_LINE_RADIUS,
            &style,
        );
        composer.or_skip(&name, result)?;
    }

    let result = composer.cylinder(
        Group::Projection,
        "Line Black",
        layout.projected[0],
        layout.projected[1],
        PROJECTED_LINE_RADIUS,
        &Style::for_object("Line Black", BLACK),
    );
    composer.or_skip("Line Black", result)?;

    let dot_style = Style::new("BlackDotMaterial", BLACK);
    for (i, point) in layout.projected.iter().enumerate() {
        composer.marker(
            Group::Projection,
            &format!("Dot Black {}", i + 1),
            Default::default(),
            PROJECTED_DOT_SIZE,
            Pose::at(*point),
            &dot_style,
        )?;
    }

    if let Some(hits) = &layout.image_hits {
        build_image_hits(composer, layout, hits)?;
    }
    if let Some(back) = layout.back_hit {
        match back {
            Intersection::Hit { point, .. } => {
                let result = composer.cylinder(
                    Group::Projection,
                    "Line Red Back",
                    layout.camera.position,
                    point,
                    DEFAULT_LINE_RADIUS,
                    &Style::for_object("Line Red Back", RED),
                );
                composer.or_skip("Line Red Back", result)?;
                composer.marker(
                    Group::Projection,
                    "Red Ball Back",
                    Default::default(),
                    DEFAULT_MARKER_SIZE,
                    Pose::at(point),
                    &Style::new("HitMaterialBack", RED),
                )?;
            }
            Intersection::NoHit(reason) => {
                warn!(?reason, "camera back ray misses the image plane");
            }
        }
    }
    Ok(())
}

fn build_image_hits<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    layout: &ProjectionLayout,
    hits: &[Intersection; 2],
) -> Result<(), ComposeError> {
    let mut landed = Vec::with_capacity(2);
    for (marker, hit) in layout.markers.iter().zip(hits) {
        let Intersection::Hit { point, .. } = *hit else {
            warn!(marker = %marker.name, ?hit, "marker ray misses the image plane");
            continue;
        };
        let line = format!("Line {} Plane", marker.name);
        let result = composer.cylinder(
            Group::Projection,
            &line,
            marker.position,
            point,
            DEFAULT_LINE_RADIUS,
            &Style::for_object(&line, marker.color),
        );
        composer.or_skip(&line, result)?;
        composer.marker(
            Group::Projection,
            &format!("{} Hit", marker.name),
            Default::default(),
            DEFAULT_MARKER_SIZE,
            Pose::at(point),
            &Style::for_object(&marker.name, marker.color),
        )?;
        landed.push(point);
    }
    if let [first, second] = landed[..] {
        let result = composer.cylinder(
            Group::Projection,
            "Line Black Plane",
            first,
            second,
            PROJECTED_LINE_RADIUS,
            &Style::for_object("Line Black Plane", BLACK),
        );
        composer.or_skip("Line Black Plane", result)?;
    }
    Ok(())
}
