//! Compose a whole scene manifest against a host.

use std::collections::BTreeMap;

use lunar_config::{MarkerShape, SceneConfig, SphereConfig};
use lunar_coords::{GeoCoordinate, GraticuleSpec};
use lunar_core::{Plane, Point3, ShapeError, Sphere};
use serde::Serialize;
use tracing::{debug, info};

use crate::ComposeError;
use crate::animation::{RenderSchedule, RotationSchedule, animate_rotation, render_stills};
use crate::camera::{CameraPlacement, draw_sight_lines, draw_view_line, frame_camera};
use crate::composer::{Group, SceneComposer};
use crate::graticule::draw_graticule;
use crate::host::{Pose, SceneHost};
use crate::markers::{draw_arc, link_markers, place_marker};
use crate::orbits::{animate_orbit, build_orbit_rig};
use crate::projection::{ProjectionLayout, RigMarker, build_projection, projection_layout};
use crate::style::{DEFAULT_LINE_COLOR, DEFAULT_LINE_RADIUS, GREEN, RED, Style, YELLOW};

const BODY_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// What a composition run produced.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct SceneSummary {
    pub scene: String,
    pub graticule_lines: usize,
    pub markers: usize,
    pub arcs: usize,
    pub links: usize,
    pub camera: Option<CameraPlacement>,
    pub view_point: Option<Point3>,
    pub sight_hits: usize,
    pub projection: Option<ProjectionLayout>,
    pub keyframes: usize,
    pub renders: usize,
    pub orbits: usize,
    pub orbit_rigs: usize,
    /// Elements left out because their inputs were degenerate, as `"name: reason"`.
    pub skipped: Vec<String>,
}

pub fn sphere_from_config(config: &SphereConfig) -> Result<Sphere, ShapeError> {
    Sphere::new(Point3::from(config.center), config.radius)
}

/// Build every section of `config` through `composer`.
///
/// Each builder replaces the objects it created on a previous run. Elements whose inputs are
/// degenerate (coincident endpoints, antipodal arcs) are skipped and listed in the summary; any
/// other failure aborts the run.
pub fn compose_scene<H: SceneHost>(
    config: &SceneConfig,
    composer: &mut SceneComposer<H>,
) -> Result<SceneSummary, ComposeError> {
    let sphere = sphere_from_config(&config.sphere)?;
    composer.clear_skipped();
    let mut summary = SceneSummary {
        scene: config.name.clone(),
        ..SceneSummary::default()
    };
    ensure_body(composer, &config.sphere.name, &sphere)?;

    if let Some(graticule) = &config.graticule {
        let spec = GraticuleSpec {
            meridian_step_deg: graticule.meridian_step_deg,
            parallel_step_deg: graticule.parallel_step_deg,
            samples: graticule.samples,
        };
        let color = graticule.color.unwrap_or(DEFAULT_LINE_COLOR);
        summary.graticule_lines =
            draw_graticule(composer, &sphere, &spec, graticule.labels, color)?;
    }

    for group in [Group::Markers, Group::Arcs, Group::Links] {
        composer.clear_group(group)?;
    }
    let mut positions = BTreeMap::new();
    for marker in &config.markers {
        let (_, position) = place_marker(composer, &sphere, marker)?;
        positions.insert(marker.name.as_str(), position);
    }
    summary.markers = positions.len();
    let position_of = |name: &str| {
        positions
            .get(name)
            .copied()
            .ok_or_else(|| ComposeError::UnknownMarker(name.to_string()))
    };

    for arc in &config.arcs {
        let from = (arc.from.as_str(), position_of(arc.from.as_str())?);
        let to = (arc.to.as_str(), position_of(arc.to.as_str())?);
        let color = arc.color.unwrap_or(DEFAULT_LINE_COLOR);
        let result = draw_arc(composer, &sphere, from, to, arc.segments, color);
        let name = format!("Arc_{}_{}", arc.from, arc.to);
        if composer.or_skip(&name, result)?.is_some() {
            summary.arcs += 1;
        }
    }

    for link in &config.links {
        let from = (link.from.as_str(), position_of(link.from.as_str())?);
        let to = (link.to.as_str(), position_of(link.to.as_str())?);
        let radius = link.radius.unwrap_or(DEFAULT_LINE_RADIUS);
        let color = link.color.unwrap_or(DEFAULT_LINE_COLOR);
        let result = link_markers(composer, from, to, radius, color);
        let name = format!("Line_{}_{}", link.from, link.to);
        if composer.or_skip(&name, result)?.is_some() {
            summary.links += 1;
        }
    }

    if let Some(camera) = &config.camera {
        let coordinate = GeoCoordinate::new(camera.lat, camera.lon);
        let result = frame_camera(composer, &sphere, &camera.name, coordinate, camera.altitude);
        if let Some(placement) = composer.or_skip(&camera.name, result)? {
            if camera.view_line {
                summary.view_point = Some(draw_view_line(composer, &sphere, &placement, RED)?);
            }
            summary.camera = Some(placement);
        }
    }

    if !config.sight_lines.is_empty() {
        summary.sight_hits = draw_sight_lines(composer, &sphere, &config.sight_lines)?;
    }

    if let Some(projection) = &config.projection {
        let rig_marker = |index: usize| -> Result<RigMarker, ComposeError> {
            let name = &projection.between[index];
            let marker = config
                .marker(name)
                .ok_or_else(|| ComposeError::UnknownMarker(name.clone()))?;
            let fallback = if index == 0 { GREEN } else { YELLOW };
            Ok(RigMarker {
                name: name.clone(),
                position: position_of(name.as_str())?,
                color: marker.color.unwrap_or(fallback),
            })
        };
        let markers = [rig_marker(0)?, rig_marker(1)?];
        let camera = match projection.camera_position {
            Some(position) => {
                CameraPlacement::looking_at(Point3::from(position), sphere.center())?
            }
            None => summary.camera.ok_or(ComposeError::MissingCamera)?,
        };
        let image_plane = projection
            .image_plane
            .as_ref()
            .map(|plane| Plane::new(plane.point.into(), plane.normal.into()))
            .transpose()?;
        let layout = projection_layout(&sphere, markers, camera, image_plane.as_ref())?;
        build_projection(composer, &layout, projection.plane_size)?;
        summary.projection = Some(layout);
    }

    composer.clear_group(Group::Orbits)?;
    for orbit in &config.orbits {
        animate_orbit(composer, &sphere, orbit)?;
        summary.orbits += 1;
    }
    for rig in &config.orbit_rigs {
        build_orbit_rig(composer, &sphere, rig)?;
        summary.orbit_rigs += 1;
    }

    if let Some(rotation) = &config.rotation {
        let schedule = RotationSchedule::from(rotation);
        summary.keyframes = animate_rotation(composer, &rotation.object, &schedule)?;
        if let Some(renders) = &rotation.renders {
            let stills = RenderSchedule::from_config(rotation.start_frame, renders);
            summary.renders = render_stills(composer, &rotation.object, &schedule, &stills)?;
        }
    }

    summary.skipped = composer.skipped().to_vec();
    info!(
        scene = %config.name,
        objects = composer.len(),
        skipped = summary.skipped.len(),
        "scene composed"
    );
    Ok(summary)
}

/// Make sure the body exists, creating a stand-in sphere when the host has none.
fn ensure_body<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    name: &str,
    sphere: &Sphere,
) -> Result<(), ComposeError> {
    if composer.resolve(name).is_ok() {
        return Ok(());
    }
    debug!(body = name, "host has no body object, creating one");
    composer.marker(
        Group::Body,
        name,
        MarkerShape::Sphere,
        sphere.radius(),
        Pose::at(sphere.center()),
        &Style::for_object(name, BODY_COLOR),
    )?;
    Ok(())
}
