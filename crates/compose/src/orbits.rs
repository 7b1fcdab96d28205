//! Bodies moving along conic orbits, and rigs that carry an object around on a spinning parent.

use std::f64::consts::TAU;

use lunar_config::{MarkerShape, OrbitConfig, OrbitRigConfig, Rgba};
use lunar_core::{Point3, Sphere, Vector3};
use lunar_geometry::ConicOrbit;
use lunar_orientation::{Axis, Orientation, track_to};
use serde::Serialize;
use tracing::{debug, info};

use crate::ComposeError;
use crate::animation::{RotationSchedule, frame_steps};
use crate::composer::{Group, SceneComposer};
use crate::host::{Channel, Pose, Primitive, SceneHost};
use crate::style::{CURVE_BEVEL_FRACTION, RED, Style, YELLOW};

/// Default radius of an orbiting body.
pub const DEFAULT_ORBITER_SIZE: f64 = 0.05;
/// Default radius of the marker a rig carries.
pub const DEFAULT_RIG_SIZE: f64 = 0.1;
/// A flyby without a trail radius enters at this multiple of `max(|a|, periapsis)`.
pub const TRAIL_RADIUS_FACTOR: f64 = 5.0;

/// True-anomaly interval an orbiting body covers over its frame range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitSweep {
    pub from_anomaly: f64,
    pub to_anomaly: f64,
}

impl OrbitSweep {
    /// Anomaly at fraction `t` of the sweep.
    pub fn anomaly_at(&self, t: f64) -> f64 {
        self.from_anomaly + (self.to_anomaly - self.from_anomaly) * t
    }
}

/// One full revolution from `start_anomaly` for closed orbits.
///
/// A hyperbola is swept inbound to outbound, from `+ν` down to `-ν` where `ν` is the anomaly at
/// which it crosses `trail_radius`.
pub fn orbit_sweep(
    orbit: &ConicOrbit,
    start_anomaly: f64,
    trail_radius: Option<f64>,
) -> Result<OrbitSweep, ComposeError> {
    if !orbit.is_hyperbolic() {
        return Ok(OrbitSweep {
            from_anomaly: start_anomaly,
            to_anomaly: start_anomaly + TAU,
        });
    }
    let radius = trail_radius.unwrap_or_else(|| {
        TRAIL_RADIUS_FACTOR * orbit.semi_major_axis().max(orbit.periapsis())
    });
    let limit = orbit
        .anomaly_at_radius(radius)
        .ok_or(ComposeError::OrbitCutoff(radius))?;
    Ok(OrbitSweep {
        from_anomaly: limit,
        to_anomaly: -limit,
    })
}

/// Orientation that points a body's local -Z at the orbit focus.
fn facing(position: Point3, focus: Point3) -> Result<Orientation, ComposeError> {
    Ok(track_to(focus - position, Axis::NegZ, Axis::PosY)?)
}

/// Draw the trail of `config`, place its body, and key it along the orbit.
///
/// Returns the number of frames keyed.
pub fn animate_orbit<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    sphere: &Sphere,
    config: &OrbitConfig,
) -> Result<usize, ComposeError> {
    let orbit = ConicOrbit::new(
        config.semi_major_axis,
        config.eccentricity,
        config.inclination_deg,
    )?;
    let sweep = orbit_sweep(
        &orbit,
        config.start_anomaly_deg.to_radians(),
        config.trail_radius,
    )?;
    let focus = sphere.center();
    let fallback: Rgba = if orbit.is_hyperbolic() { RED } else { YELLOW };
    let color = config.color.unwrap_or(fallback);

    let trail_name = format!("{}_Trail", config.name);
    let trail = orbit.trail(
        focus,
        sweep.from_anomaly,
        sweep.to_anomaly,
        config.trail_segments,
    )?;
    composer.polyline(
        Group::Orbits,
        &trail_name,
        trail,
        !orbit.is_hyperbolic(),
        sphere.radius() * CURVE_BEVEL_FRACTION,
        &Style::for_object(&trail_name, color),
    )?;

    let start = orbit.position_at(focus, sweep.from_anomaly)?;
    composer.marker(
        Group::Orbits,
        &config.name,
        MarkerShape::Sphere,
        config.size.unwrap_or(DEFAULT_ORBITER_SIZE),
        Pose::new(start, facing(start, focus)?),
        &Style::for_object(&config.name, color),
    )?;

    let frames = frame_steps(config.start_frame, config.end_frame, config.step);
    let first = f64::from(config.start_frame);
    let span = f64::from(config.end_frame) - first;
    for frame in &frames {
        let t = if span > 0.0 {
            (f64::from(*frame) - first) / span
        } else {
            0.0
        };
        let position = orbit.position_at(focus, sweep.anomaly_at(t))?;
        composer.key_pose(&config.name, *frame, position, facing(position, focus)?)?;
    }
    info!(
        orbit = %config.name,
        eccentricity = orbit.eccentricity(),
        hyperbolic = orbit.is_hyperbolic(),
        keys = frames.len(),
        "orbit keyed"
    );
    Ok(frames.len())
}

/// Build the spinning parent of `rig` and hang its object off it.
///
/// The parent empty sits at the sphere center and turns once about Z between the rig's start
/// and end frames. The carried object, either a new marker or the existing host object named
/// by `attach`, starts `distance` along +X and looks at the center.
pub fn build_orbit_rig<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    sphere: &Sphere,
    rig: &OrbitRigConfig,
) -> Result<usize, ComposeError> {
    let center = sphere.center();
    let empty_name = format!("{}_Empty", rig.name);
    composer.upsert(
        Group::Orbits,
        &empty_name,
        Primitive::Empty {
            pose: Pose::at(center),
        },
        &Style::for_object(&empty_name, [1.0; 4]),
    )?;
    let spin = RotationSchedule::new(rig.start_frame, rig.end_frame, u32::MAX).keyframes();
    for (frame, angle) in &spin {
        composer.insert_keyframe(&empty_name, Channel::RotationEuler(2), *frame, *angle)?;
    }

    let position = center + Vector3::X * rig.distance;
    let orientation = facing(position, center)?;
    let child = match &rig.attach {
        Some(existing) => {
            composer.set_location(existing, position)?;
            composer.set_orientation(existing, orientation)?;
            existing.as_str()
        }
        None => {
            composer.marker(
                Group::Orbits,
                &rig.name,
                MarkerShape::Sphere,
                rig.size.unwrap_or(DEFAULT_RIG_SIZE),
                Pose::new(position, orientation),
                &Style::for_object(&rig.name, rig.color.unwrap_or(RED)),
            )?;
            rig.name.as_str()
        }
    };
    composer.set_parent(child, Some(&empty_name))?;
    debug!(rig = %rig.name, child, distance = rig.distance, "orbit rig built");
    Ok(spin.len())
}
