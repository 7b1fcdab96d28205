//! Drive the Earth and Moon from a recorded telemetry feed.
//!
//! Each frame eases both bodies toward their reported state, and two sun lights fixed at the
//! origin turn to follow them.

use lunar_config::{BodyState, MarkerShape, TELEMETRY_UNIT_KM, TelemetryFrame};
use lunar_core::{Point3, lerp};
use lunar_orientation::{Axis, Orientation, track_to};
use serde::Serialize;
use tracing::{debug, info};

use crate::ComposeError;
use crate::composer::{Group, SceneComposer};
use crate::host::{Pose, Primitive, SceneHost};
use crate::style::Style;

/// Fraction of the remaining distance covered per frame.
pub const DEFAULT_SMOOTHING: f64 = 0.1;
/// Earth radius in scene units when the host has no Earth of its own.
pub const EARTH_RADIUS_UNITS: f64 = 6371.0 / TELEMETRY_UNIT_KM;

const EARTH_COLOR: [f32; 4] = [0.2, 0.4, 1.0, 1.0];
const LIGHT_COLOR: [f32; 4] = [1.0, 1.0, 0.9, 1.0];

/// Smoothed state of one followed body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowedBody {
    pub name: String,
    pub light: String,
    pub position: Point3,
    pub orientation: Orientation,
}

impl FollowedBody {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            light: format!("{name}_Light"),
            position: Point3::ORIGIN,
            orientation: Orientation::IDENTITY,
        }
    }

    fn target(state: &BodyState) -> (Point3, Orientation) {
        let [roll, pitch, yaw] = state.euler_deg;
        let orientation =
            Orientation::from_euler_xyz([roll.to_radians(), pitch.to_radians(), yaw.to_radians()]);
        (Point3::from(state.position), orientation)
    }

    /// Jump straight to `state`.
    fn snap(&mut self, state: &BodyState) {
        (self.position, self.orientation) = Self::target(state);
    }

    /// Move `smoothing` of the way toward `state`.
    fn ease(&mut self, state: &BodyState, smoothing: f64) {
        let (position, orientation) = Self::target(state);
        self.position = lerp(self.position, position, smoothing);
        self.orientation = self.orientation.slerp(orientation, smoothing);
    }
}

/// Eases an Earth/Moon pair toward successive telemetry frames and keys the result.
///
/// The first frame places both bodies exactly; every later frame covers `smoothing` of the
/// remaining gap.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryFollower {
    smoothing: f64,
    earth: FollowedBody,
    moon: FollowedBody,
    frames: usize,
}

impl TelemetryFollower {
    pub fn new(earth: &str, moon: &str) -> Self {
        Self::with_smoothing(earth, moon, DEFAULT_SMOOTHING)
    }

    /// `smoothing` is clamped into `[0, 1]`; 1 follows the feed exactly.
    pub fn with_smoothing(earth: &str, moon: &str, smoothing: f64) -> Self {
        Self {
            smoothing: smoothing.clamp(0.0, 1.0),
            earth: FollowedBody::new(earth),
            moon: FollowedBody::new(moon),
            frames: 0,
        }
    }

    pub fn earth(&self) -> &FollowedBody {
        &self.earth
    }

    pub fn moon(&self) -> &FollowedBody {
        &self.moon
    }

    /// Frames applied so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Create whatever the feed needs that the host lacks: an Earth sphere and the two lights.
    pub fn prepare<H: SceneHost>(
        &self,
        composer: &mut SceneComposer<H>,
    ) -> Result<(), ComposeError> {
        if composer.resolve(&self.earth.name).is_err() {
            debug!(body = %self.earth.name, "host has no earth object, creating one");
            composer.marker(
                Group::Telemetry,
                &self.earth.name,
                MarkerShape::Sphere,
                EARTH_RADIUS_UNITS,
                Pose::at(Point3::ORIGIN),
                &Style::for_object(&self.earth.name, EARTH_COLOR),
            )?;
        }
        for light in [&self.earth.light, &self.moon.light] {
            composer.upsert(
                Group::Telemetry,
                light,
                Primitive::Light {
                    pose: Pose::at(Point3::ORIGIN),
                },
                &Style::for_object(light, LIGHT_COLOR),
            )?;
        }
        Ok(())
    }

    /// Advance both bodies to `telemetry` and key their poses at `frame`.
    pub fn apply<H: SceneHost>(
        &mut self,
        composer: &mut SceneComposer<H>,
        frame: i32,
        telemetry: &TelemetryFrame,
    ) -> Result<(), ComposeError> {
        let smoothing = self.smoothing;
        let first = self.frames == 0;
        for (body, state) in [
            (&mut self.earth, &telemetry.earth),
            (&mut self.moon, &telemetry.moon),
        ] {
            if first {
                body.snap(state);
            } else {
                body.ease(state, smoothing);
            }
            composer.set_location(&body.name, body.position)?;
            composer.set_orientation(&body.name, body.orientation)?;
            composer.key_pose(&body.name, frame, body.position, body.orientation)?;

            // the lights sit on the sun at the origin and aim at the reported position
            let reported = Point3::from(state.position);
            let aim = track_to(reported - Point3::ORIGIN, Axis::NegZ, Axis::PosY)
                .map_err(ComposeError::from);
            let light_name = format!("{}@{frame}", body.light);
            if let Some(aim) = composer.or_skip(&light_name, aim)? {
                composer.set_orientation(&body.light, aim)?;
                composer.key_pose(&body.light, frame, Point3::ORIGIN, aim)?;
            }
        }
        self.frames += 1;
        Ok(())
    }
}

/// Prepare the host and play every frame of `feed`, one scene frame each from `first_frame`.
///
/// Returns the number of frames keyed.
pub fn follow_telemetry<H: SceneHost>(
    composer: &mut SceneComposer<H>,
    follower: &mut TelemetryFollower,
    feed: &[TelemetryFrame],
    first_frame: i32,
) -> Result<usize, ComposeError> {
    follower.prepare(composer)?;
    for (index, telemetry) in feed.iter().enumerate() {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        let frame = i32::try_from(index)
            .ok()
            .and_then(|offset| first_frame.checked_add(offset))
            .ok_or(ComposeError::FrameOutOfRange {
                first: first_frame,
                index,
                interval: 1,
            })?;
        follower.apply(composer, frame, telemetry)?;
    }
    info!(
        frames = feed.len(),
        earth = %follower.earth().name,
        moon = %follower.moon().name,
        "telemetry followed"
    );
    Ok(feed.len())
}
