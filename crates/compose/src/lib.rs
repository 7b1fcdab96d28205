//! Scene composition against an external scene-graph host.
//!
//! Builders turn manifest sections into named host objects through a [`SceneComposer`], which
//! tracks every handle it created so that re-running a builder replaces rather than duplicates.

pub mod animation;
pub mod camera;
pub mod composer;
pub mod graticule;
pub mod host;
pub mod markers;
pub mod orbits;
pub mod plan;
pub mod projection;
pub mod recording;
pub mod style;
pub mod telemetry;

use lunar_coords::CoordinateError;
use lunar_core::{DegenerateVectorError, ShapeError};
use lunar_geometry::GeometryError;
use lunar_orientation::OrientationError;
use thiserror::Error;

pub use animation::{
    RenderSchedule, RotationSchedule, animate_rotation, frame_steps, render_stills,
};
pub use camera::{
    CameraPlacement, camera_placement, draw_sight_lines, draw_view_line, frame_camera,
};
pub use composer::{Group, SceneComposer};
pub use graticule::draw_graticule;
pub use host::{Channel, Handle, HostError, Pose, Primitive, SceneHost};
pub use markers::{draw_arc, link_markers, marker_pose, place_marker};
pub use orbits::{OrbitSweep, animate_orbit, build_orbit_rig, orbit_sweep};
pub use plan::{SceneSummary, compose_scene, sphere_from_config};
pub use projection::{ProjectionLayout, RigMarker, build_projection, projection_layout};
pub use recording::{RecordingHost, SceneObject, SceneSnapshot};
pub use style::Style;
pub use telemetry::{FollowedBody, TelemetryFollower, follow_telemetry};

/// Errors raised while composing a scene.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Orientation(#[from] OrientationError),
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Degenerate(#[from] DegenerateVectorError),
    #[error("unknown marker `{0}`")]
    UnknownMarker(String),
    #[error("no scene object named `{0}`")]
    UnknownObject(String),
    #[error("projection requires a camera position")]
    MissingCamera,
    #[error("still {index} at {interval}-frame spacing from frame {first} overflows the frame range")]
    FrameOutOfRange { first: i32, index: u32, interval: u32 },
    #[error("flyby never reaches its trail radius {0}")]
    OrbitCutoff(f64),
}

impl ComposeError {
    /// True for failures caused by coincident or zero-length inputs.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            ComposeError::Degenerate(_)
                | ComposeError::Orientation(OrientationError::Degenerate(_))
                | ComposeError::Geometry(GeometryError::Degenerate(_))
                | ComposeError::Shape(ShapeError::Degenerate(_))
        )
    }
}
