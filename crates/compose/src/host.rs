//! Contract of the external scene-graph host.
//!
//! The host owns every object; this crate only ever holds opaque [`Handle`]s it returned.

use std::fmt;
use std::path::Path;

use lunar_config::MarkerShape;
use lunar_core::Point3;
use lunar_geometry::CylinderPose;
use lunar_orientation::Orientation;
use serde::Serialize;
use thiserror::Error;

use crate::style::Style;

/// Opaque reference to a host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Handle(pub u64);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Location plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    pub location: Point3,
    pub orientation: Orientation,
}

impl Pose {
    pub fn new(location: Point3, orientation: Orientation) -> Self {
        Self {
            location,
            orientation,
        }
    }

    /// Unrotated pose at `location`.
    pub fn at(location: Point3) -> Self {
        Self::new(location, Orientation::IDENTITY)
    }
}

/// Object the host is asked to create.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Marker {
        shape: MarkerShape,
        size: f64,
        pose: Pose,
    },
    Cylinder {
        pose: CylinderPose,
        radius: f64,
    },
    Polyline {
        points: Vec<Point3>,
        cyclic: bool,
        bevel_depth: f64,
    },
    Plane {
        pose: Pose,
        size: f64,
    },
    Label {
        text: String,
        pose: Pose,
        size: f64,
    },
    Camera {
        pose: Pose,
    },
    Empty {
        pose: Pose,
    },
    /// Sun-style light shining along its local -Z.
    Light {
        pose: Pose,
    },
}

impl Primitive {
    /// Vertices of a polyline, `None` for every other primitive.
    pub fn polyline_points(&self) -> Option<&[Point3]> {
        match self {
            Primitive::Polyline { points, .. } => Some(points),
            _ => None,
        }
    }

    /// Where the object sits; polylines report their first vertex.
    pub fn location(&self) -> Option<Point3> {
        match self {
            Primitive::Marker { pose, .. }
            | Primitive::Plane { pose, .. }
            | Primitive::Label { pose, .. }
            | Primitive::Camera { pose }
            | Primitive::Empty { pose }
            | Primitive::Light { pose } => Some(pose.location),
            Primitive::Cylinder { pose, .. } => Some(pose.midpoint),
            Primitive::Polyline { points, .. } => points.first().copied(),
        }
    }
}

/// Animatable property and component index (0 = X, 1 = Y, 2 = Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Channel {
    Location(usize),
    RotationEuler(usize),
    Scale(usize),
}

/// Errors reported by a scene host.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no object with handle {0}")]
    UnknownHandle(Handle),
    #[error("an object named `{0}` already exists")]
    NameTaken(String),
    #[error("host rejected the request: {0}")]
    Rejected(String),
}

/// Operations the composition layer needs from a scene host.
pub trait SceneHost {
    fn create(&mut self, name: &str, primitive: &Primitive, style: &Style)
    -> Result<Handle, HostError>;

    fn lookup_by_name(&self, name: &str) -> Option<Handle>;

    fn remove(&mut self, handle: Handle) -> Result<(), HostError>;

    fn set_location(&mut self, handle: Handle, location: Point3) -> Result<(), HostError>;

    fn set_orientation(&mut self, handle: Handle, orientation: Orientation)
    -> Result<(), HostError>;

    fn insert_keyframe(
        &mut self,
        handle: Handle,
        channel: Channel,
        frame: i32,
        value: f64,
    ) -> Result<(), HostError>;

    fn render_frame(&mut self, frame: i32, output: &Path) -> Result<(), HostError>;

    /// Attach `child` to `parent` (or detach it with `None`), keeping its world transform.
    fn set_parent(&mut self, child: Handle, parent: Option<Handle>) -> Result<(), HostError>;

    /// Remove the object called `name`, reporting whether one existed.
    fn remove_by_name(&mut self, name: &str) -> Result<bool, HostError> {
        match self.lookup_by_name(name) {
            Some(handle) => {
                self.remove(handle)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Upsert: replace any object called `name` with a fresh one.
    fn create_or_replace(
        &mut self,
        name: &str,
        primitive: &Primitive,
        style: &Style,
    ) -> Result<Handle, HostError> {
        self.remove_by_name(name)?;
        self.create(name, primitive, style)
    }
}
