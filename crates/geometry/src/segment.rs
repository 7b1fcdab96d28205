//! Pose of a cylinder spanning two points.

use lunar_core::Point3;
use lunar_orientation::{Axis, Orientation, OrientationError, track_to};
use serde::Serialize;

/// Placement of a cylinder whose local +Z axis runs from one endpoint to the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CylinderPose {
    pub midpoint: Point3,
    pub length: f64,
    pub orientation: Orientation,
}

/// Pose of a cylinder from `p1` to `p2`, tracking +Z along the segment with +Y up.
///
/// Coincident endpoints have no direction and are rejected.
pub fn cylinder_between(p1: Point3, p2: Point3) -> Result<CylinderPose, OrientationError> {
    let direction = p2 - p1;
    let orientation = track_to(direction, Axis::PosZ, Axis::PosY)?;
    Ok(CylinderPose {
        midpoint: p1.midpoint(p2),
        length: direction.length(),
        orientation,
    })
}
