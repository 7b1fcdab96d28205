//! Unit quaternions and track-to orientation construction.
//!
//! A track-to orientation maps a local "forward" axis onto a world direction and resolves roll by
//! keeping a local "up" axis as close as possible to an up hint. The scene host's world up is +Z.

use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use glam::{DMat3, DQuat, EulerRot};
use lunar_core::constants::EPSILON;
use lunar_core::{DegenerateVectorError, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// World up used by the scene host when no explicit hint is given.
pub const WORLD_UP: Vector3 = Vector3::Z;

/// Errors raised while building orientations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OrientationError {
    #[error(transparent)]
    Degenerate(#[from] DegenerateVectorError),
    #[error("forward axis {forward} and up axis {up} lie on the same principal direction")]
    AxisConflict { forward: Axis, up: Axis },
}

/// Signed principal axis of an object's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "X")]
    PosX,
    #[serde(rename = "Y")]
    PosY,
    #[serde(rename = "Z")]
    PosZ,
    #[serde(rename = "-X")]
    NegX,
    #[serde(rename = "-Y")]
    NegY,
    #[serde(rename = "-Z")]
    NegZ,
}

impl Axis {
    pub fn unit_vector(self) -> Vector3 {
        match self {
            Axis::PosX => Vector3::X,
            Axis::PosY => Vector3::Y,
            Axis::PosZ => Vector3::Z,
            Axis::NegX => -Vector3::X,
            Axis::NegY => -Vector3::Y,
            Axis::NegZ => -Vector3::Z,
        }
    }

    /// Index of the principal direction (0 = X, 1 = Y, 2 = Z), ignoring sign.
    pub fn principal(self) -> usize {
        match self {
            Axis::PosX | Axis::NegX => 0,
            Axis::PosY | Axis::NegY => 1,
            Axis::PosZ | Axis::NegZ => 2,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Axis::PosX => "X",
            Axis::PosY => "Y",
            Axis::PosZ => "Z",
            Axis::NegX => "-X",
            Axis::NegY => "-Y",
            Axis::NegZ => "-Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" | "+X" => Ok(Axis::PosX),
            "Y" | "+Y" => Ok(Axis::PosY),
            "Z" | "+Z" => Ok(Axis::PosZ),
            "-X" => Ok(Axis::NegX),
            "-Y" => Ok(Axis::NegY),
            "-Z" => Ok(Axis::NegZ),
            other => Err(format!("unknown axis `{other}`")),
        }
    }
}

/// Rotation stored as a unit quaternion, kept in the `w >= 0` hemisphere when built from a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Orientation(DQuat);

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Orientation {
    pub const IDENTITY: Self = Self(DQuat::IDENTITY);

    /// Wrap a quaternion, renormalizing it.
    pub fn from_quat(q: DQuat) -> Self {
        Self(q.normalize())
    }

    pub fn quat(&self) -> DQuat {
        self.0
    }

    /// Rotation of `angle_rad` about `axis` (right-hand rule).
    pub fn from_axis_angle(axis: Vector3, angle_rad: f64) -> Result<Self, DegenerateVectorError> {
        let axis = axis.normalize()?;
        Ok(Self(DQuat::from_axis_angle(axis.into(), angle_rad)))
    }

    /// Rotation from XYZ Euler angles in radians (`R = Rz · Ry · Rx`).
    pub fn from_euler_xyz([x, y, z]: [f64; 3]) -> Self {
        Self(DQuat::from_euler(EulerRot::ZYX, z, y, x))
    }

    /// Quaternion of a proper rotation matrix given row-major as `m[row][col]`.
    pub fn from_rotation_matrix(m: [[f64; 3]; 3]) -> Self {
        Self::from_frame(DMat3::from_cols_array_2d(&m).transpose())
    }

    /// Rotation matrix, row-major.
    pub fn to_rotation_matrix(&self) -> [[f64; 3]; 3] {
        DMat3::from_quat(self.0).transpose().to_cols_array_2d()
    }

    /// Euler angles in radians for the XYZ rotation order, as `[x, y, z]`.
    pub fn to_euler_xyz(&self) -> [f64; 3] {
        let (z, y, x) = self.0.to_euler(EulerRot::ZYX);
        [x, y, z]
    }

    pub fn conjugate(&self) -> Self {
        Self(self.0.conjugate())
    }

    /// Apply the rotation to a vector.
    pub fn rotate(&self, v: Vector3) -> Vector3 {
        self.0.mul_vec3(v.into()).into()
    }

    /// Spherical interpolation along the shorter arc; `t = 0` is `self`, `t = 1` is `end`.
    pub fn slerp(&self, end: Self, t: f64) -> Self {
        Self(self.0.slerp(end.0, t))
    }

    /// Components as `[w, x, y, z]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.0.w, self.0.x, self.0.y, self.0.z]
    }

    fn from_frame(m: DMat3) -> Self {
        let q = DQuat::from_mat3(&m).normalize();
        Self(if q.w < 0.0 { -q } else { q })
    }
}

impl Mul for Orientation {
    type Output = Self;

    /// Hamilton product: `self * rhs` applies `rhs` first.
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

/// Orientation mapping `forward_axis` onto `direction` with `up_axis` leaning toward `up_hint`.
///
/// The up hint is made orthogonal to the direction (Gram-Schmidt) and the third axis is their
/// cross product. When the hint is parallel to the direction the roll is undefined; world X, then
/// world Y, is used as the secondary hint instead. A vanishing `direction` is an error, as is a
/// forward and up axis sharing one principal direction.
pub fn look_at_orientation(
    direction: Vector3,
    up_hint: Vector3,
    forward_axis: Axis,
    up_axis: Axis,
) -> Result<Orientation, OrientationError> {
    if forward_axis.principal() == up_axis.principal() {
        return Err(OrientationError::AxisConflict {
            forward: forward_axis,
            up: up_axis,
        });
    }
    let forward = direction.normalize()?;
    let up = [up_hint, Vector3::X, Vector3::Y]
        .into_iter()
        .find_map(|hint| {
            let rejected = hint - forward * hint.dot(forward);
            if rejected.length() < EPSILON {
                None
            } else {
                rejected.normalize().ok()
            }
        })
        .ok_or(DegenerateVectorError {
            magnitude: up_hint.length(),
        })?;
    let side = forward.cross(up);

    let local_forward = forward_axis.unit_vector();
    let local_up = up_axis.unit_vector();
    let local_side = local_forward.cross(local_up);

    // R = W · Lᵀ with the world and local frames as columns
    let world = DMat3::from_cols(forward.into(), up.into(), side.into());
    let local = DMat3::from_cols(local_forward.into(), local_up.into(), local_side.into());
    Ok(Orientation::from_frame(world * local.transpose()))
}

/// [`look_at_orientation`] with the host's world up (+Z) as the hint.
pub fn track_to(
    direction: Vector3,
    forward_axis: Axis,
    up_axis: Axis,
) -> Result<Orientation, OrientationError> {
    look_at_orientation(direction, WORLD_UP, forward_axis, up_axis)
}

/// Orientation for flat text facing away from a sphere along `outward`.
///
/// Text faces its local +Z, so the -Z track is flipped half a turn about local Y.
pub fn facing_outward(outward: Vector3) -> Result<Orientation, OrientationError> {
    let track = track_to(outward, Axis::NegZ, Axis::PosY)?;
    let flip = Orientation::from_axis_angle(Vector3::Y, std::f64::consts::PI)?;
    Ok(track * flip)
}
