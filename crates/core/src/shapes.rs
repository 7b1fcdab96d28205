//! Immutable sphere, plane, and ray values.
//!
//! Constructors enforce each shape's invariant so the geometry routines can stay total.

use serde::Serialize;
use thiserror::Error;

use crate::constants::EPSILON;
use crate::vector::{DegenerateVectorError, Point3, Vector3};

/// Errors raised while constructing shapes.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShapeError {
    #[error("sphere radius must be positive and finite, got {0}")]
    NonPositiveRadius(f64),
    #[error(transparent)]
    Degenerate(#[from] DegenerateVectorError),
}

/// Sphere with a strictly positive radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64) -> Result<Self, ShapeError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ShapeError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    /// Sphere centered on the origin.
    pub fn centered(radius: f64) -> Result<Self, ShapeError> {
        Self::new(Point3::ORIGIN, radius)
    }

    #[inline]
    pub fn center(&self) -> Point3 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Plane through `point` with a unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Plane {
    point: Point3,
    normal: Vector3,
}

impl Plane {
    /// Build a plane; the normal is normalized here so callers never have to.
    pub fn new(point: Point3, normal: Vector3) -> Result<Self, DegenerateVectorError> {
        Ok(Self {
            point,
            normal: normal.normalize()?,
        })
    }

    #[inline]
    pub fn point(&self) -> Point3 {
        self.point
    }

    #[inline]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }
}

/// Half-line starting at `origin`.
///
/// The direction is stored as supplied (not normalized); only a vanishing direction is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self, DegenerateVectorError> {
        let magnitude = direction.length();
        if !magnitude.is_finite() || magnitude < EPSILON {
            return Err(DegenerateVectorError { magnitude });
        }
        Ok(Self { origin, direction })
    }

    /// Ray from `origin` aimed at `target`, with unit direction.
    pub fn toward(origin: Point3, target: Point3) -> Result<Self, DegenerateVectorError> {
        Self::new(origin, (target - origin).normalize()?)
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Unit-length copy of the direction. Infallible because `new` rejected short directions.
    #[inline]
    pub fn unit_direction(&self) -> Vector3 {
        self.direction * (1.0 / self.direction.length())
    }

    /// Point at parameter `t`, measured in units of the stored direction.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
