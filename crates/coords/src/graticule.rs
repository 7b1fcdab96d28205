//! Meridian and parallel polylines with label anchors.

use std::f64::consts::PI;

use lunar_core::constants::LABEL_OFFSET_FRACTION;
use lunar_core::{Point3, Sphere, Vector3};
use serde::Serialize;

use crate::CoordinateError;

/// Which family a graticule line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Meridian,
    Parallel,
}

/// Spacing and sampling density of a graticule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraticuleSpec {
    pub meridian_step_deg: u32,
    pub parallel_step_deg: u32,
    pub samples: usize,
}

impl Default for GraticuleSpec {
    fn default() -> Self {
        Self {
            meridian_step_deg: 10,
            parallel_step_deg: 10,
            samples: 50,
        }
    }
}

/// One sampled line of the graticule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraticuleLine {
    pub kind: LineKind,
    /// Longitude for meridians, latitude for parallels.
    pub angle_deg: i32,
    pub points: Vec<Point3>,
    pub cyclic: bool,
    /// Where the degree label sits, slightly off the surface.
    pub label_anchor: Point3,
}

impl GraticuleLine {
    /// Host object name, e.g. `Meridian_30` or `Parallel_-20`.
    pub fn name(&self) -> String {
        match self.kind {
            LineKind::Meridian => format!("Meridian_{}", self.angle_deg),
            LineKind::Parallel => format!("Parallel_{}", self.angle_deg),
        }
    }

    pub fn label(&self) -> String {
        format!("{}°", self.angle_deg)
    }
}

/// Pole-to-pole samples along the meridian at `lon_deg`.
pub fn meridian(
    lon_deg: f64,
    sphere: &Sphere,
    samples: usize,
) -> Result<Vec<Point3>, CoordinateError> {
    if samples < 2 {
        return Err(CoordinateError::TooFewSamples(samples));
    }
    let r = sphere.radius();
    let lon = lon_deg.to_radians();
    let last = (samples - 1) as f64;
    Ok((0..samples)
        .map(|i| {
            let theta = PI * i as f64 / last;
            sphere.center()
                + Vector3::new(
                    r * theta.sin() * lon.cos(),
                    r * theta.sin() * lon.sin(),
                    r * theta.cos(),
                )
        })
        .collect())
}

/// Closed loop along the parallel at `lat_deg`; the last point repeats the first.
pub fn parallel(
    lat_deg: f64,
    sphere: &Sphere,
    samples: usize,
) -> Result<Vec<Point3>, CoordinateError> {
    if samples < 2 {
        return Err(CoordinateError::TooFewSamples(samples));
    }
    let lat = lat_deg.to_radians();
    let circle_radius = sphere.radius() * lat.cos();
    let z = sphere.radius() * lat.sin();
    Ok((0..=samples)
        .map(|i| {
            let phi = 2.0 * PI * i as f64 / samples as f64;
            sphere.center() + Vector3::new(circle_radius * phi.cos(), circle_radius * phi.sin(), z)
        })
        .collect())
}

/// Full graticule: meridians over `[0, 360)` and parallels strictly between the poles.
pub fn graticule(
    sphere: &Sphere,
    spec: &GraticuleSpec,
) -> Result<Vec<GraticuleLine>, CoordinateError> {
    let r = sphere.radius();
    let offset = LABEL_OFFSET_FRACTION * r;
    let mut lines = Vec::new();

    let meridian_step = checked_step(spec.meridian_step_deg)?;
    for lon in (0..360).step_by(meridian_step as usize) {
        let lon_rad = (lon as f64).to_radians();
        lines.push(GraticuleLine {
            kind: LineKind::Meridian,
            angle_deg: lon,
            points: meridian(lon as f64, sphere, spec.samples)?,
            cyclic: false,
            label_anchor: sphere.center()
                + Vector3::new(r * lon_rad.cos(), r * lon_rad.sin(), offset),
        });
    }

    let parallel_step = checked_step(spec.parallel_step_deg)?;
    let mut lat = -90 + parallel_step;
    while lat < 90 {
        let lat_rad = (lat as f64).to_radians();
        lines.push(GraticuleLine {
            kind: LineKind::Parallel,
            angle_deg: lat,
            points: parallel(lat as f64, sphere, spec.samples)?,
            cyclic: true,
            label_anchor: sphere.center()
                + Vector3::new(r * lat_rad.cos() + offset, 0.0, r * lat_rad.sin()),
        });
        lat += parallel_step;
    }

    Ok(lines)
}

/// Steps outside `[1, 360]` would either never advance or overflow the angle counters.
fn checked_step(step_deg: u32) -> Result<i32, CoordinateError> {
    match i32::try_from(step_deg) {
        Ok(step @ 1..=360) => Ok(step),
        _ => Err(CoordinateError::InvalidStep(step_deg)),
    }
}
