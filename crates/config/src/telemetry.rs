//! Earth/Moon state streams recorded from a telemetry feed.
//!
//! Each line holds twelve comma-separated numbers, six per body in the order
//! `x, y, z, roll, yaw, pitch`: the Earth first, then the Moon. Positions arrive in kilometres
//! and are divided by [`TELEMETRY_UNIT_KM`] so that one scene unit is one lunar radius. Angles
//! are degrees.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::ConfigError;

/// Kilometres per scene unit.
pub const TELEMETRY_UNIT_KM: f64 = 1737.0;

const FIELDS: usize = 12;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error("expected 12 comma-separated fields, got {0}")]
    FieldCount(usize),
    #[error("field {index} (`{value}`) is not a finite number")]
    Field { index: usize, value: String },
}

/// Position and attitude of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyState {
    /// Scene units.
    pub position: [f64; 3],
    /// Roll about X, pitch about Y, yaw about Z, in degrees.
    pub euler_deg: [f64; 3],
}

impl BodyState {
    /// `[x, y, z]` in kilometres and `[roll, yaw, pitch]` in wire order.
    fn from_wire(position_km: [f64; 3], [roll, yaw, pitch]: [f64; 3], unit_km: f64) -> Self {
        Self {
            position: position_km.map(|km| km / unit_km),
            euler_deg: [roll, pitch, yaw],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryFrame {
    pub earth: BodyState,
    pub moon: BodyState,
}

impl TelemetryFrame {
    /// Parse one line, dividing positions by `unit_km`.
    pub fn parse_scaled(line: &str, unit_km: f64) -> Result<Self, TelemetryError> {
        let raw: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if raw.len() != FIELDS {
            return Err(TelemetryError::FieldCount(raw.len()));
        }
        let mut fields = [0.0; FIELDS];
        for (index, (slot, value)) in fields.iter_mut().zip(&raw).enumerate() {
            *slot = value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| TelemetryError::Field {
                    index,
                    value: value.to_string(),
                })?;
        }
        let [ex, ey, ez, er, ew, ep, mx, my, mz, mr, mw, mp] = fields;
        Ok(Self {
            earth: BodyState::from_wire([ex, ey, ez], [er, ew, ep], unit_km),
            moon: BodyState::from_wire([mx, my, mz], [mr, mw, mp], unit_km),
        })
    }
}

impl FromStr for TelemetryFrame {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_scaled(s, TELEMETRY_UNIT_KM)
    }
}

/// Read a recorded feed, one frame per non-empty line. Lines starting with `#` are comments.
pub fn load_telemetry<P: AsRef<Path>>(path: P) -> Result<Vec<TelemetryFrame>, ConfigError> {
    let contents = fs::read_to_string(path)?;
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            line.parse().map_err(|source| ConfigError::Telemetry {
                line: index + 1,
                source,
            })
        })
        .collect()
}
