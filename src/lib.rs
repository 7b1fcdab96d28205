//! Sphere-relative scene geometry and composition.
//!
//! The geometry lives in small workspace crates; this façade re-exports them so that the
//! binaries and integration tests share one entry point.

pub mod logging;

pub use lunar_compose as compose;
pub use lunar_config as config;
pub use lunar_coords as coords;
pub use lunar_core::{constants, shapes, units, vector};
pub use lunar_export as export;
pub use lunar_geometry as geometry;
pub use lunar_orientation as orientation;
