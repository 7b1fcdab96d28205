//! Scene manifest models and loaders for the lunar scene toolkit.

pub mod telemetry;

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use telemetry::{BodyState, TELEMETRY_UNIT_KM, TelemetryError, TelemetryFrame, load_telemetry};

/// RGBA color with components in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Top-level scene manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct SceneConfig {
    pub name: String,
    pub sphere: SphereConfig,
    #[serde(default)]
    pub graticule: Option<GraticuleConfig>,
    #[serde(default)]
    pub markers: Vec<MarkerConfig>,
    #[serde(default)]
    pub arcs: Vec<ArcConfig>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    #[serde(default)]
    pub camera: Option<CameraConfig>,
    #[serde(default)]
    pub projection: Option<ProjectionConfig>,
    #[serde(default)]
    pub sight_lines: Vec<SightLineConfig>,
    #[serde(default)]
    pub rotation: Option<RotationConfig>,
    #[serde(default)]
    pub orbits: Vec<OrbitConfig>,
    #[serde(default)]
    pub orbit_rigs: Vec<OrbitRigConfig>,
}

/// The body every other element is placed relative to.
#[derive(Debug, Deserialize, Clone)]
pub struct SphereConfig {
    /// Host object standing for the body.
    #[serde(default = "default_body_name")]
    pub name: String,
    #[serde(default)]
    pub center: [f64; 3],
    pub radius: f64,
}

/// Meridian/parallel overlay.
#[derive(Debug, Deserialize, Clone)]
pub struct GraticuleConfig {
    #[serde(default = "default_step_deg")]
    pub meridian_step_deg: u32,
    #[serde(default = "default_step_deg")]
    pub parallel_step_deg: u32,
    #[serde(default = "default_graticule_samples")]
    pub samples: usize,
    #[serde(default = "default_true")]
    pub labels: bool,
    #[serde(default)]
    pub color: Option<Rgba>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    #[default]
    Sphere,
    Cube,
}

/// Surface marker at a geographic coordinate.
#[derive(Debug, Deserialize, Clone)]
pub struct MarkerConfig {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub color: Option<Rgba>,
    #[serde(default)]
    pub shape: MarkerShape,
    #[serde(default)]
    pub size: Option<f64>,
}

/// Surface arc between two named markers.
#[derive(Debug, Deserialize, Clone)]
pub struct ArcConfig {
    pub from: String,
    pub to: String,
    #[serde(default = "default_arc_segments")]
    pub segments: usize,
    #[serde(default)]
    pub color: Option<Rgba>,
}

/// Straight cylinder between two named markers.
#[derive(Debug, Deserialize, Clone)]
pub struct LinkConfig {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub color: Option<Rgba>,
}

/// Camera hovering above a surface coordinate, looking at the sphere center.
#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    #[serde(default = "default_camera_name")]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub altitude: f64,
    #[serde(default)]
    pub view_line: bool,
}

/// Projection rig between two markers and a camera.
#[derive(Debug, Deserialize, Clone)]
pub struct ProjectionConfig {
    pub between: [String; 2],
    #[serde(default = "default_plane_size")]
    pub plane_size: f64,
    /// Overrides the camera section's position.
    #[serde(default)]
    pub camera_position: Option<[f64; 3]>,
    #[serde(default)]
    pub image_plane: Option<ImagePlaneConfig>,
}

/// Plane that marker-to-camera rays are cast onto.
#[derive(Debug, Deserialize, Clone)]
pub struct ImagePlaneConfig {
    pub point: [f64; 3],
    pub normal: [f64; 3],
}

/// Observer casting a line toward a target and marking where it meets the sphere.
#[derive(Debug, Deserialize, Clone)]
pub struct SightLineConfig {
    pub name: String,
    pub position: [f64; 3],
    pub target: [f64; 3],
    #[serde(default = "default_sight_length")]
    pub length: f64,
}

/// Spin animation about the polar axis.
#[derive(Debug, Deserialize, Clone)]
pub struct RotationConfig {
    pub object: String,
    pub start_frame: i32,
    pub end_frame: i32,
    #[serde(default = "default_frame_step")]
    pub step: u32,
    #[serde(default)]
    pub renders: Option<RenderConfig>,
}

/// Still frames rendered while the body spins.
#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    pub count: u32,
    pub interval: u32,
    pub output_dir: PathBuf,
}

/// Object travelling along a conic orbit around the sphere center.
#[derive(Debug, Deserialize, Clone)]
pub struct OrbitConfig {
    pub name: String,
    /// `|a|` in scene units, for hyperbolas as well.
    pub semi_major_axis: f64,
    #[serde(default)]
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    /// Where a closed orbit starts; hyperbolas always sweep in from their inbound end.
    #[serde(default)]
    pub start_anomaly_deg: f64,
    pub start_frame: i32,
    pub end_frame: i32,
    #[serde(default = "default_frame_step")]
    pub step: u32,
    #[serde(default = "default_trail_segments")]
    pub trail_segments: usize,
    /// Distance at which a hyperbolic flyby enters and leaves the scene.
    #[serde(default)]
    pub trail_radius: Option<f64>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub color: Option<Rgba>,
}

/// Object circling the body on a spinning parent empty at the sphere center.
#[derive(Debug, Deserialize, Clone)]
pub struct OrbitRigConfig {
    pub name: String,
    pub distance: f64,
    #[serde(default = "default_rig_start_frame")]
    pub start_frame: i32,
    pub end_frame: i32,
    /// Existing host object to carry instead of a new marker, e.g. `Camera`.
    #[serde(default)]
    pub attach: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub color: Option<Rgba>,
}

fn default_body_name() -> String {
    "Moon".to_string()
}

fn default_step_deg() -> u32 {
    10
}

fn default_graticule_samples() -> usize {
    50
}

fn default_true() -> bool {
    true
}

fn default_arc_segments() -> usize {
    64
}

fn default_camera_name() -> String {
    "Camera".to_string()
}

fn default_plane_size() -> f64 {
    2.0
}

fn default_sight_length() -> f64 {
    1000.0
}

fn default_frame_step() -> u32 {
    1
}

fn default_trail_segments() -> usize {
    128
}

fn default_rig_start_frame() -> i32 {
    1
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid scene `{scene}`: {reason}")]
    Invalid { scene: String, reason: String },
    #[error("telemetry line {line}: {source}")]
    Telemetry {
        line: usize,
        #[source]
        source: TelemetryError,
    },
}

impl SceneConfig {
    /// Look up a marker by name.
    pub fn marker(&self, name: &str) -> Option<&MarkerConfig> {
        self.markers.iter().find(|m| m.name == name)
    }

    /// Check cross-references and numeric ranges the deserializer cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            scene: self.name.clone(),
            reason,
        };

        if !self.sphere.radius.is_finite() || self.sphere.radius <= 0.0 {
            return Err(invalid(format!(
                "sphere radius must be positive, got {}",
                self.sphere.radius
            )));
        }

        let mut names = BTreeSet::new();
        for marker in &self.markers {
            if !names.insert(marker.name.as_str()) {
                return Err(invalid(format!("duplicate marker `{}`", marker.name)));
            }
            if !(-90.0..=90.0).contains(&marker.lat) {
                return Err(invalid(format!(
                    "marker `{}` latitude {} lies outside [-90, 90]",
                    marker.name, marker.lat
                )));
            }
        }

        let known = |name: &str| -> Result<(), ConfigError> {
            if names.contains(name) {
                Ok(())
            } else {
                Err(invalid(format!("unknown marker `{name}`")))
            }
        };

        for arc in &self.arcs {
            known(arc.from.as_str())?;
            known(arc.to.as_str())?;
            if arc.segments == 0 {
                return Err(invalid(format!(
                    "arc `{}` -> `{}` needs at least one segment",
                    arc.from, arc.to
                )));
            }
        }
        for link in &self.links {
            known(link.from.as_str())?;
            known(link.to.as_str())?;
        }

        if let Some(camera) = &self.camera {
            if !(-90.0..=90.0).contains(&camera.lat) {
                return Err(invalid(format!(
                    "camera latitude {} lies outside [-90, 90]",
                    camera.lat
                )));
            }
            if !camera.altitude.is_finite() || camera.altitude <= -self.sphere.radius {
                return Err(invalid(format!(
                    "camera altitude {} puts it at or past the sphere center",
                    camera.altitude
                )));
            }
        }

        if let Some(projection) = &self.projection {
            for name in &projection.between {
                known(name.as_str())?;
            }
            if projection.camera_position.is_none() && self.camera.is_none() {
                return Err(invalid(
                    "projection needs a camera section or camera_position".to_string(),
                ));
            }
        }

        if let Some(graticule) = &self.graticule {
            for (which, step) in [
                ("meridian", graticule.meridian_step_deg),
                ("parallel", graticule.parallel_step_deg),
            ] {
                if !(1..=360).contains(&step) {
                    return Err(invalid(format!(
                        "graticule {which} step must lie in [1, 360] degrees, got {step}"
                    )));
                }
            }
            if graticule.samples < 2 {
                return Err(invalid(format!(
                    "graticule needs at least 2 samples per line, got {}",
                    graticule.samples
                )));
            }
        }

        if let Some(rotation) = &self.rotation {
            if rotation.end_frame <= rotation.start_frame {
                return Err(invalid(format!(
                    "rotation frame range {}..{} is empty",
                    rotation.start_frame, rotation.end_frame
                )));
            }
            if rotation.step == 0 {
                return Err(invalid("rotation step must be at least 1".to_string()));
            }
            if let Some(renders) = &rotation.renders {
                let last = i64::from(rotation.start_frame)
                    + i64::from(renders.count.saturating_sub(1)) * i64::from(renders.interval);
                if last > i64::from(i32::MAX) {
                    return Err(invalid(format!(
                        "{} renders every {} frames from frame {} run past the last frame",
                        renders.count, renders.interval, rotation.start_frame
                    )));
                }
            }
        }

        let mut orbit_names = BTreeSet::new();
        for orbit in &self.orbits {
            if !orbit_names.insert(orbit.name.as_str()) {
                return Err(invalid(format!("duplicate orbit `{}`", orbit.name)));
            }
            let (a, e) = (orbit.semi_major_axis, orbit.eccentricity);
            if !a.is_finite() || a <= 0.0 || !e.is_finite() || e < 0.0 || (e - 1.0).abs() < 1e-6 {
                return Err(invalid(format!(
                    "orbit `{}` needs a > 0 and e >= 0 other than 1, got a = {a}, e = {e}",
                    orbit.name
                )));
            }
            if orbit.end_frame <= orbit.start_frame || orbit.step == 0 {
                return Err(invalid(format!(
                    "orbit `{}` frame range {}..{} step {} is empty",
                    orbit.name, orbit.start_frame, orbit.end_frame, orbit.step
                )));
            }
            if orbit.trail_segments == 0 {
                return Err(invalid(format!(
                    "orbit `{}` trail needs at least one segment",
                    orbit.name
                )));
            }
            if let Some(radius) = orbit.trail_radius {
                let periapsis = a * (1.0 - e * e).abs() / (1.0 + e);
                if e > 1.0 && !(radius.is_finite() && radius > periapsis) {
                    return Err(invalid(format!(
                        "orbit `{}` trail radius {radius} does not reach past periapsis {periapsis}",
                        orbit.name
                    )));
                }
            }
        }

        for rig in &self.orbit_rigs {
            if !rig.distance.is_finite() || rig.distance <= 0.0 {
                return Err(invalid(format!(
                    "orbit rig `{}` distance must be positive, got {}",
                    rig.name, rig.distance
                )));
            }
            if rig.end_frame <= rig.start_frame {
                return Err(invalid(format!(
                    "orbit rig `{}` frame range {}..{} is empty",
                    rig.name, rig.start_frame, rig.end_frame
                )));
            }
        }

        Ok(())
    }
}

/// Load a single scene manifest (`.toml`, otherwise YAML).
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ConfigError> {
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Load one manifest, or every manifest in a directory in file-name order.
pub fn load_scenes<P: AsRef<Path>>(path: P) -> Result<Vec<SceneConfig>, ConfigError> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Ok(vec![load_scene(path)?]);
    }
    let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path) || is_yaml(path))
        .collect();
    entries.sort();
    entries.iter().map(load_scene).collect()
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}
