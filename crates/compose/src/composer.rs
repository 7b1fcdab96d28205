//! Name-keyed registry of the objects a composition run created.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use lunar_config::MarkerShape;
use lunar_core::Point3;
use lunar_geometry::cylinder_between;
use lunar_orientation::Orientation;
use serde::Serialize;
use tracing::{debug, warn};

use crate::ComposeError;
use crate::host::{Channel, Handle, HostError, Pose, Primitive, SceneHost};
use crate::style::Style;

/// Builder family an object belongs to, used for bulk replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Body,
    Graticule,
    Markers,
    Arcs,
    Links,
    Camera,
    Projection,
    SightLines,
    Orbits,
    Telemetry,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Group::Body => "body",
            Group::Graticule => "graticule",
            Group::Markers => "markers",
            Group::Arcs => "arcs",
            Group::Links => "links",
            Group::Camera => "camera",
            Group::Projection => "projection",
            Group::SightLines => "sight_lines",
            Group::Orbits => "orbits",
            Group::Telemetry => "telemetry",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy)]
struct Tracked {
    handle: Handle,
    group: Group,
}

/// Wraps a [`SceneHost`] and remembers which handle belongs to which name.
#[derive(Debug)]
pub struct SceneComposer<H: SceneHost> {
    host: H,
    tracked: BTreeMap<String, Tracked>,
    skipped: Vec<String>,
}

impl<H: SceneHost> SceneComposer<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            tracked: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Handle of an object created by this composer.
    pub fn handle(&self, name: &str) -> Option<Handle> {
        self.tracked.get(name).map(|t| t.handle)
    }

    /// Handle of an object created here or already present in the host.
    pub fn resolve(&self, name: &str) -> Result<Handle, ComposeError> {
        self.handle(name)
            .or_else(|| self.host.lookup_by_name(name))
            .ok_or_else(|| ComposeError::UnknownObject(name.to_string()))
    }

    /// Names created in `group`, in lexical order.
    pub fn names_in(&self, group: Group) -> Vec<&str> {
        self.tracked
            .iter()
            .filter(|(_, t)| t.group == group)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Elements that were skipped, as `"name: reason"`.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Create `name`, replacing whatever object currently carries that name.
    pub fn upsert(
        &mut self,
        group: Group,
        name: &str,
        primitive: Primitive,
        style: &Style,
    ) -> Result<Handle, HostError> {
        if let Some(previous) = self.tracked.remove(name) {
            self.host.remove(previous.handle)?;
        }
        let handle = self.host.create_or_replace(name, &primitive, style)?;
        debug!(object = name, %handle, %group, "created scene object");
        self.tracked.insert(name.to_string(), Tracked { handle, group });
        Ok(handle)
    }

    /// Remove a tracked object. Returns false when the name is unknown.
    pub fn remove(&mut self, name: &str) -> Result<bool, HostError> {
        match self.tracked.remove(name) {
            Some(tracked) => {
                self.host.remove(tracked.handle)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every object created in `group`.
    pub fn clear_group(&mut self, group: Group) -> Result<usize, HostError> {
        let names: Vec<String> = self.names_in(group).into_iter().map(String::from).collect();
        for name in &names {
            self.remove(name)?;
        }
        if !names.is_empty() {
            debug!(%group, removed = names.len(), "cleared group");
        }
        Ok(names.len())
    }

    pub fn set_location(&mut self, name: &str, location: Point3) -> Result<(), ComposeError> {
        let handle = self.resolve(name)?;
        Ok(self.host.set_location(handle, location)?)
    }

    pub fn set_orientation(
        &mut self,
        name: &str,
        orientation: Orientation,
    ) -> Result<(), ComposeError> {
        let handle = self.resolve(name)?;
        Ok(self.host.set_orientation(handle, orientation)?)
    }

    pub fn insert_keyframe(
        &mut self,
        name: &str,
        channel: Channel,
        frame: i32,
        value: f64,
    ) -> Result<(), ComposeError> {
        let handle = self.resolve(name)?;
        Ok(self.host.insert_keyframe(handle, channel, frame, value)?)
    }

    /// Parent `child` under `parent`, or detach it with `None`.
    pub fn set_parent(&mut self, child: &str, parent: Option<&str>) -> Result<(), ComposeError> {
        let child = self.resolve(child)?;
        let parent = parent.map(|name| self.resolve(name)).transpose()?;
        Ok(self.host.set_parent(child, parent)?)
    }

    /// Key location and Euler rotation of `name` at `frame` from a pose.
    pub fn key_pose(
        &mut self,
        name: &str,
        frame: i32,
        location: Point3,
        orientation: Orientation,
    ) -> Result<(), ComposeError> {
        let handle = self.resolve(name)?;
        let euler = orientation.to_euler_xyz();
        for (axis, (coordinate, angle)) in location.to_array().into_iter().zip(euler).enumerate() {
            self.host
                .insert_keyframe(handle, Channel::Location(axis), frame, coordinate)?;
            self.host
                .insert_keyframe(handle, Channel::RotationEuler(axis), frame, angle)?;
        }
        Ok(())
    }

    pub fn render_frame(&mut self, frame: i32, output: &Path) -> Result<(), ComposeError> {
        Ok(self.host.render_frame(frame, output)?)
    }

    /// Cylinder spanning `p1` to `p2`.
    pub fn cylinder(
        &mut self,
        group: Group,
        name: &str,
        p1: Point3,
        p2: Point3,
        radius: f64,
        style: &Style,
    ) -> Result<Handle, ComposeError> {
        let pose = cylinder_between(p1, p2)?;
        Ok(self.upsert(group, name, Primitive::Cylinder { pose, radius }, style)?)
    }

    pub fn polyline(
        &mut self,
        group: Group,
        name: &str,
        points: Vec<Point3>,
        cyclic: bool,
        bevel_depth: f64,
        style: &Style,
    ) -> Result<Handle, ComposeError> {
        let primitive = Primitive::Polyline {
            points,
            cyclic,
            bevel_depth,
        };
        Ok(self.upsert(group, name, primitive, style)?)
    }

    pub fn marker(
        &mut self,
        group: Group,
        name: &str,
        shape: MarkerShape,
        size: f64,
        pose: Pose,
        style: &Style,
    ) -> Result<Handle, ComposeError> {
        let primitive = Primitive::Marker { shape, size, pose };
        Ok(self.upsert(group, name, primitive, style)?)
    }

    /// Forget the skips of a previous run.
    pub fn clear_skipped(&mut self) {
        self.skipped.clear();
    }

    /// Record `name` as skipped.
    pub fn skip(&mut self, name: &str, reason: impl fmt::Display) {
        warn!(object = name, %reason, "skipping scene element");
        self.skipped.push(format!("{name}: {reason}"));
    }

    /// Turn a degenerate-input failure into a recorded skip; other errors pass through.
    pub fn or_skip<T>(
        &mut self,
        name: &str,
        result: Result<T, ComposeError>,
    ) -> Result<Option<T>, ComposeError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_degenerate() => {
                self.skip(name, &err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
