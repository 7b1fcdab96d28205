//! In-memory host that records every request, used by the planner binary and the tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lunar_core::Point3;
use lunar_orientation::Orientation;
use serde::Serialize;

use crate::host::{Channel, Handle, HostError, Primitive, SceneHost};
use crate::style::Style;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keyframe {
    pub channel: Channel,
    pub frame: i32,
    pub value: f64,
}

/// One live object in the recording host.
#[derive(Debug, Clone, Serialize)]
pub struct SceneObject {
    pub handle: Handle,
    pub name: String,
    pub primitive: Primitive,
    pub style: Style,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Point3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keyframes: Vec<Keyframe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Handle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    pub frame: i32,
    pub output: PathBuf,
}

/// Serializable view of the recorded scene.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub objects: Vec<SceneObject>,
    pub renders: Vec<RenderRequest>,
}

/// Scene host that keeps objects in memory and refuses duplicate names.
#[derive(Debug, Default)]
pub struct RecordingHost {
    objects: BTreeMap<Handle, SceneObject>,
    renders: Vec<RenderRequest>,
    next_handle: u64,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Live objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn object(&self, handle: Handle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    pub fn object_named(&self, name: &str) -> Option<&SceneObject> {
        self.objects.values().find(|o| o.name == name)
    }

    pub fn renders(&self) -> &[RenderRequest] {
        &self.renders
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            objects: self.objects.values().cloned().collect(),
            renders: self.renders.clone(),
        }
    }

    fn object_mut(&mut self, handle: Handle) -> Result<&mut SceneObject, HostError> {
        self.objects
            .get_mut(&handle)
            .ok_or(HostError::UnknownHandle(handle))
    }
}

impl SceneHost for RecordingHost {
    fn create(
        &mut self,
        name: &str,
        primitive: &Primitive,
        style: &Style,
    ) -> Result<Handle, HostError> {
        if self.lookup_by_name(name).is_some() {
            return Err(HostError::NameTaken(name.to_string()));
        }
        self.next_handle += 1;
        let handle = Handle(self.next_handle);
        self.objects.insert(
            handle,
            SceneObject {
                handle,
                name: name.to_string(),
                primitive: primitive.clone(),
                style: style.clone(),
                location: None,
                orientation: None,
                keyframes: Vec::new(),
                parent: None,
            },
        );
        Ok(handle)
    }

    fn lookup_by_name(&self, name: &str) -> Option<Handle> {
        self.object_named(name).map(|o| o.handle)
    }

    fn remove(&mut self, handle: Handle) -> Result<(), HostError> {
        self.objects
            .remove(&handle)
            .ok_or(HostError::UnknownHandle(handle))?;
        // children stay where they are, unparented
        for object in self.objects.values_mut() {
            if object.parent == Some(handle) {
                object.parent = None;
            }
        }
        Ok(())
    }

    fn set_location(&mut self, handle: Handle, location: Point3) -> Result<(), HostError> {
        self.object_mut(handle)?.location = Some(location);
        Ok(())
    }

    fn set_orientation(
        &mut self,
        handle: Handle,
        orientation: Orientation,
    ) -> Result<(), HostError> {
        self.object_mut(handle)?.orientation = Some(orientation);
        Ok(())
    }

    fn insert_keyframe(
        &mut self,
        handle: Handle,
        channel: Channel,
        frame: i32,
        value: f64,
    ) -> Result<(), HostError> {
        let object = self.object_mut(handle)?;
        let keyframe = Keyframe {
            channel,
            frame,
            value,
        };
        // one key per channel and frame, like a host animation curve
        match object
            .keyframes
            .iter_mut()
            .find(|k| k.channel == channel && k.frame == frame)
        {
            Some(existing) => existing.value = value,
            None => object.keyframes.push(keyframe),
        }
        Ok(())
    }

    fn set_parent(&mut self, child: Handle, parent: Option<Handle>) -> Result<(), HostError> {
        if let Some(parent) = parent {
            if parent == child {
                return Err(HostError::Rejected(format!("{child} cannot parent itself")));
            }
            if !self.objects.contains_key(&parent) {
                return Err(HostError::UnknownHandle(parent));
            }
        }
        self.object_mut(child)?.parent = parent;
        Ok(())
    }

    fn render_frame(&mut self, frame: i32, output: &Path) -> Result<(), HostError> {
        self.renders.push(RenderRequest {
            frame,
            output: output.to_path_buf(),
        });
        Ok(())
    }
}
