/// StaticCamera - fixed pose, no input.

use glam::Vec3;
use crate::scene::SceneObject;
use super::camera_manager::CameraManager;
use super::projection_camera::{PerspectiveDesc, ProjectionCamera};

pub struct StaticCamera {
    name: String,
    camera: ProjectionCamera,
}

impl StaticCamera {
    pub fn new(name: impl Into<String>, desc: &PerspectiveDesc) -> Self {
        Self {
            name: name.into(),
            camera: ProjectionCamera::new(desc),
        }
    }

    /// Place the camera at `position` looking at `target`.
    pub fn looking_at(mut self, position: Vec3, target: Vec3) -> Self {
        self.camera.position = position;
        self.camera.look_at(target);
        self.camera.update_matrices();
        self
    }
}

impl SceneObject for StaticCamera {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_camera(&self) -> Option<&dyn CameraManager> {
        Some(self)
    }

    fn as_camera_mut(&mut self) -> Option<&mut dyn CameraManager> {
        Some(self)
    }
}

impl CameraManager for StaticCamera {
    fn camera(&self) -> &ProjectionCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut ProjectionCamera {
        &mut self.camera
    }
}

#[cfg(test)]
#[path = "static_camera_tests.rs"]
mod tests;
