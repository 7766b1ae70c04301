/// CameraManager - scene objects that drive a ProjectionCamera.
///
/// A camera manager is a regular scene object that owns a projection camera
/// and knows how to move it. The SceneManager finds cameras through
/// `SceneObject::as_camera`, so implementors also override that method to
/// return `Some(self)`.

use glam::{Quat, Vec2, Vec3};
use crate::input::InputSource;
use crate::scene::{SceneContext, SceneObject};
use super::projection_camera::ProjectionCamera;
use super::viewport::Viewport;

pub trait CameraManager: SceneObject {
    fn camera(&self) -> &ProjectionCamera;

    fn camera_mut(&mut self) -> &mut ProjectionCamera;

    /// Subscribe to an input source. Cameras without input ignore it.
    fn register_input(&mut self, _input: &mut dyn InputSource) {}

    fn position(&self) -> Vec3 {
        self.camera().position
    }

    fn set_position(&mut self, position: Vec3) {
        self.camera_mut().position = position;
    }

    fn rotation(&self) -> Quat {
        self.camera().rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.camera_mut().rotation = rotation;
    }

    fn set_aspect_ratio(&mut self, aspect: f32) {
        self.camera_mut().aspect = aspect;
    }

    fn update_matrices(&mut self) {
        self.camera_mut().update_matrices();
    }

    fn world_to_view(&self, point: Vec3) -> Vec3 {
        self.camera().world_to_view(point)
    }

    fn world_to_raster(&self, point: Vec3, viewport: &Viewport) -> Vec2 {
        self.camera().world_to_raster(point, viewport)
    }

    /// This camera became the scene's active camera.
    fn on_active(&mut self, _ctx: &mut SceneContext) {}

    /// Another camera took over, or this one left the scene.
    fn on_inactive(&mut self, _ctx: &mut SceneContext) {}
}
