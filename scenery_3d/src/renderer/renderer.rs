/// Renderer trait - the rendering backend as seen by the scene core
///
/// The scene core never draws anything itself. It tells the backend which
/// native objects belong to the scene, which camera to draw from, and when
/// to draw a frame. Everything else (materials, passes, compositing) is the
/// backend's business.

use crate::camera::ProjectionCamera;
use super::drawable::Drawable;
use super::light::Light;
use super::post_effect::PostEffect;

/// Rendering backend interface
///
/// All calls happen on the frame thread; implementations need not be
/// `Send`.
pub trait Renderer {
    /// Add a scene object's drawables and lights to the rendered scene.
    fn add(&mut self, owner: &str, drawables: &[Drawable], lights: &[Light]);

    /// Remove exactly the drawables and lights previously added for `owner`.
    fn remove(&mut self, owner: &str, drawables: &[Drawable], lights: &[Light]);

    /// Point the backend at a new camera (called on camera activation).
    fn setup(&mut self, camera: &ProjectionCamera);

    /// Draw one frame from `camera`.
    fn render(&mut self, camera: &ProjectionCamera);

    /// Draw a highlight outline around the given drawables.
    fn outline_objects(&mut self, drawables: &[Drawable], camera: &ProjectionCamera);

    /// Apply a post-processing setting.
    fn apply_effect(&mut self, effect: &PostEffect);
}
