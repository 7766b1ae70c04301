/// SceneObject - anything that takes part in a scene.
///
/// A scene object is identified by its name. It may expose drawables and
/// lights to the renderer, and it receives lifecycle hooks from the
/// SceneManager: start when it becomes active, render once per frame, end
/// when it is unregistered, and message whenever another object sends it
/// data.
///
/// Hooks never see the manager itself. They get a `SceneContext`, an outbox
/// whose messages the manager dispatches as soon as the hook returns.

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use crate::camera::{CameraManager, Viewport};
use crate::renderer::{Drawable, Light};

/// Data sent from one scene object to another
#[derive(Clone)]
pub struct Message {
    from: String,
    data: Rc<dyn Any>,
}

impl Message {
    pub fn new(from: impl Into<String>, data: Rc<dyn Any>) -> Self {
        Self {
            from: from.into(),
            data,
        }
    }

    /// Name of the sender
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Shared, type-erased payload
    pub fn data(&self) -> &Rc<dyn Any> {
        &self.data
    }

    /// Payload as `T`, if that is what was sent
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.data.is::<T>()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

/// Message waiting in a context outbox
pub(crate) enum Outgoing {
    To { to: String, data: Rc<dyn Any> },
    All { data: Rc<dyn Any> },
}

/// Outbox handed to every scene object hook.
pub struct SceneContext {
    name: String,
    outbox: Vec<Outgoing>,
}

impl SceneContext {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outbox: Vec::new(),
        }
    }

    /// Name of the object the hook runs for; used as the sender name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send `data` to the object named `to`.
    ///
    /// Delivered right after the hook returns, or queued until `to` is
    /// registered.
    pub fn send<T: Any>(&mut self, to: &str, data: T) {
        self.send_shared(to, Rc::new(data));
    }

    /// Send an already shared payload to the object named `to`.
    pub fn send_shared(&mut self, to: &str, data: Rc<dyn Any>) {
        self.outbox.push(Outgoing::To {
            to: to.to_string(),
            data,
        });
    }

    /// Send `data` to every registered object except the sender.
    pub fn send_to_all<T: Any>(&mut self, data: T) {
        self.outbox.push(Outgoing::All { data: Rc::new(data) });
    }

    /// Number of messages waiting for dispatch
    pub fn pending(&self) -> usize {
        self.outbox.len()
    }

    pub(crate) fn take_outbox(&mut self) -> Vec<Outgoing> {
        std::mem::take(&mut self.outbox)
    }
}

/// Per-frame data passed to `on_scene_render`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Zero-based frame counter
    pub index: u64,
    /// Seconds since the previous frame (0 on the first frame)
    pub delta_seconds: f32,
    pub viewport: Viewport,
}

/// Capability trait for scene participants.
///
/// Every method except `name` has a default, so a plain object only has to
/// name itself.
pub trait SceneObject {
    /// Unique name, used as registry and mailbox key.
    fn name(&self) -> &str;

    /// True when the object has geometry to hand to the renderer.
    fn is_drawable(&self) -> bool {
        false
    }

    /// Drawable objects that are not ready yet (still loading) are parked
    /// until a later frame finds them ready.
    fn is_ready(&self) -> bool {
        true
    }

    fn drawables(&self) -> Vec<Drawable> {
        Vec::new()
    }

    fn lights(&self) -> Vec<Light> {
        Vec::new()
    }

    /// The object became active in the scene.
    fn on_scene_start(&mut self, _ctx: &mut SceneContext) {}

    /// Called once per rendered frame, after the renderer drew it.
    fn on_scene_render(&mut self, _ctx: &mut SceneContext, _frame: &FrameInfo) {}

    /// The object is being removed from the scene.
    fn on_scene_end(&mut self, _ctx: &mut SceneContext) {}

    /// Another object sent data to this one.
    fn on_message(&mut self, _ctx: &mut SceneContext, _message: &Message) {}

    /// Camera capability, if this object is a camera manager.
    fn as_camera(&self) -> Option<&dyn CameraManager> {
        None
    }

    fn as_camera_mut(&mut self) -> Option<&mut dyn CameraManager> {
        None
    }
}

#[cfg(test)]
#[path = "scene_object_tests.rs"]
mod tests;
