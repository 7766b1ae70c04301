/// SceneObjectGroup - a scene object made of child scene objects.
///
/// The group is registered under its own name; its children are not
/// registered individually. Drawables and lights are gathered from the
/// children each time they are asked for, and every lifecycle hook is
/// forwarded to each child in insertion order, with the group's context
/// (messages sent by children go out under the group's name).

use crate::renderer::{Drawable, Light};
use super::scene_object::{FrameInfo, Message, SceneContext, SceneObject};

pub struct SceneObjectGroup {
    name: String,
    children: Vec<Box<dyn SceneObject>>,
}

impl SceneObjectGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn add<O: SceneObject + 'static>(&mut self, child: O) {
        self.children.push(Box::new(child));
    }

    pub fn add_boxed(&mut self, child: Box<dyn SceneObject>) {
        self.children.push(child);
    }

    pub fn with<O: SceneObject + 'static>(mut self, child: O) -> Self {
        self.add(child);
        self
    }

    /// Detach the child called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn SceneObject>> {
        let index = self.children.iter().position(|child| child.name() == name)?;
        Some(self.children.remove(index))
    }

    pub fn child(&self, name: &str) -> Option<&dyn SceneObject> {
        self.children.iter()
            .find(|child| child.name() == name)
            .map(|child| &**child as &dyn SceneObject)
    }

    pub fn children(&self) -> impl Iterator<Item = &dyn SceneObject> {
        self.children.iter().map(|child| &**child as &dyn SceneObject)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl SceneObject for SceneObjectGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_drawable(&self) -> bool {
        self.children.iter().any(|child| child.is_drawable())
    }

    fn is_ready(&self) -> bool {
        self.children.iter().all(|child| child.is_ready())
    }

    fn drawables(&self) -> Vec<Drawable> {
        self.children.iter().flat_map(|child| child.drawables()).collect()
    }

    fn lights(&self) -> Vec<Light> {
        self.children.iter().flat_map(|child| child.lights()).collect()
    }

    fn on_scene_start(&mut self, ctx: &mut SceneContext) {
        for child in &mut self.children {
            child.on_scene_start(ctx);
        }
    }

    fn on_scene_render(&mut self, ctx: &mut SceneContext, frame: &FrameInfo) {
        for child in &mut self.children {
            child.on_scene_render(ctx, frame);
        }
    }

    fn on_scene_end(&mut self, ctx: &mut SceneContext) {
        for child in &mut self.children {
            child.on_scene_end(ctx);
        }
    }

    fn on_message(&mut self, ctx: &mut SceneContext, message: &Message) {
        for child in &mut self.children {
            child.on_message(ctx, message);
        }
    }
}

#[cfg(test)]
#[path = "scene_object_group_tests.rs"]
mod tests;
