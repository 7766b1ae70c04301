/// Mock Renderer for unit tests (no backend required)
///
/// Records every call as a string in a shared log so tests can inspect the
/// call sequence after the renderer has been handed to a SceneManager.

#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use rustc_hash::FxHashSet;

#[cfg(test)]
use crate::camera::ProjectionCamera;
#[cfg(test)]
use crate::renderer::{Renderer, Drawable, DrawableId, Light, PostEffect};

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockRendererState {
    pub commands: Vec<String>,
    pub drawables: FxHashSet<DrawableId>,
    pub light_count: usize,
    pub outlined: Vec<DrawableId>,
}

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MockRenderer {
    pub state: Arc<Mutex<MockRendererState>>,
}

#[cfg(test)]
impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<String> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.state.lock().unwrap()
            .commands.iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn has_drawable(&self, id: DrawableId) -> bool {
        self.state.lock().unwrap().drawables.contains(&id)
    }

    pub fn drawable_count(&self) -> usize {
        self.state.lock().unwrap().drawables.len()
    }

    pub fn light_count(&self) -> usize {
        self.state.lock().unwrap().light_count
    }

    pub fn outlined(&self) -> Vec<DrawableId> {
        self.state.lock().unwrap().outlined.clone()
    }
}

#[cfg(test)]
impl Renderer for MockRenderer {
    fn add(&mut self, owner: &str, drawables: &[Drawable], lights: &[Light]) {
        let mut state = self.state.lock().unwrap();
        state.commands.push(format!("add:{}", owner));
        state.drawables.extend(drawables.iter().map(|d| d.id()));
        state.light_count += lights.len();
    }

    fn remove(&mut self, owner: &str, drawables: &[Drawable], lights: &[Light]) {
        let mut state = self.state.lock().unwrap();
        state.commands.push(format!("remove:{}", owner));
        for drawable in drawables {
            state.drawables.remove(&drawable.id());
        }
        state.light_count -= lights.len();
    }

    fn setup(&mut self, _camera: &ProjectionCamera) {
        self.state.lock().unwrap().commands.push("setup".to_string());
    }

    fn render(&mut self, _camera: &ProjectionCamera) {
        self.state.lock().unwrap().commands.push("render".to_string());
    }

    fn outline_objects(&mut self, drawables: &[Drawable], _camera: &ProjectionCamera) {
        let mut state = self.state.lock().unwrap();
        state.commands.push("outline".to_string());
        state.outlined = drawables.iter().map(|d| d.id()).collect();
    }

    fn apply_effect(&mut self, effect: &PostEffect) {
        self.state.lock().unwrap().commands.push(format!("effect:{}", effect.name()));
    }
}
