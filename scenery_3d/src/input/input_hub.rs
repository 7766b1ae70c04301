/// InputHub - stock input source fed by the host window.
///
/// The host forwards raw window events (`key_down`, `key_up`,
/// `button_down`, `button_up`, `cursor_moved`); the hub turns them into the
/// callbacks cameras registered through `InputSource`.
///
/// Cursor movement is forwarded while the button is held (drag), or at all
/// times once a scene object acquired control through an
/// `InputRequest::AcquireControl` message. The hub is also a scene object so
/// it can receive those messages. Handles are cheap clones sharing state:
/// keep one in the host, register another in the scene.

use std::cell::RefCell;
use std::rc::Rc;
use glam::Vec2;
use winit::keyboard::KeyCode;
use crate::scene::{Message, SceneContext, SceneObject};
use super::input_source::{CursorMove, InputRequest, InputSource, KeyCallback, MoveCallback};

#[derive(Default)]
struct HubState {
    pressed: Vec<KeyCode>,
    dragging: bool,
    last_position: Option<Vec2>,
    sensitivity: f32,
    controller: Option<String>,
    key_callbacks: Vec<KeyCallback>,
    move_callbacks: Vec<MoveCallback>,
}

#[derive(Clone)]
pub struct InputHub {
    name: String,
    state: Rc<RefCell<HubState>>,
}

impl InputHub {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Rc::new(RefCell::new(HubState {
                sensitivity: 1.0,
                ..HubState::default()
            })),
        }
    }

    // ===== HOST EVENTS =====

    pub fn key_down(&self, code: KeyCode) {
        {
            let mut state = self.state.borrow_mut();
            if state.pressed.contains(&code) {
                return;
            }
            state.pressed.push(code);
        }
        self.notify_keys();
    }

    pub fn key_up(&self, code: KeyCode) {
        {
            let mut state = self.state.borrow_mut();
            let before = state.pressed.len();
            state.pressed.retain(|&pressed| pressed != code);
            if state.pressed.len() == before {
                return;
            }
        }
        self.notify_keys();
    }

    /// Drag starts
    pub fn button_down(&self) {
        self.state.borrow_mut().dragging = true;
    }

    pub fn button_up(&self) {
        self.state.borrow_mut().dragging = false;
    }

    /// Cursor moved to `position` (raster pixels).
    pub fn cursor_moved(&self, position: Vec2) {
        let movement = {
            let mut state = self.state.borrow_mut();
            let delta = state.last_position
                .map_or(Vec2::ZERO, |last| (position - last) * state.sensitivity);
            state.last_position = Some(position);
            if !state.dragging && state.controller.is_none() {
                return;
            }
            CursorMove { delta, position }
        };
        self.notify_move(movement);
    }

    // ===== QUERIES =====

    pub fn pressed_keys(&self) -> Vec<KeyCode> {
        self.state.borrow().pressed.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().dragging
    }

    /// Name of the object holding cursor control
    pub fn controller(&self) -> Option<String> {
        self.state.borrow().controller.clone()
    }

    pub fn cursor_sensitivity(&self) -> f32 {
        self.state.borrow().sensitivity
    }

    pub fn key_listener_count(&self) -> usize {
        self.state.borrow().key_callbacks.len()
    }

    pub fn move_listener_count(&self) -> usize {
        self.state.borrow().move_callbacks.len()
    }

    // ===== DISPATCH =====

    // Callbacks run with the state released, so they may call back into
    // the hub; listeners registered meanwhile are kept.
    fn notify_keys(&self) {
        let (mut callbacks, keys) = {
            let mut state = self.state.borrow_mut();
            (std::mem::take(&mut state.key_callbacks), state.pressed.clone())
        };
        for callback in callbacks.iter_mut() {
            callback(&keys);
        }
        let mut state = self.state.borrow_mut();
        callbacks.append(&mut state.key_callbacks);
        state.key_callbacks = callbacks;
    }

    fn notify_move(&self, movement: CursorMove) {
        let mut callbacks = std::mem::take(&mut self.state.borrow_mut().move_callbacks);
        for callback in callbacks.iter_mut() {
            callback(movement);
        }
        let mut state = self.state.borrow_mut();
        callbacks.append(&mut state.move_callbacks);
        state.move_callbacks = callbacks;
    }
}

impl InputSource for InputHub {
    fn register_key_event(&mut self, callback: KeyCallback) {
        self.state.borrow_mut().key_callbacks.push(callback);
    }

    fn register_move_event(&mut self, callback: MoveCallback) {
        self.state.borrow_mut().move_callbacks.push(callback);
    }

    fn set_cursor_sensitivity(&mut self, sensitivity: f32) {
        self.state.borrow_mut().sensitivity = sensitivity;
    }
}

impl SceneObject for InputHub {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_message(&mut self, _ctx: &mut SceneContext, message: &Message) {
        let Some(request) = message.downcast::<InputRequest>() else {
            return;
        };
        let mut state = self.state.borrow_mut();
        match request {
            InputRequest::AcquireControl => {
                crate::engine_debug!("scenery3d::InputHub", "'{}' acquired cursor control", message.from());
                state.controller = Some(message.from().to_string());
            }
            InputRequest::ReleaseControl => {
                if state.controller.as_deref() == Some(message.from()) {
                    crate::engine_debug!("scenery3d::InputHub", "'{}' released cursor control", message.from());
                    state.controller = None;
                }
            }
        }
    }

    fn on_scene_end(&mut self, _ctx: &mut SceneContext) {
        self.state.borrow_mut().controller = None;
    }
}

#[cfg(test)]
#[path = "input_hub_tests.rs"]
mod tests;
