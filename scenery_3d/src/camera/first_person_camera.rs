/// FirstPersonCamera - keyboard walk + cursor look.
///
/// Movement keys translate the camera by a fixed step per frame along the
/// view direction flattened onto the horizontal plane, so looking up or
/// down never changes walking speed. Cursor deltas turn the camera (yaw)
/// and tilt it (pitch); pitch is clamped to +/-85 degrees.
///
/// When it becomes the active camera it asks the configured input object
/// (`FirstPersonDesc::input_object`, "input" by default) for exclusive
/// cursor control, and gives it back when it stops being active. The input
/// object must be registered under that exact name: otherwise the request
/// waits in the scene mailbox and the camera only turns while dragging.
/// Activation logs a warning in that case.

use std::cell::RefCell;
use std::rc::Rc;
use glam::{EulerRot, Quat, Vec2, Vec3};
use winit::keyboard::KeyCode;
use crate::input::{CursorMove, InputRequest, InputSource, MoveKeys};
use crate::scene::{FrameInfo, SceneContext, SceneObject};
use super::camera_manager::CameraManager;
use super::projection_camera::{PerspectiveDesc, ProjectionCamera};

/// Hard pitch limit in degrees
pub const MAX_PITCH_DEGREES: f32 = 85.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonDesc {
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    /// World units per frame while a movement key is held
    pub step: f32,
    /// Radians per pixel of cursor movement
    pub look_speed: f32,
    /// Pitch limit, never above `MAX_PITCH_DEGREES`
    pub max_pitch_degrees: f32,
    /// Name the input object is registered under; it receives control
    /// requests. `None` never asks for control.
    pub input_object: Option<String>,
    pub cursor_sensitivity: f32,
    pub perspective: PerspectiveDesc,
}

impl Default for FirstPersonDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.7, 0.0),
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            step: 0.1,
            look_speed: 0.003,
            max_pitch_degrees: MAX_PITCH_DEGREES,
            input_object: Some("input".to_string()),
            cursor_sensitivity: 1.0,
            perspective: PerspectiveDesc::default(),
        }
    }
}

#[derive(Debug, Default)]
struct PendingInput {
    keys: MoveKeys,
    look: Vec2,
}

pub struct FirstPersonCamera {
    name: String,
    camera: ProjectionCamera,
    yaw: f32,
    pitch: f32,
    max_pitch: f32,
    step: f32,
    look_speed: f32,
    cursor_sensitivity: f32,
    input_object: Option<String>,
    pending: Rc<RefCell<PendingInput>>,
    active: bool,
}

impl FirstPersonCamera {
    pub fn new(name: impl Into<String>, desc: &FirstPersonDesc) -> Self {
        let max_pitch = desc.max_pitch_degrees.clamp(0.0, MAX_PITCH_DEGREES).to_radians();
        let mut camera = Self {
            name: name.into(),
            camera: ProjectionCamera::new(&desc.perspective),
            yaw: desc.yaw_degrees.to_radians(),
            pitch: desc.pitch_degrees.to_radians().clamp(-max_pitch, max_pitch),
            max_pitch,
            step: desc.step,
            look_speed: desc.look_speed,
            cursor_sensitivity: desc.cursor_sensitivity,
            input_object: desc.input_object.clone(),
            pending: Rc::new(RefCell::new(PendingInput::default())),
            active: false,
        };
        camera.camera.position = desc.position;
        camera.apply_rotation();
        camera
    }

    /// Yaw in radians, 0 looking down -Z
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in radians, positive looking up
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Keys currently held, as seen by the last key event
    pub fn held_keys(&self) -> MoveKeys {
        self.pending.borrow().keys
    }

    /// Turn by `delta_yaw` and tilt by `delta_pitch` (radians).
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-self.max_pitch, self.max_pitch);
        self.apply_rotation();
    }

    /// Move one step in the direction given by `keys`.
    pub fn walk(&mut self, keys: MoveKeys) {
        let forward = self.camera.forward();
        let right = self.camera.right();
        let front = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let side = Vec3::new(right.x, 0.0, right.z).normalize_or_zero();

        let mut direction = Vec3::ZERO;
        if keys.contains(MoveKeys::FORWARD) {
            direction += front;
        }
        if keys.contains(MoveKeys::BACKWARD) {
            direction -= front;
        }
        if keys.contains(MoveKeys::RIGHT) {
            direction += side;
        }
        if keys.contains(MoveKeys::LEFT) {
            direction -= side;
        }
        if keys.contains(MoveKeys::UP) {
            direction += Vec3::Y;
        }
        if keys.contains(MoveKeys::DOWN) {
            direction -= Vec3::Y;
        }

        self.camera.position += direction.normalize_or_zero() * self.step;
    }

    fn apply_rotation(&mut self) {
        self.camera.rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
    }

    fn send_request(&self, ctx: &mut SceneContext, request: InputRequest) {
        if let Some(input) = &self.input_object {
            ctx.send(input, request);
        }
    }
}

impl SceneObject for FirstPersonCamera {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_scene_render(&mut self, _ctx: &mut SceneContext, _frame: &FrameInfo) {
        let (keys, look) = {
            let mut pending = self.pending.borrow_mut();
            (pending.keys, std::mem::take(&mut pending.look))
        };
        if !self.active {
            return;
        }
        if look != Vec2::ZERO {
            self.rotate(-look.x * self.look_speed, -look.y * self.look_speed);
        }
        if !keys.is_empty() {
            self.walk(keys);
        }
    }

    fn as_camera(&self) -> Option<&dyn CameraManager> {
        Some(self)
    }

    fn as_camera_mut(&mut self) -> Option<&mut dyn CameraManager> {
        Some(self)
    }
}

impl CameraManager for FirstPersonCamera {
    fn camera(&self) -> &ProjectionCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut ProjectionCamera {
        &mut self.camera
    }

    fn register_input(&mut self, input: &mut dyn InputSource) {
        input.set_cursor_sensitivity(self.cursor_sensitivity);

        let pending = Rc::clone(&self.pending);
        input.register_key_event(Box::new(move |keys: &[KeyCode]| {
            pending.borrow_mut().keys = MoveKeys::from_keys(keys);
        }));

        let pending = Rc::clone(&self.pending);
        input.register_move_event(Box::new(move |movement: CursorMove| {
            pending.borrow_mut().look += movement.delta;
        }));
    }

    /// Sets yaw and pitch from the quaternion (roll is dropped).
    fn set_rotation(&mut self, rotation: Quat) {
        let (yaw, pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
        self.yaw = yaw;
        self.pitch = pitch.clamp(-self.max_pitch, self.max_pitch);
        self.apply_rotation();
    }

    fn on_active(&mut self, ctx: &mut SceneContext) {
        self.active = true;
        self.send_request(ctx, InputRequest::AcquireControl);
    }

    fn on_inactive(&mut self, ctx: &mut SceneContext) {
        self.active = false;
        *self.pending.borrow_mut() = PendingInput::default();
        self.send_request(ctx, InputRequest::ReleaseControl);
    }
}

#[cfg(test)]
#[path = "first_person_camera_tests.rs"]
mod tests;
