/// Input source interface and the messages exchanged with it.

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Called with every key currently held, each time that set changes.
pub type KeyCallback = Box<dyn FnMut(&[KeyCode])>;

/// Called with each cursor movement forwarded by the source.
pub type MoveCallback = Box<dyn FnMut(CursorMove)>;

/// One cursor movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorMove {
    /// Movement since the previous event, scaled by the cursor sensitivity
    pub delta: Vec2,
    /// Raster position after the move
    pub position: Vec2,
}

/// Something that produces key and cursor events for cameras.
pub trait InputSource {
    fn register_key_event(&mut self, callback: KeyCallback);

    fn register_move_event(&mut self, callback: MoveCallback);

    fn set_cursor_sensitivity(&mut self, sensitivity: f32);
}

/// Requests a scene object can send to the input object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRequest {
    /// Forward every cursor movement to listeners, not only drags
    AcquireControl,
    /// Give back control taken with `AcquireControl`
    ReleaseControl,
}
