/// Movement key set used by the first-person camera.

use bitflags::bitflags;
use winit::keyboard::KeyCode;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveKeys: u8 {
        const FORWARD = 1 << 0;
        const BACKWARD = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const UP = 1 << 4;
        const DOWN = 1 << 5;
    }
}

impl MoveKeys {
    /// WASD and arrows move, Space rises, Shift sinks.
    pub fn from_key(code: KeyCode) -> Self {
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => MoveKeys::FORWARD,
            KeyCode::KeyS | KeyCode::ArrowDown => MoveKeys::BACKWARD,
            KeyCode::KeyA | KeyCode::ArrowLeft => MoveKeys::LEFT,
            KeyCode::KeyD | KeyCode::ArrowRight => MoveKeys::RIGHT,
            KeyCode::Space => MoveKeys::UP,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => MoveKeys::DOWN,
            _ => MoveKeys::empty(),
        }
    }

    pub fn from_keys(codes: &[KeyCode]) -> Self {
        codes.iter()
            .fold(MoveKeys::empty(), |keys, &code| keys | MoveKeys::from_key(code))
    }
}

#[cfg(test)]
#[path = "move_keys_tests.rs"]
mod tests;
