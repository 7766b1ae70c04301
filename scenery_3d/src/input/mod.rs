//! Input module - the source interface cameras subscribe to, and a stock
//! hub implementation fed by the host window.

mod input_source;
mod move_keys;
mod input_hub;

pub use input_source::{InputSource, CursorMove, InputRequest, KeyCallback, MoveCallback};
pub use move_keys::MoveKeys;
pub use input_hub::InputHub;
