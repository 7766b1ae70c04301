/// Renderer module - the rendering collaborator interface and the
/// native object handles (drawables, lights) handed to it.

pub mod renderer;
pub mod drawable;
pub mod light;
pub mod post_effect;
pub(crate) mod mock_renderer;

pub use renderer::*;
pub use drawable::{Drawable, DrawableId};
pub use light::{Light, LightId, LightKind};
pub use post_effect::*;
