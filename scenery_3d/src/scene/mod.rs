//! Scene module - scene objects, their manager and the render loop.

mod scene_object;
mod scene_object_group;
mod scene_manager;
mod render_loop;

pub use scene_object::{SceneObject, SceneContext, Message, FrameInfo};
pub(crate) use scene_object::Outgoing;
pub use scene_object_group::SceneObjectGroup;
pub use scene_manager::{SceneManager, SceneConfig, ObjectState};
pub use render_loop::{RenderLoop, CancellationToken, FrameScheduler, FixedRateScheduler};
