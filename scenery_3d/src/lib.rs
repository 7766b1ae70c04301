/*!
# Scenery 3D

Scene-object framework layered over an external rendering backend.

The crate never draws anything itself. It keeps track of which objects
take part in a scene, drives them frame after frame, routes messages
between them, manages the cameras and answers picking queries. Drawing is
delegated to an implementation of the [`Renderer`](scenery3d::render::Renderer)
trait.

## Architecture

- **SceneManager**: registry of scene objects, mailbox, active camera,
  per-frame tick
- **SceneObject**: trait for anything taking part in the scene, with
  lifecycle hooks (start, render, end, message)
- **SceneObjectGroup**: scene object composed of child objects
- **CameraManager**: scene objects driving a projection camera
  (static, orbital, first person)
- **RayCast**: pickable drawables and ray/triangle queries
- **RenderLoop**: frame driver with cooperative cancellation
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod geometry;
pub mod renderer;
pub mod raycast;
pub mod camera;
pub mod input;
pub mod scene;

// Main scenery3d namespace module
pub mod scenery3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Geometry used for picking
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Renderer interface, drawables, lights, post effects
    pub mod render {
        pub use crate::renderer::{
            Renderer, Drawable, DrawableId, Light, LightId, LightKind,
            PostEffect, BloomSettings, SsaoSettings, ToneMappingMode, ToneMappingSettings,
            ColorBalanceSettings, AntiAliasing,
        };
    }

    // Ray casting
    pub mod raycast {
        pub use crate::raycast::*;
    }

    // Cameras
    pub mod camera {
        pub use crate::camera::*;
    }

    // Input
    pub mod input {
        pub use crate::input::*;
    }

    // Scene objects, manager and render loop
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
