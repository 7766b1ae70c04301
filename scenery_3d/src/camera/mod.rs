//! Camera module - projection camera, viewport and camera managers.
//!
//! `ProjectionCamera` is the passive object the renderer draws from.
//! Camera managers are scene objects that own one and move it: a fixed
//! `StaticCamera`, an `OrbitalCamera` turning around a pivot, and a
//! `FirstPersonCamera` walking the scene.

mod viewport;
mod projection_camera;
mod camera_manager;
mod static_camera;
mod orbital_camera;
mod first_person_camera;

pub use viewport::Viewport;
pub use projection_camera::{ProjectionCamera, PerspectiveDesc};
pub use camera_manager::CameraManager;
pub use static_camera::StaticCamera;
pub use orbital_camera::{
    OrbitalCamera, OrbitalDesc, OrbitProposal, OrbitVerdict, OrbitRestriction,
    clamp_pitch, forbid_below,
};
pub use first_person_camera::{FirstPersonCamera, FirstPersonDesc, MAX_PITCH_DEGREES};
