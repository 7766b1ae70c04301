//! Pick geometry: bounding boxes and triangle meshes used by ray casting.
//!
//! Only positions and triangle indices are kept here. Everything else about a
//! mesh (materials, attributes, GPU buffers) lives in the rendering backend.

mod aabb;
mod triangle_mesh;

pub use aabb::AABB;
pub use triangle_mesh::{TriangleMesh, Triangle};
