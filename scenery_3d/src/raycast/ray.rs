/// Rays and ray-cast results.

use glam::{Vec2, Vec3};
use crate::renderer::{Drawable, DrawableId};

/// Half-line in world space. The direction is always normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Which triangle of the mesh was hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceHit {
    /// Index of the triangle in the mesh's face list
    pub index: usize,
    /// Vertex indices of the triangle
    pub vertices: [u32; 3],
    /// World-space face normal
    pub normal: Vec3,
    /// Barycentric coordinates of the hit relative to the 2nd and 3rd vertex
    pub barycentric: Vec2,
}

/// One ray/surface intersection
///
/// A drawable is reported once per surface point the ray crosses: a closed
/// mesh usually yields an entry and an exit hit. When the ray runs through
/// an edge or vertex shared by several faces, only the first face (in mesh
/// order) is reported.
#[derive(Debug, Clone)]
pub struct RayHit {
    /// Name of the scene object that registered the drawable
    pub owner: String,
    /// The drawable that was hit
    pub drawable: Drawable,
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    pub face: FaceHit,
}

impl RayHit {
    pub fn drawable_id(&self) -> DrawableId {
        self.drawable.id()
    }
}
