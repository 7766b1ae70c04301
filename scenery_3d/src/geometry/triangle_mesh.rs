/// Triangle mesh used for picking.
///
/// Positions are in local space. A mesh is shared between drawables through
/// `Arc`, so the same geometry can be placed many times with different world
/// matrices.

use glam::Vec3;
use crate::error::{Error, Result};
use super::aabb::AABB;

/// A single triangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Face normal following the counter-clockwise winding.
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a).normalize_or_zero()
    }

    /// Möller-Trumbore ray/triangle test, double sided.
    ///
    /// Returns `(t, u, v)`: the distance along `direction` and the
    /// barycentric coordinates of the hit relative to `b` and `c`.
    /// Degenerate triangles are never hit.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<(f32, f32, f32)> {
        // Relative to |edge1| * |edge2| * |direction|, so the parallel test
        // does not depend on the triangle's size
        const EPSILON: f32 = 1e-7;

        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;
        let h = direction.cross(edge2);
        let det = edge1.dot(h);

        // Ray parallel to the triangle plane
        let scale = edge1.length() * edge2.length() * direction.length();
        if det.abs() <= EPSILON * scale {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = origin - self.a;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        if t >= 0.0 {
            Some((t, u, v))
        } else {
            None
        }
    }
}

/// Indexed triangle mesh with a cached local-space bounding box.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
    bounds: AABB,
}

impl TriangleMesh {
    /// Build a mesh from positions and a flat triangle index list.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` if there are no positions, the index count is not a
    /// multiple of three, or an index is out of range.
    pub fn new(positions: Vec<Vec3>, indices: &[u32]) -> Result<Self> {
        let bounds = AABB::from_points(&positions)
            .ok_or_else(|| Error::InvalidGeometry("mesh has no positions".to_string()))?;

        if indices.len() % 3 != 0 {
            return Err(Error::InvalidGeometry(format!(
                "index count {} is not a multiple of 3", indices.len()
            )));
        }

        if let Some(bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(Error::InvalidGeometry(format!(
                "index {} out of range for {} positions", bad, positions.len()
            )));
        }

        let faces = indices
            .chunks_exact(3)
            .map(|f| [f[0], f[1], f[2]])
            .collect();

        Ok(Self { positions, faces, bounds })
    }

    /// Axis-aligned box centered on the origin.
    pub fn cuboid(half_extents: Vec3) -> Self {
        let h = half_extents;
        let positions = vec![
            Vec3::new(-h.x, -h.y,  h.z), Vec3::new( h.x, -h.y,  h.z),
            Vec3::new( h.x,  h.y,  h.z), Vec3::new(-h.x,  h.y,  h.z),
            Vec3::new(-h.x, -h.y, -h.z), Vec3::new( h.x, -h.y, -h.z),
            Vec3::new( h.x,  h.y, -h.z), Vec3::new(-h.x,  h.y, -h.z),
        ];
        let faces = vec![
            [0, 1, 2], [0, 2, 3], // +Z
            [5, 4, 7], [5, 7, 6], // -Z
            [1, 5, 6], [1, 6, 2], // +X
            [4, 0, 3], [4, 3, 7], // -X
            [3, 2, 6], [3, 6, 7], // +Y
            [4, 5, 1], [4, 1, 0], // -Y
        ];
        Self {
            positions,
            faces,
            bounds: AABB::new(-h, h),
        }
    }

    /// Quad in the XY plane facing +Z, centered on the origin.
    pub fn quad(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self {
            positions: vec![
                Vec3::new(-hw, -hh, 0.0),
                Vec3::new( hw, -hh, 0.0),
                Vec3::new( hw,  hh, 0.0),
                Vec3::new(-hw,  hh, 0.0),
            ],
            faces: vec![[0, 1, 2], [0, 2, 3]],
            bounds: AABB::new(Vec3::new(-hw, -hh, 0.0), Vec3::new(hw, hh, 0.0)),
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Local-space bounding box
    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    /// Local-space triangle for a face index
    pub fn triangle(&self, face: usize) -> Option<Triangle> {
        let [a, b, c] = *self.faces.get(face)?;
        Some(Triangle::new(
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ))
    }
}

#[cfg(test)]
#[path = "triangle_mesh_tests.rs"]
mod tests;
