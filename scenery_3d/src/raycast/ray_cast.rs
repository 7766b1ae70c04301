/// RayCast - registry of pickable drawables and the intersection queries.
///
/// Pickables live in a SlotMap (the flat list every query walks); each owner
/// name maps to the keys it registered, so removing an owner removes exactly
/// its pickables without rebuilding the store.

use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::camera::ProjectionCamera;
use crate::geometry::Triangle;
use crate::renderer::Drawable;
use super::ray::{FaceHit, Ray, RayHit};

new_key_type! {
    /// Stable handle to a registered pickable
    pub struct PickableKey;
}

/// Hits on one drawable closer than this (relative to the distance) are
/// the same surface point
const SAME_HIT_TOLERANCE: f32 = 1e-5;

struct Pickable {
    owner: String,
    drawable: Drawable,
}

pub struct RayCast {
    pickables: SlotMap<PickableKey, Pickable>,
    owners: FxHashMap<String, Vec<PickableKey>>,
}

impl RayCast {
    pub fn new() -> Self {
        Self {
            pickables: SlotMap::with_key(),
            owners: FxHashMap::default(),
        }
    }

    /// Register a drawable as pickable under `owner`.
    pub fn add(&mut self, owner: &str, drawable: Drawable) -> PickableKey {
        let key = self.pickables.insert(Pickable {
            owner: owner.to_string(),
            drawable,
        });
        self.owners.entry(owner.to_string()).or_default().push(key);
        key
    }

    /// Remove every pickable registered under `owner`.
    ///
    /// Returns how many were removed; unknown owners remove nothing.
    pub fn remove(&mut self, owner: &str) -> usize {
        let Some(keys) = self.owners.remove(owner) else {
            return 0;
        };
        keys.into_iter()
            .filter(|&key| self.pickables.remove(key).is_some())
            .count()
    }

    /// Number of pickables across all owners
    pub fn len(&self) -> usize {
        self.pickables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickables.is_empty()
    }

    pub fn contains_owner(&self, owner: &str) -> bool {
        self.owners.contains_key(owner)
    }

    /// Number of pickables registered under `owner`
    pub fn owner_count(&self, owner: &str) -> usize {
        self.owners.get(owner).map_or(0, Vec::len)
    }

    /// Cast a ray from `camera` through a normalized device coordinate.
    ///
    /// Hits are ordered nearest first.
    pub fn raycast_from_camera(&self, ndc: Vec2, camera: &ProjectionCamera) -> Vec<RayHit> {
        self.intersect(&camera.ray_through_ndc(ndc))
    }

    /// Cast an explicit world-space ray. Hits are ordered nearest first.
    pub fn raycast(&self, origin: Vec3, direction: Vec3) -> Vec<RayHit> {
        self.intersect(&Ray::new(origin, direction))
    }

    fn intersect(&self, ray: &Ray) -> Vec<RayHit> {
        let mut hits = Vec::new();
        if ray.direction == Vec3::ZERO {
            return hits;
        }

        for pickable in self.pickables.values() {
            Self::intersect_drawable(ray, pickable, &mut hits);
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn intersect_drawable(ray: &Ray, pickable: &Pickable, hits: &mut Vec<RayHit>) {
        let drawable = &pickable.drawable;
        let Some(mesh) = drawable.mesh() else {
            return;
        };

        // Broad phase, at the drawable's current pose
        let world = drawable.world_matrix();
        let bounds = mesh.bounds().transformed(&world);
        if bounds.intersect_ray(ray.origin, ray.direction).is_none() {
            return;
        }

        let first = hits.len();
        for (index, vertices) in mesh.faces().iter().enumerate() {
            let Some(local) = mesh.triangle(index) else {
                continue;
            };
            let triangle = Triangle::new(
                world.transform_point3(local.a),
                world.transform_point3(local.b),
                world.transform_point3(local.c),
            );
            if let Some((t, u, v)) = triangle.intersect_ray(ray.origin, ray.direction) {
                // A ray through an edge shared by two faces hits both at the same t
                let tolerance = SAME_HIT_TOLERANCE * t.max(1.0);
                if hits[first..].iter().any(|hit| (hit.distance - t).abs() <= tolerance) {
                    continue;
                }
                hits.push(RayHit {
                    owner: pickable.owner.clone(),
                    drawable: drawable.clone(),
                    distance: t,
                    point: ray.point_at(t),
                    face: FaceHit {
                        index,
                        vertices: *vertices,
                        normal: triangle.normal(),
                        barycentric: Vec2::new(u, v),
                    },
                });
            }
        }
    }
}

impl Default for RayCast {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "ray_cast_tests.rs"]
mod tests;
