/// Drawable - handle to a native renderable object.
///
/// A drawable is what a scene object exposes to the renderer: a stable id,
/// a world matrix and, when it can be picked, the triangle mesh used for
/// ray casting. Clones share the same id and refer to the same native object,
/// including its pose: moving one clone moves what the renderer draws and
/// what ray casting tests.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use glam::Mat4;
use crate::geometry::{TriangleMesh, AABB};

static NEXT_DRAWABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique drawable identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(u64);

impl DrawableId {
    fn next() -> Self {
        Self(NEXT_DRAWABLE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Drawable {
    id: DrawableId,
    name: String,
    mesh: Option<Arc<TriangleMesh>>,
    world_matrix: Rc<Cell<Mat4>>,
    raycastable: bool,
}

impl Drawable {
    /// Pickable drawable backed by a triangle mesh, at the origin.
    pub fn new(name: impl Into<String>, mesh: Arc<TriangleMesh>) -> Self {
        Self {
            id: DrawableId::next(),
            name: name.into(),
            mesh: Some(mesh),
            world_matrix: Rc::new(Cell::new(Mat4::IDENTITY)),
            raycastable: true,
        }
    }

    /// Drawable with no pick geometry (sprites, helpers, skyboxes).
    pub fn without_geometry(name: impl Into<String>) -> Self {
        Self {
            id: DrawableId::next(),
            name: name.into(),
            mesh: None,
            world_matrix: Rc::new(Cell::new(Mat4::IDENTITY)),
            raycastable: false,
        }
    }

    pub fn with_world_matrix(self, world_matrix: Mat4) -> Self {
        self.world_matrix.set(world_matrix);
        self
    }

    /// Opt in or out of ray casting. Ignored when there is no mesh.
    pub fn with_raycast(mut self, raycastable: bool) -> Self {
        self.raycastable = raycastable;
        self
    }

    pub fn id(&self) -> DrawableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> Option<&Arc<TriangleMesh>> {
        self.mesh.as_ref()
    }

    /// Current pose, shared by every clone
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix.get()
    }

    /// Move the drawable. Every clone (the renderer's, the ray caster's)
    /// sees the new pose.
    pub fn set_world_matrix(&self, world_matrix: Mat4) {
        self.world_matrix.set(world_matrix);
    }

    /// True when the drawable should be registered with RayCast.
    pub fn is_raycastable(&self) -> bool {
        self.raycastable && self.mesh.is_some()
    }

    /// World-space bounding box, if the drawable has geometry.
    pub fn world_bounds(&self) -> Option<AABB> {
        self.mesh.as_ref().map(|m| m.bounds().transformed(&self.world_matrix.get()))
    }
}
