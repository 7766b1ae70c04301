/// ProjectionCamera - the perspective camera the renderer draws from.
///
/// Holds the pose (position + rotation) and lens (fov, aspect, near, far)
/// and caches the view and projection matrices. The matrices are only
/// recomputed by `update_matrices`, which the SceneManager calls for the
/// active camera at the start of every frame. Clip space follows the
/// OpenGL convention (z in [-1, 1]).

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use crate::raycast::Ray;
use super::viewport::Viewport;

/// Lens parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveDesc {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveDesc {
    fn default() -> Self {
        Self {
            fov_y_degrees: 50.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectionCamera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl ProjectionCamera {
    /// Camera at the origin looking down -Z, matrices already computed.
    pub fn new(desc: &PerspectiveDesc) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: desc.fov_y_degrees.to_radians(),
            aspect: 1.0,
            near: desc.near,
            far: desc.far,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_matrices();
        camera
    }

    /// Recompute the cached view and projection matrices.
    pub fn update_matrices(&mut self) {
        let world = Mat4::from_rotation_translation(self.rotation, self.position);
        self.view_matrix = world.inverse();
        self.projection_matrix = Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far);
    }

    // ===== ORIENTATION =====

    /// Direction the camera looks at (local -Z)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Rotate the camera so it faces `target`, keeping +Y up.
    ///
    /// Does nothing when `target` is the camera position.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        // Looking straight up or down: any horizontal axis works as up
        let up_hint = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        let right = forward.cross(up_hint).normalize();
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
    }

    // ===== MATRICES =====

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    // ===== TRANSFORMS =====

    /// World point to camera space
    pub fn world_to_view(&self, point: Vec3) -> Vec3 {
        self.view_matrix.transform_point3(point)
    }

    /// World point to normalized device coordinates (perspective divide applied)
    pub fn world_to_ndc(&self, point: Vec3) -> Vec3 {
        self.view_projection_matrix().project_point3(point)
    }

    /// World point to a raster position inside `viewport`
    pub fn world_to_raster(&self, point: Vec3, viewport: &Viewport) -> Vec2 {
        let ndc = self.world_to_ndc(point);
        viewport.ndc_to_raster(Vec2::new(ndc.x, ndc.y))
    }

    /// Ray from the camera position through an NDC point
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection_matrix().inverse();
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - self.position)
    }
}

impl Default for ProjectionCamera {
    fn default() -> Self {
        Self::new(&PerspectiveDesc::default())
    }
}

#[cfg(test)]
#[path = "projection_camera_tests.rs"]
mod tests;
