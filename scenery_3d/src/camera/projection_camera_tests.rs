use glam::{Quat, Vec2, Vec3};
use super::*;

fn looking_at_origin_from(position: Vec3) -> ProjectionCamera {
    let mut camera = ProjectionCamera::default();
    camera.position = position;
    camera.look_at(Vec3::ZERO);
    camera.update_matrices();
    camera
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_from_desc() {
    let camera = ProjectionCamera::new(&PerspectiveDesc { fov_y_degrees: 90.0, near: 1.0, far: 50.0 });

    assert!((camera.fov_y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(camera.near, 1.0);
    assert_eq!(camera.far, 50.0);
    assert_eq!(camera.aspect, 1.0);
    assert_eq!(camera.forward(), Vec3::NEG_Z);
}

#[test]
fn test_default_desc() {
    let desc = PerspectiveDesc::default();
    assert_eq!(desc.fov_y_degrees, 50.0);
    assert_eq!(desc.near, 0.1);
}

// ============================================================================
// look_at
// ============================================================================

#[test]
fn test_look_at_faces_target() {
    let camera = looking_at_origin_from(Vec3::new(3.0, 4.0, 5.0));
    let expected = (-camera.position).normalize();
    assert!((camera.forward() - expected).length() < 1e-5);
    // Right vector stays horizontal
    assert!(camera.right().y.abs() < 1e-5);
}

#[test]
fn test_look_at_straight_down() {
    let camera = looking_at_origin_from(Vec3::new(0.0, 10.0, 0.0));
    assert!((camera.forward() - Vec3::NEG_Y).length() < 1e-5);
    assert!(camera.rotation.is_finite());
}

#[test]
fn test_look_at_own_position_is_noop() {
    let mut camera = ProjectionCamera::default();
    camera.rotation = Quat::from_rotation_y(0.5);
    camera.look_at(Vec3::ZERO);
    assert_eq!(camera.rotation, Quat::from_rotation_y(0.5));
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn test_world_to_view() {
    let camera = looking_at_origin_from(Vec3::new(0.0, 0.0, 10.0));
    let view = camera.world_to_view(Vec3::ZERO);
    assert!((view - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-5);
}

#[test]
fn test_world_to_view_uses_cached_matrices() {
    let mut camera = looking_at_origin_from(Vec3::new(0.0, 0.0, 10.0));
    camera.position = Vec3::new(0.0, 0.0, 20.0);

    // Not updated yet
    assert!((camera.world_to_view(Vec3::ZERO).z + 10.0).abs() < 1e-5);
    camera.update_matrices();
    assert!((camera.world_to_view(Vec3::ZERO).z + 20.0).abs() < 1e-5);
}

#[test]
fn test_world_to_raster_center() {
    let camera = looking_at_origin_from(Vec3::new(0.0, 0.0, 10.0));
    let raster = camera.world_to_raster(Vec3::ZERO, &Viewport::from_size(800.0, 600.0));
    assert!((raster - Vec2::new(400.0, 300.0)).length() < 1e-3);
}

#[test]
fn test_world_to_raster_up_is_top() {
    let camera = looking_at_origin_from(Vec3::new(0.0, 0.0, 10.0));
    let raster = camera.world_to_raster(Vec3::new(0.0, 1.0, 0.0), &Viewport::from_size(800.0, 600.0));
    assert!(raster.y < 300.0);
}

#[test]
fn test_world_to_ndc_depth_range() {
    let camera = looking_at_origin_from(Vec3::new(0.0, 0.0, 10.0));
    let ndc = camera.world_to_ndc(Vec3::ZERO);
    assert!(ndc.z > -1.0 && ndc.z < 1.0);
}

// ============================================================================
// ray_through_ndc
// ============================================================================

#[test]
fn test_ray_through_center() {
    let camera = looking_at_origin_from(Vec3::new(0.0, 0.0, 10.0));
    let ray = camera.ray_through_ndc(Vec2::ZERO);

    assert_eq!(ray.origin, camera.position);
    assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
}

#[test]
fn test_ray_through_projected_point() {
    let camera = looking_at_origin_from(Vec3::new(2.0, 3.0, 10.0));
    let target = Vec3::new(0.5, -0.5, 1.0);
    let ndc = camera.world_to_ndc(target);

    let ray = camera.ray_through_ndc(Vec2::new(ndc.x, ndc.y));
    let expected = (target - camera.position).normalize();
    assert!((ray.direction - expected).length() < 1e-3);
}
