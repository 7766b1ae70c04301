use glam::Vec3;
use crate::error::Error;
use super::*;

// ============================================================================
// Triangle
// ============================================================================

fn xy_triangle() -> Triangle {
    Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y)
}

#[test]
fn test_triangle_normal_follows_winding() {
    assert_eq!(xy_triangle().normal(), Vec3::Z);
}

#[test]
fn test_triangle_hit_front() {
    let (t, u, v) = xy_triangle()
        .intersect_ray(Vec3::new(0.25, 0.25, 3.0), Vec3::NEG_Z)
        .unwrap();
    assert!((t - 3.0).abs() < 1e-5);
    assert!((u - 0.25).abs() < 1e-5);
    assert!((v - 0.25).abs() < 1e-5);
}

#[test]
fn test_triangle_hit_back_face() {
    let hit = xy_triangle().intersect_ray(Vec3::new(0.25, 0.25, -3.0), Vec3::Z);
    assert!(hit.is_some());
}

#[test]
fn test_triangle_miss_outside() {
    assert!(xy_triangle().intersect_ray(Vec3::new(0.9, 0.9, 3.0), Vec3::NEG_Z).is_none());
}

#[test]
fn test_triangle_miss_parallel() {
    assert!(xy_triangle().intersect_ray(Vec3::new(0.1, 0.1, 1.0), Vec3::X).is_none());
}

#[test]
fn test_triangle_miss_behind_origin() {
    assert!(xy_triangle().intersect_ray(Vec3::new(0.25, 0.25, 3.0), Vec3::Z).is_none());
}

#[test]
fn test_tiny_triangle_is_hit() {
    let size = 1e-4;
    let triangle = Triangle::new(Vec3::ZERO, Vec3::X * size, Vec3::Y * size);

    let (t, u, v) = triangle
        .intersect_ray(Vec3::new(size * 0.25, size * 0.25, 1.0), Vec3::NEG_Z)
        .unwrap();
    assert!((t - 1.0).abs() < 1e-6);
    assert!((u - 0.25).abs() < 1e-3);
    assert!((v - 0.25).abs() < 1e-3);
}

#[test]
fn test_degenerate_triangle_is_never_hit() {
    let triangle = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
    assert!(triangle.intersect_ray(Vec3::new(0.5, 0.0, 1.0), Vec3::NEG_Z).is_none());

    let point = Triangle::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    assert!(point.intersect_ray(Vec3::Z, Vec3::NEG_Z).is_none());
}

// ============================================================================
// TriangleMesh construction
// ============================================================================

#[test]
fn test_new_valid() {
    let mesh = TriangleMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], &[0, 1, 2]).unwrap();
    assert_eq!(mesh.face_count(), 1);
    assert_eq!(mesh.bounds().max, Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_new_rejects_empty_positions() {
    let result = TriangleMesh::new(Vec::new(), &[]);
    assert!(matches!(result, Err(Error::InvalidGeometry(_))));
}

#[test]
fn test_new_rejects_partial_triangle() {
    let result = TriangleMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], &[0, 1]);
    assert!(matches!(result, Err(Error::InvalidGeometry(_))));
}

#[test]
fn test_new_rejects_out_of_range_index() {
    let result = TriangleMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], &[0, 1, 3]);
    assert!(matches!(result, Err(Error::InvalidGeometry(msg)) if msg.contains("index 3")));
}

#[test]
fn test_cuboid() {
    let mesh = TriangleMesh::cuboid(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(mesh.face_count(), 12);
    assert_eq!(mesh.positions().len(), 8);
    assert_eq!(mesh.bounds().min, Vec3::new(-1.0, -2.0, -3.0));
}

#[test]
fn test_cuboid_faces_point_outward() {
    let mesh = TriangleMesh::cuboid(Vec3::ONE);
    for face in 0..mesh.face_count() {
        let tri = mesh.triangle(face).unwrap();
        let centroid = (tri.a + tri.b + tri.c) / 3.0;
        assert!(tri.normal().dot(centroid) > 0.0, "face {} points inward", face);
    }
}

#[test]
fn test_quad() {
    let mesh = TriangleMesh::quad(2.0, 4.0);
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.triangle(0).unwrap().normal(), Vec3::Z);
    assert!(mesh.triangle(2).is_none());
}
