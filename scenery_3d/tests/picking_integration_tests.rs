//! Integration tests for picking through the active camera
//!
//! Crates are placed in front of a camera sitting at the origin and looking
//! down -Z; rays are shot through raster positions of an 800x600 viewport.
//! Picks aim slightly off-centre so rays never graze a triangle diagonal.
//!
//! Run with: cargo test --test picking_integration_tests


use scenery_3d::glam::{Vec2, Vec3};
use scenery_3d::scenery3d::camera::{PerspectiveDesc, StaticCamera, Viewport};
use scenery_3d::scenery3d::render::Drawable;
use scenery_3d::scenery3d::scene::{SceneManager, SceneObject};
use test_utils::{create_test_scene, Crate, RecordingRenderer};

const AIM: Vec2 = Vec2::new(430.0, 280.0);

/// Drawable object that opted out of picking
struct Decal {
    drawable: Drawable,
}

impl SceneObject for Decal {
    fn name(&self) -> &str {
        "decal"
    }

    fn is_drawable(&self) -> bool {
        true
    }

    fn drawables(&self) -> Vec<Drawable> {
        vec![self.drawable.clone()]
    }
}

fn scene_with_camera() -> (SceneManager, RecordingRenderer) {
    let (mut scene, renderer) = create_test_scene();
    scene.register(
        StaticCamera::new("camera", &PerspectiveDesc::default())
            .looking_at(Vec3::ZERO, Vec3::NEG_Z),
    );
    scene.set_active_camera("camera").unwrap();
    (scene, renderer)
}

// ============================================================================
// PICKING TESTS
// ============================================================================

#[test]
fn test_integration_pick_reports_front_and_back_faces() {
    let (mut scene, _renderer) = scene_with_camera();
    scene.register(Crate::new("crate", Vec3::new(0.0, 0.0, -5.0), 1.0));

    let hits = scene.shoot_ray_from_camera(AIM, false).unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.owner == "crate"));
    assert!(hits[0].distance > 4.0 && hits[0].distance < 4.2, "front: {}", hits[0].distance);
    assert!(hits[1].distance > 6.0 && hits[1].distance < 6.3, "back: {}", hits[1].distance);
    assert!((hits[0].point.z + 4.0).abs() < 1e-4);
    assert!((hits[1].point.z + 6.0).abs() < 1e-4);
}

#[test]
fn test_integration_pick_outlines_nearest_object() {
    let (mut scene, renderer) = scene_with_camera();
    let near = Crate::new("near", Vec3::new(0.0, 0.0, -5.0), 1.0);
    let far = Crate::new("far", Vec3::new(0.0, 0.0, -12.0), 3.0);
    let near_id = near.drawable().id();
    // Far one registered first so ordering comes from distance alone
    scene.register(far);
    scene.register(near);

    let hits = scene.shoot_ray_from_camera(AIM, true).unwrap();

    assert_eq!(hits.len(), 4);
    assert_eq!(hits[0].owner, "near");
    assert_eq!(hits[3].owner, "far");
    assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));

    assert_eq!(renderer.count("outline"), 1);
    let outlined = renderer.outlined();
    assert_eq!(outlined.len(), 1);
    assert_eq!(outlined[0].id(), near_id);
}

#[test]
fn test_integration_miss_outlines_nothing() {
    let (mut scene, renderer) = scene_with_camera();
    scene.register(Crate::new("crate", Vec3::new(0.0, 0.0, -5.0), 1.0));

    let hits = scene.shoot_ray_from_camera(Vec2::new(5.0, 5.0), true).unwrap();

    assert!(hits.is_empty());
    assert_eq!(renderer.count("outline"), 0);
}

#[test]
fn test_integration_out_of_viewport_pick_is_empty() {
    let (mut scene, renderer) = scene_with_camera();
    scene.register(Crate::new("crate", Vec3::new(0.0, 0.0, -5.0), 1.0));

    let hits = scene.shoot_ray_from_camera(Vec2::new(-1.0, 300.0), true).unwrap();

    assert!(hits.is_empty());
    assert_eq!(renderer.count("outline"), 0);
}

#[test]
fn test_integration_unregistered_object_is_not_picked() {
    let (mut scene, _renderer) = scene_with_camera();
    scene.register(Crate::new("crate", Vec3::new(0.0, 0.0, -5.0), 1.0));
    assert_eq!(scene.shoot_ray_from_camera(AIM, false).unwrap().len(), 2);

    scene.unregister("crate");

    assert!(scene.shoot_ray_from_camera(AIM, false).unwrap().is_empty());
}

#[test]
fn test_integration_non_raycastable_drawable_is_ignored() {
    let (mut scene, renderer) = scene_with_camera();
    let decal = Crate::new("decal_source", Vec3::new(0.0, 0.0, -5.0), 1.0)
        .drawable()
        .clone()
        .with_raycast(false);
    scene.register(Decal { drawable: decal });

    assert!(renderer.owns("decal"));
    assert!(scene.shoot_ray_from_camera(AIM, false).unwrap().is_empty());
}

#[test]
fn test_integration_projection_matches_pick() {
    let (mut scene, _renderer) = scene_with_camera();
    scene.register(Crate::new("crate", Vec3::new(0.0, 0.0, -5.0), 1.0));

    // Project the front face hit back to the raster position it came from
    let hits = scene.shoot_ray_from_camera(AIM, false).unwrap();
    let raster = scene.world_to_raster(hits[0].point).unwrap();
    assert!((raster - AIM).length() < 0.05, "{:?}", raster);

    let view = scene.world_to_view(Vec3::new(0.0, 0.0, -5.0)).unwrap();
    assert!((view - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);
}

#[test]
fn test_integration_viewport_change_moves_projection() {
    let (mut scene, _renderer) = scene_with_camera();
    let centre = scene.world_to_raster(Vec3::new(0.0, 0.0, -5.0)).unwrap();
    assert!((centre - Vec2::new(400.0, 300.0)).length() < 1e-3);

    scene.set_viewport(Viewport::from_size(1024.0, 768.0));

    let centre = scene.world_to_raster(Vec3::new(0.0, 0.0, -5.0)).unwrap();
    assert!((centre - Vec2::new(512.0, 384.0)).length() < 1e-3);
}
