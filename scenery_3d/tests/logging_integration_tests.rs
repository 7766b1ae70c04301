//! Integration tests for Engine logging system
//!
//! These tests verify the logging system and the entries the scene core
//! emits through it.
//!
//! Run with: cargo test --test logging_integration_tests


use scenery_3d::glam::{Vec2, Vec3};
use scenery_3d::scenery3d::{Engine, Error};
use scenery_3d::scenery3d::camera::{FirstPersonCamera, FirstPersonDesc, PerspectiveDesc, StaticCamera};
use scenery_3d::scenery3d::input::InputHub;
use scenery_3d::scenery3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;
use test_utils::{create_test_scene, Crate};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        entries.push(entry.clone());
    }
}

fn entries_with(entries: &Arc<Mutex<Vec<LogEntry>>>, severity: LogSeverity) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == severity)
        .cloned()
        .collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test::module");
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[1].file, None);
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("test_file.rs"));
        assert_eq!(captured[0].line, Some(42));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);

    Engine::reset_logger();

    // The default logger takes over, the test logger sees nothing more
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);
}

// ============================================================================
// SCENE LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_scene_errors_are_logged_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let (mut scene, _renderer) = create_test_scene();
    let result = scene.set_active_camera("nowhere");
    assert_eq!(result, Err(Error::UnknownObject("nowhere".to_string())));

    let errors = entries_with(&entries, LogSeverity::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source, "scenery3d::SceneManager");
    assert!(errors[0].message.contains("nowhere"));
    assert!(errors[0].file.is_some());
    assert!(errors[0].line.is_some());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_pick_without_camera_logs_error() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let (mut scene, _renderer) = create_test_scene();
    let result = scene.shoot_ray_from_camera(Vec2::new(10.0, 10.0), false);
    assert!(matches!(result, Err(Error::NoActiveCamera)));

    let errors = entries_with(&entries, LogSeverity::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "No active camera");

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_out_of_viewport_pick_logs_warning() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let (mut scene, _renderer) = create_test_scene();
    scene.register(StaticCamera::new("camera", &PerspectiveDesc::default()));
    scene.set_active_camera("camera").unwrap();

    let hits = scene.shoot_ray_from_camera(Vec2::new(5000.0, 10.0), true).unwrap();
    assert!(hits.is_empty());

    let warnings = entries_with(&entries, LogSeverity::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.starts_with("Ray not cast"));
    assert!(entries_with(&entries, LogSeverity::Error).is_empty());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_duplicate_name_logs_warning() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let (mut scene, _renderer) = create_test_scene();
    scene.register(Crate::new("box", Vec3::ZERO, 1.0));
    scene.register(Crate::new("box", Vec3::X, 1.0));

    let warnings = entries_with(&entries, LogSeverity::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("'box'"));
    assert_eq!(scene.object_count(), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_camera_activation_is_logged() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let (mut scene, _renderer) = create_test_scene();
    scene.register(StaticCamera::new("camera", &PerspectiveDesc::default()));
    scene.set_active_camera("camera").unwrap();

    let infos = entries_with(&entries, LogSeverity::Info);
    assert!(infos.iter().any(|e| e.message == "Active camera: 'camera'"));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_camera_waiting_on_missing_input_logs_warning() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    // The hub is registered under a name the camera does not ask for
    let (mut scene, _renderer) = create_test_scene();
    let hub = InputHub::new("keyboard");
    scene.register(hub.clone());
    scene.register(FirstPersonCamera::new("fps", &FirstPersonDesc::default()));
    scene.set_active_camera("fps").unwrap();

    assert_eq!(hub.controller(), None);
    assert_eq!(scene.pending_messages("input"), 1);
    let warnings = entries_with(&entries, LogSeverity::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("'fps'"));
    assert!(warnings[0].message.ends_with("input"));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_camera_with_registered_input_logs_no_warning() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let (mut scene, _renderer) = create_test_scene();
    let hub = InputHub::new("input");
    scene.register(hub.clone());
    scene.register(FirstPersonCamera::new("fps", &FirstPersonDesc::default()));
    scene.set_active_camera("fps").unwrap();

    assert_eq!(hub.controller().as_deref(), Some("fps"));
    assert!(entries_with(&entries, LogSeverity::Warn).is_empty());

    Engine::reset_logger();
}
