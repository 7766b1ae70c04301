use std::time::Duration;
use crate::renderer::mock_renderer::MockRenderer;
use crate::scene::SceneConfig;
use super::*;

/// Scheduler allowing a fixed number of frames
struct CountedScheduler {
    remaining: u32,
}

impl FrameScheduler for CountedScheduler {
    fn wait_for_next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Scheduler that cancels the loop after `after` frames
struct CancellingScheduler {
    token: CancellationToken,
    after: u32,
    seen: u32,
}

impl FrameScheduler for CancellingScheduler {
    fn wait_for_next_frame(&mut self) -> bool {
        self.seen += 1;
        if self.seen >= self.after {
            self.token.cancel();
        }
        true
    }
}

fn scene() -> SceneManager {
    SceneManager::new(Box::new(MockRenderer::new()), SceneConfig::default())
}

// ============================================================================
// CancellationToken
// ============================================================================

#[test]
fn test_token_clones_share_state() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!token.is_cancelled());

    clone.cancel();
    assert!(token.is_cancelled());
}

// ============================================================================
// RenderLoop
// ============================================================================

#[test]
fn test_run_stops_when_scheduler_gives_up() {
    let mut scene = scene();
    let render_loop = RenderLoop::new();

    let frames = render_loop.run(&mut scene, &mut CountedScheduler { remaining: 4 });

    assert_eq!(frames, 5);
    assert_eq!(scene.frame_index(), 5);
}

#[test]
fn test_run_stops_on_cancel() {
    let mut scene = scene();
    let render_loop = RenderLoop::new();
    let mut scheduler = CancellingScheduler { token: render_loop.token(), after: 3, seen: 0 };

    let frames = render_loop.run(&mut scene, &mut scheduler);

    assert_eq!(frames, 3);
}

#[test]
fn test_cancelled_before_start_runs_nothing() {
    let mut scene = scene();
    let token = CancellationToken::new();
    token.cancel();
    let render_loop = RenderLoop::with_token(token);

    assert_eq!(render_loop.run(&mut scene, &mut CountedScheduler { remaining: 10 }), 0);
    assert_eq!(scene.frame_index(), 0);
}

// ============================================================================
// FixedRateScheduler
// ============================================================================

#[test]
fn test_fixed_rate_duration() {
    assert_eq!(FixedRateScheduler::new(50).frame_duration(), Duration::from_millis(20));
    // Zero fps is treated as one frame per second
    assert_eq!(FixedRateScheduler::new(0).frame_duration(), Duration::from_secs(1));
}

#[test]
fn test_fixed_rate_paces_frames() {
    let mut scheduler = FixedRateScheduler::new(200);
    let start = Instant::now();
    for _ in 0..3 {
        assert!(scheduler.wait_for_next_frame());
    }
    // First call returns immediately, the next two wait ~5ms each
    assert!(start.elapsed() >= Duration::from_millis(9));
}
