/// RenderLoop - drives a SceneManager frame after frame.
///
/// The loop ticks the scene, then asks a `FrameScheduler` to wait for the
/// next frame. It stops when its `CancellationToken` is cancelled or when
/// the scheduler reports the host is gone. Cancellation is checked between
/// frames, never in the middle of one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use super::scene_manager::SceneManager;

/// Cloneable stop flag shared between the loop and whoever stops it
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Paces the loop (vsync, animation frame callback, fixed timer...).
pub trait FrameScheduler {
    /// Block until the next frame is due. Returns false when no more frames
    /// will come (window closed).
    fn wait_for_next_frame(&mut self) -> bool;
}

/// Scheduler sleeping to hold a fixed frame rate
#[derive(Debug)]
pub struct FixedRateScheduler {
    frame_duration: Duration,
    next_frame: Option<Instant>,
}

impl FixedRateScheduler {
    pub fn new(frames_per_second: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs(1) / frames_per_second.max(1),
            next_frame: None,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn wait_for_next_frame(&mut self) -> bool {
        let now = Instant::now();
        let due = self.next_frame.unwrap_or(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        // Late frames restart the cadence instead of bursting to catch up
        self.next_frame = Some(due.max(now) + self.frame_duration);
        true
    }
}

#[derive(Debug, Default)]
pub struct RenderLoop {
    token: CancellationToken,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loop stopped through an existing token
    pub fn with_token(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Token that stops this loop
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Tick `scene` until cancelled or until the scheduler gives up.
    ///
    /// Returns the number of frames run.
    pub fn run(&self, scene: &mut SceneManager, scheduler: &mut dyn FrameScheduler) -> u64 {
        crate::engine_info!("scenery3d::RenderLoop", "Render loop started");
        let mut frames = 0;

        while !self.token.is_cancelled() {
            scene.tick();
            frames += 1;

            if self.token.is_cancelled() || !scheduler.wait_for_next_frame() {
                break;
            }
        }

        crate::engine_info!("scenery3d::RenderLoop", "Render loop stopped after {} frame(s)", frames);
        frames
    }
}

#[cfg(test)]
#[path = "render_loop_tests.rs"]
mod tests;
