/// Viewport - the raster rectangle the scene is drawn into.

use glam::Vec2;
use crate::error::{Error, Result};

/// Raster rectangle in pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Width over height, 1.0 for a degenerate viewport.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// True when `raster` lies inside the rectangle (edges included).
    pub fn contains(&self, raster: Vec2) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && raster.x >= self.x
            && raster.x <= self.x + self.width
            && raster.y >= self.y
            && raster.y <= self.y + self.height
    }

    /// Raster position to normalized device coordinates, y pointing up.
    pub fn raster_to_ndc(&self, raster: Vec2) -> Result<Vec2> {
        if !self.contains(raster) {
            return Err(Error::OutOfViewport {
                x: raster.x,
                y: raster.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(Vec2::new(
            (raster.x - self.x) / self.width * 2.0 - 1.0,
            1.0 - (raster.y - self.y) / self.height * 2.0,
        ))
    }

    /// Normalized device coordinates to a raster position.
    pub fn ndc_to_raster(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.x + (ndc.x + 1.0) * 0.5 * self.width,
            self.y + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_size(800.0, 600.0)
    }
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
