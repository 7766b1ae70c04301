/// Light handles passed through to the renderer.

use std::sync::atomic::{AtomicU64, Ordering};
use glam::Vec3;

static NEXT_LIGHT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(u64);

/// Light type and its spatial parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional { direction: Vec3 },
    Point { position: Vec3, range: f32 },
    Spot { position: Vec3, direction: Vec3, angle: f32, range: f32 },
}

#[derive(Debug, Clone)]
pub struct Light {
    id: LightId,
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn new(kind: LightKind, color: Vec3, intensity: f32) -> Self {
        Self {
            id: LightId(NEXT_LIGHT_ID.fetch_add(1, Ordering::Relaxed)),
            kind,
            color,
            intensity,
        }
    }

    pub fn ambient(color: Vec3, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self::new(LightKind::Directional { direction: direction.normalize_or_zero() }, color, intensity)
    }

    pub fn point(position: Vec3, range: f32, color: Vec3, intensity: f32) -> Self {
        Self::new(LightKind::Point { position, range }, color, intensity)
    }

    pub fn id(&self) -> LightId {
        self.id
    }
}
