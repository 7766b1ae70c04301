/// OrbitalCamera - orbits a pivot point under cursor drag.
///
/// The camera sits on a sphere around the pivot, described by distance,
/// azimuth (around +Y, 0 on +Z) and elevation (above the horizontal plane),
/// and always faces the pivot.
///
/// Every orbit move can be vetted by restrictions. A restriction sees the
/// proposed position and answers with an `OrbitVerdict`: accept (possibly
/// with an adjusted position) or reject. Restrictions run in insertion
/// order, each one seeing the position left by the previous one. A single
/// rejection cancels the whole move.

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;
use glam::{Vec2, Vec3};
use crate::input::{CursorMove, InputSource};
use crate::scene::{FrameInfo, SceneContext, SceneObject};
use super::camera_manager::CameraManager;
use super::projection_camera::{PerspectiveDesc, ProjectionCamera};

// Keeps the view direction away from the poles where look_at flips
const MAX_ELEVATION: f32 = FRAC_PI_2 - 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalDesc {
    pub pivot: Vec3,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub azimuth_degrees: f32,
    pub elevation_degrees: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    /// Fraction of the distance per zoom step
    pub zoom_speed: f32,
    pub perspective: PerspectiveDesc,
}

impl Default for OrbitalDesc {
    fn default() -> Self {
        Self {
            pivot: Vec3::ZERO,
            distance: 10.0,
            min_distance: 0.5,
            max_distance: 500.0,
            azimuth_degrees: 0.0,
            elevation_degrees: 20.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            perspective: PerspectiveDesc::default(),
        }
    }
}

/// Candidate orbit move handed to restrictions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitProposal {
    pub current: Vec3,
    pub proposed: Vec3,
    pub pivot: Vec3,
}

impl OrbitProposal {
    /// Elevation of the proposed position above the pivot, in radians
    pub fn proposed_elevation(&self) -> f32 {
        elevation_of(self.proposed - self.pivot)
    }
}

/// Answer of a restriction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitVerdict {
    pub accepted: bool,
    pub position: Vec3,
}

impl OrbitVerdict {
    pub fn accept(position: Vec3) -> Self {
        Self { accepted: true, position }
    }

    pub fn reject(position: Vec3) -> Self {
        Self { accepted: false, position }
    }
}

pub type OrbitRestriction = Box<dyn Fn(&OrbitProposal) -> OrbitVerdict>;

/// Restriction that clamps the elevation into `[min_degrees, max_degrees]`,
/// keeping distance and azimuth.
pub fn clamp_pitch(min_degrees: f32, max_degrees: f32) -> OrbitRestriction {
    let (min, max) = (min_degrees.to_radians(), max_degrees.to_radians());
    Box::new(move |proposal: &OrbitProposal| {
        let offset = proposal.proposed - proposal.pivot;
        let elevation = elevation_of(offset);
        if (min..=max).contains(&elevation) {
            return OrbitVerdict::accept(proposal.proposed);
        }
        let clamped = elevation.clamp(min, max);
        let position = proposal.pivot + spherical(offset.length(), azimuth_of(offset), clamped);
        OrbitVerdict::accept(position)
    })
}

/// Restriction that rejects any move putting the camera below `height`.
pub fn forbid_below(height: f32) -> OrbitRestriction {
    Box::new(move |proposal: &OrbitProposal| {
        if proposal.proposed.y < height {
            OrbitVerdict::reject(proposal.current)
        } else {
            OrbitVerdict::accept(proposal.proposed)
        }
    })
}

fn spherical(distance: f32, azimuth: f32, elevation: f32) -> Vec3 {
    let (sin_az, cos_az) = azimuth.sin_cos();
    let (sin_el, cos_el) = elevation.sin_cos();
    Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * distance
}

fn elevation_of(offset: Vec3) -> f32 {
    let length = offset.length();
    if length <= f32::EPSILON {
        return 0.0;
    }
    (offset.y / length).clamp(-1.0, 1.0).asin()
}

fn azimuth_of(offset: Vec3) -> f32 {
    offset.x.atan2(offset.z)
}

#[derive(Debug, Default)]
struct PendingDrag {
    delta: Vec2,
}

pub struct OrbitalCamera {
    name: String,
    camera: ProjectionCamera,
    pivot: Vec3,
    distance: f32,
    min_distance: f32,
    max_distance: f32,
    azimuth: f32,
    elevation: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    restrictions: Vec<OrbitRestriction>,
    pending: Rc<RefCell<PendingDrag>>,
    active: bool,
}

impl OrbitalCamera {
    pub fn new(name: impl Into<String>, desc: &OrbitalDesc) -> Self {
        let min_distance = desc.min_distance.max(f32::EPSILON);
        let max_distance = desc.max_distance.max(min_distance);
        let mut camera = Self {
            name: name.into(),
            camera: ProjectionCamera::new(&desc.perspective),
            pivot: desc.pivot,
            distance: desc.distance.clamp(min_distance, max_distance),
            min_distance,
            max_distance,
            azimuth: desc.azimuth_degrees.to_radians(),
            elevation: desc.elevation_degrees.to_radians().clamp(-MAX_ELEVATION, MAX_ELEVATION),
            rotate_speed: desc.rotate_speed,
            zoom_speed: desc.zoom_speed,
            restrictions: Vec::new(),
            pending: Rc::new(RefCell::new(PendingDrag::default())),
            active: false,
        };
        camera.place();
        camera
    }

    /// Add a restriction; it runs after the ones already added.
    pub fn add_restriction(&mut self, restriction: OrbitRestriction) {
        self.restrictions.push(restriction);
    }

    pub fn with_restriction(mut self, restriction: OrbitRestriction) -> Self {
        self.add_restriction(restriction);
        self
    }

    pub fn restriction_count(&self) -> usize {
        self.restrictions.len()
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// Move the pivot; the camera keeps its distance and angles.
    pub fn set_pivot(&mut self, pivot: Vec3) {
        self.pivot = pivot;
        self.place();
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Scale the distance by `zoom_speed` per step; positive steps move in.
    pub fn zoom(&mut self, steps: f32) {
        let factor = (1.0 - self.zoom_speed).powf(steps);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
        self.place();
    }

    /// Rotate around the pivot by the given angles in radians.
    ///
    /// Returns false when a restriction vetoed the move; the camera is then
    /// left exactly where it was.
    pub fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) -> bool {
        let azimuth = self.azimuth + delta_azimuth;
        let elevation = (self.elevation + delta_elevation).clamp(-MAX_ELEVATION, MAX_ELEVATION);
        let current = self.camera.position;
        let mut position = self.pivot + spherical(self.distance, azimuth, elevation);

        for restriction in &self.restrictions {
            let verdict = restriction(&OrbitProposal {
                current,
                proposed: position,
                pivot: self.pivot,
            });
            if !verdict.accepted {
                return false;
            }
            position = verdict.position;
        }

        let offset = position - self.pivot;
        if offset.length() <= f32::EPSILON {
            return false;
        }
        // Restrictions may move the camera but never out of the zoom range
        self.distance = offset.length().clamp(self.min_distance, self.max_distance);
        self.azimuth = azimuth_of(offset);
        self.elevation = elevation_of(offset).clamp(-MAX_ELEVATION, MAX_ELEVATION);
        self.place();
        true
    }

    fn place(&mut self) {
        self.camera.position = self.pivot + spherical(self.distance, self.azimuth, self.elevation);
        self.camera.look_at(self.pivot);
    }
}

impl SceneObject for OrbitalCamera {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_scene_render(&mut self, _ctx: &mut SceneContext, _frame: &FrameInfo) {
        let drag = std::mem::take(&mut self.pending.borrow_mut().delta);
        if !self.active || drag == Vec2::ZERO {
            return;
        }
        // Drag right spins the scene right, drag down tilts the camera up
        self.orbit(-drag.x * self.rotate_speed, drag.y * self.rotate_speed);
    }

    fn as_camera(&self) -> Option<&dyn CameraManager> {
        Some(self)
    }

    fn as_camera_mut(&mut self) -> Option<&mut dyn CameraManager> {
        Some(self)
    }
}

impl CameraManager for OrbitalCamera {
    fn camera(&self) -> &ProjectionCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut ProjectionCamera {
        &mut self.camera
    }

    fn register_input(&mut self, input: &mut dyn InputSource) {
        let pending = Rc::clone(&self.pending);
        input.register_move_event(Box::new(move |movement: CursorMove| {
            pending.borrow_mut().delta += movement.delta;
        }));
    }

    /// Moves the camera and re-derives the orbit from the new position.
    fn set_position(&mut self, position: Vec3) {
        let offset = position - self.pivot;
        if offset.length() <= f32::EPSILON {
            return;
        }
        self.distance = offset.length().clamp(self.min_distance, self.max_distance);
        self.azimuth = azimuth_of(offset);
        self.elevation = elevation_of(offset).clamp(-MAX_ELEVATION, MAX_ELEVATION);
        self.place();
    }

    fn on_active(&mut self, _ctx: &mut SceneContext) {
        self.active = true;
    }

    fn on_inactive(&mut self, _ctx: &mut SceneContext) {
        self.active = false;
        self.pending.borrow_mut().delta = Vec2::ZERO;
    }
}

#[cfg(test)]
#[path = "orbital_camera_tests.rs"]
mod tests;
