//! Central scene manager.
//!
//! Owns the registered scene objects, the renderer, the ray caster and the
//! active camera. Objects are kept in registration order; that order is the
//! order of render hooks and of broadcasts.
//!
//! Lifecycle of a registered object:
//!
//! ```text
//! register ──► Awaiting ──(ready, next frame)──► Active ──► unregister
//!     └─────────(not drawable, or ready)─────────►┘
//! ```
//!
//! Messages sent to a name nobody registered yet wait in a mailbox and are
//! delivered, in arrival order, when that name registers.

use std::any::Any;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;
use glam::{Vec2, Vec3};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use crate::camera::{CameraManager, Viewport};
use crate::engine_bail;
use crate::error::{Error, Result};
use crate::raycast::{RayCast, RayHit};
use crate::renderer::{
    AntiAliasing, BloomSettings, ColorBalanceSettings, Drawable, Light, PostEffect, Renderer,
    SsaoSettings, ToneMappingSettings,
};
use super::scene_object::{FrameInfo, Message, Outgoing, SceneContext, SceneObject};

/// Scene manager configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneConfig {
    /// Raster rectangle the scene is drawn into
    pub viewport: Viewport,
}

/// Where a registered object is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectState {
    /// Drawable but not ready; not handed to the renderer yet
    Awaiting,
    /// Handed to the renderer, start hook fired
    Active,
}

struct SceneEntry {
    object: Box<dyn SceneObject>,
    state: ObjectState,
    // What was handed to the renderer, so removal is exact
    drawables: Vec<Drawable>,
    lights: Vec<Light>,
}

pub struct SceneManager {
    renderer: Box<dyn Renderer>,
    objects: IndexMap<String, SceneEntry>,
    mailbox: FxHashMap<String, Vec<Message>>,
    ray_cast: RayCast,
    active_camera: Option<String>,
    viewport: Viewport,
    frame_index: u64,
    last_frame: Option<Instant>,
}

impl SceneManager {
    /// Create an empty scene drawn by `renderer`
    pub fn new(renderer: Box<dyn Renderer>, config: SceneConfig) -> Self {
        crate::engine_info!("scenery3d::SceneManager", "Scene created ({}x{} viewport)",
            config.viewport.width, config.viewport.height);
        Self {
            renderer,
            objects: IndexMap::new(),
            mailbox: FxHashMap::default(),
            ray_cast: RayCast::new(),
            active_camera: None,
            viewport: config.viewport,
            frame_index: 0,
            last_frame: None,
        }
    }

    // ===== REGISTRY =====

    /// Register a scene object under its name.
    ///
    /// A name that is already registered is replaced: the previous object is
    /// unregistered first (and dropped). Queued messages for the name are
    /// delivered right after registration.
    pub fn register<O: SceneObject + 'static>(&mut self, object: O) {
        self.register_boxed(Box::new(object));
    }

    pub fn register_boxed(&mut self, object: Box<dyn SceneObject>) {
        let name = object.name().to_string();
        if self.objects.contains_key(&name) {
            crate::engine_warn!("scenery3d::SceneManager", "'{}' is already registered, replacing it", name);
            self.unregister(&name);
        }

        let awaiting = object.is_drawable() && !object.is_ready();
        self.objects.insert(name.clone(), SceneEntry {
            object,
            state: ObjectState::Awaiting,
            drawables: Vec::new(),
            lights: Vec::new(),
        });

        if awaiting {
            crate::engine_debug!("scenery3d::SceneManager", "'{}' registered, waiting until ready", name);
        } else {
            self.activate(&name);
        }
        self.deliver_pending(&name);
    }

    /// Remove a scene object and hand it back.
    ///
    /// The object gets its end hook; an active one is also removed from the
    /// renderer and the ray caster. Unknown names return `None`.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn SceneObject>> {
        let Some(mut entry) = self.objects.shift_remove(name) else {
            crate::engine_debug!("scenery3d::SceneManager", "unregister: '{}' is not registered", name);
            return None;
        };

        let mut ctx = SceneContext::new(name);
        if self.active_camera.as_deref() == Some(name) {
            self.active_camera = None;
            if let Some(camera) = entry.object.as_camera_mut() {
                camera.on_inactive(&mut ctx);
            }
            crate::engine_info!("scenery3d::SceneManager", "Active camera '{}' removed", name);
        }

        // Only an active object was handed to the renderer and the ray caster
        if entry.state == ObjectState::Active {
            detach(self.renderer.as_mut(), &mut self.ray_cast, name, &entry.drawables, &entry.lights);
        }
        entry.object.on_scene_end(&mut ctx);
        self.dispatch(ctx);

        crate::engine_debug!("scenery3d::SceneManager", "'{}' unregistered", name);
        Some(entry.object)
    }

    /// Re-sync an active object's drawables and lights with the renderer
    /// and the ray caster, after they changed.
    pub fn refresh(&mut self, name: &str) -> Result<()> {
        let Some(entry) = self.objects.get_mut(name) else {
            engine_bail!("scenery3d::SceneManager", Error::UnknownObject(name.to_string()))
        };
        if entry.state != ObjectState::Active {
            return Ok(());
        }

        detach(self.renderer.as_mut(), &mut self.ray_cast, name, &entry.drawables, &entry.lights);
        entry.drawables = entry.object.drawables();
        entry.lights = entry.object.lights();
        attach(self.renderer.as_mut(), &mut self.ray_cast, name, &entry.drawables, &entry.lights);
        Ok(())
    }

    fn activate(&mut self, name: &str) {
        let Some(entry) = self.objects.get_mut(name) else {
            return;
        };

        entry.drawables = entry.object.drawables();
        entry.lights = entry.object.lights();
        attach(self.renderer.as_mut(), &mut self.ray_cast, name, &entry.drawables, &entry.lights);
        entry.state = ObjectState::Active;

        let mut ctx = SceneContext::new(name);
        entry.object.on_scene_start(&mut ctx);
        self.dispatch(ctx);

        crate::engine_debug!("scenery3d::SceneManager", "'{}' is active", name);
    }

    fn promote_ready(&mut self) {
        let ready: Vec<String> = self.objects.iter()
            .filter(|(_, entry)| entry.state == ObjectState::Awaiting && entry.object.is_ready())
            .map(|(name, _)| name.clone())
            .collect();
        for name in ready {
            self.activate(&name);
        }
    }

    // ===== MESSAGING =====

    /// Send `data` from `from` to `to`.
    ///
    /// A registered recipient gets it right away; otherwise it waits in the
    /// mailbox until `to` registers.
    pub fn broadcast_to<T: Any>(&mut self, from: &str, to: &str, data: T) {
        self.broadcast_shared(from, to, Rc::new(data));
    }

    /// `broadcast_to` with an already shared payload
    pub fn broadcast_shared(&mut self, from: &str, to: &str, data: Rc<dyn Any>) {
        if let Some(ctx) = self.deliver(to, Message::new(from, data)) {
            self.dispatch(ctx);
        }
    }

    /// Send `data` to every registered object except `from`, in
    /// registration order. Nothing is queued.
    pub fn broadcast_to_all<T: Any>(&mut self, from: &str, data: T) {
        let data: Rc<dyn Any> = Rc::new(data);
        for ctx in self.deliver_to_all(from, data) {
            self.dispatch(ctx);
        }
    }

    /// Hand a message to a registered recipient, or queue it.
    ///
    /// Returns the recipient's context so its replies can be dispatched.
    fn deliver(&mut self, to: &str, message: Message) -> Option<SceneContext> {
        match self.objects.get_mut(to) {
            Some(entry) => {
                let mut ctx = SceneContext::new(to);
                entry.object.on_message(&mut ctx, &message);
                Some(ctx)
            }
            None => {
                crate::engine_trace!("scenery3d::SceneManager", "Queued message from '{}' for '{}'",
                    message.from(), to);
                self.mailbox.entry(to.to_string()).or_default().push(message);
                None
            }
        }
    }

    fn deliver_to_all(&mut self, from: &str, data: Rc<dyn Any>) -> Vec<SceneContext> {
        let message = Message::new(from, data);
        let mut contexts = Vec::new();
        for (name, entry) in self.objects.iter_mut() {
            if name == from {
                continue;
            }
            let mut ctx = SceneContext::new(name);
            entry.object.on_message(&mut ctx, &message);
            contexts.push(ctx);
        }
        contexts
    }

    fn deliver_pending(&mut self, name: &str) {
        let Some(messages) = self.mailbox.remove(name) else {
            return;
        };
        crate::engine_debug!("scenery3d::SceneManager", "Delivering {} queued message(s) to '{}'",
            messages.len(), name);
        for message in messages {
            if let Some(ctx) = self.deliver(name, message) {
                self.dispatch(ctx);
            }
        }
    }

    /// Send everything a hook put in its outbox, including what the
    /// recipients send back, until nothing is left.
    fn dispatch(&mut self, ctx: SceneContext) {
        let mut queue = VecDeque::new();
        enqueue(&mut queue, ctx);

        while let Some((from, outgoing)) = queue.pop_front() {
            match outgoing {
                Outgoing::To { to, data } => {
                    if let Some(reply) = self.deliver(&to, Message::new(from, data)) {
                        enqueue(&mut queue, reply);
                    }
                }
                Outgoing::All { data } => {
                    for reply in self.deliver_to_all(&from, data) {
                        enqueue(&mut queue, reply);
                    }
                }
            }
        }
    }

    // ===== CAMERA =====

    /// Make the registered camera called `name` the active one.
    ///
    /// The previous camera gets `on_inactive`, the new one `on_active`, and
    /// the renderer is pointed at it.
    pub fn set_active_camera(&mut self, name: &str) -> Result<()> {
        let Some(entry) = self.objects.get(name) else {
            engine_bail!("scenery3d::SceneManager", Error::UnknownObject(name.to_string()))
        };
        if entry.object.as_camera().is_none() {
            engine_bail!("scenery3d::SceneManager", Error::NotACamera(name.to_string()))
        }
        if self.active_camera.as_deref() == Some(name) {
            return Ok(());
        }

        if let Some(previous) = self.active_camera.take() {
            if let Some(camera) = self.objects.get_mut(&previous).and_then(|e| e.object.as_camera_mut()) {
                let mut ctx = SceneContext::new(&previous);
                camera.on_inactive(&mut ctx);
                self.dispatch(ctx);
            }
        }

        self.active_camera = Some(name.to_string());
        let aspect = self.viewport.aspect();
        if let Some(camera) = self.objects.get_mut(name).and_then(|e| e.object.as_camera_mut()) {
            camera.set_aspect_ratio(aspect);
            camera.update_matrices();
            let mut ctx = SceneContext::new(name);
            camera.on_active(&mut ctx);
            self.renderer.setup(camera.camera());
            self.dispatch(ctx);
        }

        crate::engine_info!("scenery3d::SceneManager", "Active camera: '{}'", name);

        // e.g. a first-person camera asking an input object that was never registered
        let mut waiting: Vec<&str> = self.mailbox.iter()
            .filter(|(_, messages)| messages.iter().any(|m| m.from() == name))
            .map(|(to, _)| to.as_str())
            .collect();
        if !waiting.is_empty() {
            waiting.sort_unstable();
            crate::engine_warn!("scenery3d::SceneManager",
                "Camera '{}' sent messages to unregistered object(s): {}", name, waiting.join(", "));
        }
        Ok(())
    }

    /// The active camera, if any
    pub fn camera(&self) -> Option<&dyn CameraManager> {
        find_camera(&self.objects, self.active_camera.as_deref())
    }

    pub fn camera_mut(&mut self) -> Option<&mut dyn CameraManager> {
        let name = self.active_camera.as_deref()?;
        self.objects.get_mut(name)?.object.as_camera_mut()
    }

    pub fn active_camera_name(&self) -> Option<&str> {
        self.active_camera.as_deref()
    }

    /// World point to the active camera's view space
    pub fn world_to_view(&self, point: Vec3) -> Result<Vec3> {
        let Some(camera) = self.camera() else {
            engine_bail!("scenery3d::SceneManager", Error::NoActiveCamera)
        };
        Ok(camera.world_to_view(point))
    }

    /// World point to a raster position in the viewport, seen from the
    /// active camera
    pub fn world_to_raster(&self, point: Vec3) -> Result<Vec2> {
        let Some(camera) = self.camera() else {
            engine_bail!("scenery3d::SceneManager", Error::NoActiveCamera)
        };
        Ok(camera.world_to_raster(point, &self.viewport))
    }

    // ===== PICKING =====

    /// Cast a ray from the active camera through a raster position.
    ///
    /// Returns every hit, nearest first; a position outside the viewport
    /// yields no hits. With `outline_nearest`, the renderer outlines the
    /// nearest hit's drawable.
    pub fn shoot_ray_from_camera(&mut self, raster: Vec2, outline_nearest: bool) -> Result<Vec<RayHit>> {
        let Some(camera) = find_camera(&self.objects, self.active_camera.as_deref()) else {
            engine_bail!("scenery3d::SceneManager", Error::NoActiveCamera)
        };

        let ndc = match self.viewport.raster_to_ndc(raster) {
            Ok(ndc) => ndc,
            Err(error) => {
                crate::engine_warn!("scenery3d::SceneManager", "Ray not cast: {}", error);
                return Ok(Vec::new());
            }
        };

        let hits = self.ray_cast.raycast_from_camera(ndc, camera.camera());
        crate::engine_trace!("scenery3d::SceneManager", "Ray through ({}, {}) hit {} face(s)",
            raster.x, raster.y, hits.len());

        if outline_nearest {
            if let Some(nearest) = hits.first() {
                self.renderer.outline_objects(std::slice::from_ref(&nearest.drawable), camera.camera());
            }
        }
        Ok(hits)
    }

    pub fn ray_cast(&self) -> &RayCast {
        &self.ray_cast
    }

    // ===== FRAME =====

    /// Run one frame.
    ///
    /// With an active camera: update its matrices, activate objects that
    /// became ready, render, then run every object's render hook in
    /// registration order. The frame counter advances either way.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta_seconds = self.last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame = Some(now);

        let frame = FrameInfo {
            index: self.frame_index,
            delta_seconds,
            viewport: self.viewport,
        };
        self.frame_index += 1;

        let Some(active) = self.active_camera.clone() else {
            crate::engine_trace!("scenery3d::SceneManager", "Frame {} skipped: no active camera", frame.index);
            return;
        };

        let aspect = self.viewport.aspect();
        if let Some(camera) = self.objects.get_mut(&active).and_then(|e| e.object.as_camera_mut()) {
            camera.set_aspect_ratio(aspect);
            camera.update_matrices();
        }

        self.promote_ready();

        if let Some(camera) = find_camera(&self.objects, Some(active.as_str())) {
            self.renderer.render(camera.camera());
        }

        let names: Vec<String> = self.objects.keys().cloned().collect();
        for name in names {
            let Some(entry) = self.objects.get_mut(&name) else {
                continue;
            };
            let mut ctx = SceneContext::new(&name);
            entry.object.on_scene_render(&mut ctx, &frame);
            self.dispatch(ctx);
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Resize the viewport; the active camera's aspect follows immediately.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let aspect = viewport.aspect();
        if let Some(camera) = self.camera_mut() {
            camera.set_aspect_ratio(aspect);
            camera.update_matrices();
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ===== EFFECTS =====

    /// Forward a post-processing setting to the renderer.
    pub fn apply_effect(&mut self, effect: PostEffect) {
        crate::engine_debug!("scenery3d::SceneManager", "Applying {} effect", effect.name());
        self.renderer.apply_effect(&effect);
    }

    pub fn set_bloom(&mut self, settings: BloomSettings) {
        self.apply_effect(PostEffect::Bloom(settings));
    }

    pub fn set_ssao(&mut self, settings: SsaoSettings) {
        self.apply_effect(PostEffect::Ssao(settings));
    }

    pub fn set_tone_mapping(&mut self, settings: ToneMappingSettings) {
        self.apply_effect(PostEffect::ToneMapping(settings));
    }

    pub fn set_color_balance(&mut self, settings: ColorBalanceSettings) {
        self.apply_effect(PostEffect::ColorBalance(settings));
    }

    pub fn set_anti_aliasing(&mut self, mode: AntiAliasing) {
        self.apply_effect(PostEffect::AntiAliasing(mode));
    }

    // ===== QUERIES =====

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn object(&self, name: &str) -> Option<&dyn SceneObject> {
        self.objects.get(name).map(|entry| &*entry.object as &dyn SceneObject)
    }

    /// Mutable access to a registered object. Call `refresh` afterwards if
    /// its drawables or lights changed.
    pub fn object_mut(&mut self, name: &str) -> Option<&mut (dyn SceneObject + 'static)> {
        self.objects.get_mut(name).map(|entry| entry.object.as_mut())
    }

    /// Lifecycle state, `None` when not registered
    pub fn object_state(&self, name: &str) -> Option<ObjectState> {
        self.objects.get(name).map(|entry| entry.state)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Number of messages waiting for `name` to register
    pub fn pending_messages(&self, name: &str) -> usize {
        self.mailbox.get(name).map_or(0, Vec::len)
    }
}

fn find_camera<'a>(
    objects: &'a IndexMap<String, SceneEntry>,
    name: Option<&str>,
) -> Option<&'a dyn CameraManager> {
    objects.get(name?)?.object.as_camera()
}

fn enqueue(queue: &mut VecDeque<(String, Outgoing)>, mut ctx: SceneContext) {
    let from = ctx.name().to_string();
    queue.extend(ctx.take_outbox().into_iter().map(|outgoing| (from.clone(), outgoing)));
}

fn attach(renderer: &mut dyn Renderer, ray_cast: &mut RayCast, name: &str, drawables: &[Drawable], lights: &[Light]) {
    if drawables.is_empty() && lights.is_empty() {
        return;
    }
    renderer.add(name, drawables, lights);
    for drawable in drawables.iter().filter(|drawable| drawable.is_raycastable()) {
        ray_cast.add(name, drawable.clone());
    }
}

fn detach(renderer: &mut dyn Renderer, ray_cast: &mut RayCast, name: &str, drawables: &[Drawable], lights: &[Light]) {
    if drawables.is_empty() && lights.is_empty() {
        return;
    }
    renderer.remove(name, drawables, lights);
    ray_cast.remove(name);
}

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;
