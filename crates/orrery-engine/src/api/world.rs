use serde::Serialize;

use crate::api::types::{BodyId, BodyKind, CatalogError};
use crate::bodies::body::BodyDescriptor;
use crate::bodies::default_catalog;
use crate::camera::controller::CameraController;
use crate::camera::focus::FocusManager;
use crate::camera::zoom::ZoomController;
use crate::core::registry::BodyRegistry;
use crate::core::time::SceneTime;
use crate::input::queue::{decode_key, InputEvent, InputQueue};
use crate::input::state::InputState;
use crate::render::instance::{BodyBuffer, BodyInstance, CometBuffer, CometInstance};
use crate::systems::{comet, integrator};

/// Construction-time configuration for a world.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Simulation time units per tick.
    pub time_speed: f32,
    /// Camera world units per frame at the 60 Hz reference cadence.
    pub movement_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            time_speed: 1.0,
            movement_speed: 10.0,
        }
    }
}

/// Info-panel payload for the currently focused body.
#[derive(Debug, Clone, Serialize)]
pub struct FocusedInfo {
    pub name: String,
    pub kind: BodyKind,
    pub distance_au: f32,
    pub eccentricity: f32,
    pub camera_distance: f32,
    /// Present for comets only.
    pub activity: Option<f32>,
}

/// The whole simulation, owned by the frame loop. Registry, clock,
/// camera, focus, zoom, and input state live here and nowhere else;
/// there are no module-level globals.
pub struct World {
    pub registry: BodyRegistry,
    pub time: SceneTime,
    pub camera: CameraController,
    pub focus: FocusManager,
    pub zoom: ZoomController,
    pub input_queue: InputQueue,
    input: InputState,
    bodies: BodyBuffer,
    comets: CometBuffer,
    last_now: Option<f64>,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        let mut camera = CameraController::new();
        camera.set_movement_speed(config.movement_speed);
        Self {
            registry: BodyRegistry::new(),
            time: SceneTime::new(config.time_speed),
            camera,
            focus: FocusManager::new(),
            zoom: ZoomController::new(),
            input_queue: InputQueue::new(),
            input: InputState::default(),
            bodies: BodyBuffer::default(),
            comets: CometBuffer::default(),
            last_now: None,
        }
    }

    /// A world populated with the built-in solar system.
    pub fn with_default_catalog(config: WorldConfig) -> Result<Self, CatalogError> {
        let mut world = Self::new(config);
        world.registry.register_all(default_catalog())?;
        log::info!("world ready with {} bodies", world.registry.len());
        Ok(world)
    }

    fn now(&self) -> f64 {
        self.last_now.unwrap_or(0.0)
    }

    // ── Frame loop ──────────────────────────────────────────────────

    /// Advance one frame. `now` is the host clock in seconds.
    pub fn tick(&mut self, now: f64) {
        let dt_real = match self.last_now {
            // Clamp long stalls (tab hidden) to keep intents bounded.
            Some(last) => ((now - last).max(0.0) as f32).min(0.1),
            None => 1.0 / 60.0,
        };
        self.last_now = Some(now);
        let wall_ms = now * 1000.0;

        self.input.begin_frame();
        for event in self.input_queue.drain() {
            if let InputEvent::Wheel { delta_y } = event {
                self.zoom.on_wheel(delta_y, now);
            }
            self.input.apply(event);
        }
        if self.input.pause_toggled {
            self.time.toggle_paused();
        }

        // Debounced wheel zoom applies before anything reads the focus
        // target distance.
        self.zoom
            .tick(now, &mut self.focus, &mut self.camera, &self.registry);

        // User intents win against the same-frame auto-recenter.
        self.camera
            .apply_intent(&self.input, dt_real, self.focus.focused());

        let dt_sim = self.time.sim_dt();
        if let Some(dt_sim) = dt_sim {
            integrator::tick(&mut self.registry, dt_sim);
        }

        // Integration precedes focus resolution so the camera chases
        // up-to-date target positions.
        self.focus
            .tick(now, &self.registry, &mut self.camera, &self.input);

        comet::tick_comets(&mut self.registry, dt_sim.unwrap_or(0.0), wall_ms);

        self.publish();
    }

    /// Rebuild the flat render buffers in registration order; the slot
    /// index is the body's stable render handle.
    fn publish(&mut self) {
        self.bodies.clear();
        self.comets.clear();
        for (slot, body) in self.registry.iter().enumerate() {
            self.bodies.push(BodyInstance {
                x: body.position.x,
                y: body.position.y,
                z: body.position.z,
                rot_x: body.rotation.x,
                rot_y: body.rotation.y,
                rot_z: body.rotation.z,
                radius: body.display_radius,
                kind: body.kind.as_index() as f32,
                color: body.color as f32,
                cloud_rot: body.clouds.map_or(0.0, |c| c.angle),
                rings: if body.has_rings { 1.0 } else { 0.0 },
                alpha: 1.0,
            });
            if let Some(c) = &body.comet {
                self.comets.push(CometInstance {
                    body_slot: slot as f32,
                    activity: c.activity,
                    dir_x: c.tail_dir.x,
                    dir_y: c.tail_dir.y,
                    dir_z: c.tail_dir.z,
                    coma_opacity: c.coma.opacity,
                    coma_diameter: c.coma_diameter,
                    glow_opacity: c.glow.opacity,
                    ion_tail_opacity: c.ion_tail.opacity,
                    ion_tail_len: c.ion_tail_scale.y,
                    dust_tail_opacity: c.dust_tail.opacity,
                    dust_tail_len: c.dust_tail_scale.y,
                    ion_cloud_opacity: c.ion_cloud.opacity,
                    dust_cloud_opacity: c.dust_cloud.opacity,
                    _pad0: 0.0,
                    _pad1: 0.0,
                });
            }
        }
    }

    // ── External operations ─────────────────────────────────────────

    /// Register a body; construction time only.
    pub fn register_body(&mut self, desc: BodyDescriptor) -> Result<BodyId, CatalogError> {
        self.registry.register(desc)
    }

    /// Focus a body by name. The current target toggles off; an unknown
    /// name clears focus.
    pub fn set_focus(&mut self, name: &str) {
        let id = self.registry.find_by_name(name).map(|b| b.id);
        let now = self.now();
        self.focus
            .set_focus(id, &self.registry, &mut self.camera, now);
    }

    pub fn set_focus_by_id(&mut self, id: Option<BodyId>) {
        let now = self.now();
        self.focus
            .set_focus(id, &self.registry, &mut self.camera, now);
    }

    pub fn clear_focus(&mut self) {
        self.focus.clear_focus(&mut self.camera);
    }

    pub fn set_time_speed(&mut self, speed: f32) {
        self.time.set_time_speed(speed);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.time.set_paused(paused);
    }

    pub fn set_movement_speed(&mut self, speed: f32) {
        self.camera.set_movement_speed(speed);
    }

    pub fn set_zoom_from_slider(&mut self, value: f32) {
        self.zoom
            .set_zoom_from_slider(value, &mut self.focus, &mut self.camera);
    }

    pub fn sync_slider_from_camera(&mut self) -> f32 {
        self.zoom.sync_slider_from_camera(&self.focus, &self.camera)
    }

    /// Decode and queue a raw key event; unknown codes are dropped.
    pub fn on_key(&mut self, code: &str, down: bool) {
        if let Some(intent) = decode_key(code) {
            self.input_queue.push(InputEvent::Key { intent, down });
        }
    }

    pub fn on_mouse_down(&mut self, x: f32, y: f32) {
        self.input_queue.push(InputEvent::PointerDown { x, y });
    }

    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        self.input_queue.push(InputEvent::PointerMove { x, y });
    }

    pub fn on_mouse_up(&mut self) {
        self.input_queue.push(InputEvent::PointerUp);
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        self.input_queue.push(InputEvent::Wheel { delta_y });
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.camera.on_resize(width, height);
    }

    // ── Read side ───────────────────────────────────────────────────

    pub fn body_buffer(&self) -> &BodyBuffer {
        &self.bodies
    }

    pub fn comet_buffer(&self) -> &CometBuffer {
        &self.comets
    }

    /// Info-panel payload for the focused body, if any.
    pub fn focused_info(&self) -> Option<FocusedInfo> {
        let body = self.focus.target().and_then(|id| self.registry.get(id))?;
        Some(FocusedInfo {
            name: body.name.clone(),
            kind: body.kind,
            distance_au: body.sun_distance_au(),
            eccentricity: body.orbit.eccentricity,
            camera_distance: (self.camera.state.position - body.position).length(),
            activity: body.comet.as_ref().map(|c| c.activity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn world() -> World {
        World::with_default_catalog(WorldConfig::default()).unwrap()
    }

    fn run(world: &mut World, start: f64, frames: usize) -> f64 {
        let mut now = start;
        for _ in 0..frames {
            now += 1.0 / 60.0;
            world.tick(now);
        }
        now
    }

    #[test]
    fn default_world_publishes_all_bodies() {
        let mut w = world();
        w.tick(0.0);
        assert_eq!(w.body_buffer().instance_count(), 25);
        assert_eq!(w.comet_buffer().instance_count(), 6);
    }

    #[test]
    fn earth_position_after_thousand_ticks() {
        // Host clock cadence does not matter for sim time: dt_sim is
        // time_speed per tick.
        let mut w = world();
        run(&mut w, 0.0, 1000);
        let earth = w.registry.find_by_name("earth").unwrap();
        assert!((earth.phase.angle - 5.0).abs() < 1e-3);
        let expected = Vec3::new(200.0 * 5.0f32.cos(), 0.0, 200.0 * 5.0f32.sin());
        assert!((earth.position - expected).length() < 0.1);
    }

    #[test]
    fn pause_freezes_simulation_but_not_camera() {
        let mut w = world();
        let now = run(&mut w, 0.0, 200);
        let angle = w.registry.find_by_name("earth").unwrap().phase.angle;
        let ion_positions = {
            let halley = w.registry.find_by_name("halley").unwrap();
            halley
                .comet
                .as_ref()
                .unwrap()
                .ion_particles
                .positions()
                .to_vec()
        };

        w.set_paused(true);
        let camera_before = w.camera.state.position;
        let now = run(&mut w, now, 100);
        let halley = w.registry.find_by_name("halley").unwrap();
        assert_eq!(w.registry.find_by_name("earth").unwrap().phase.angle, angle);
        assert_eq!(
            halley.comet.as_ref().unwrap().ion_particles.positions(),
            &ion_positions[..]
        );
        assert_eq!(w.camera.state.position, camera_before);

        // Camera still answers input while paused.
        w.on_key("KeyW", true);
        run(&mut w, now, 5);
        assert_ne!(w.camera.state.position, camera_before);
        assert_eq!(w.registry.find_by_name("earth").unwrap().phase.angle, angle);
    }

    #[test]
    fn space_toggles_pause() {
        let mut w = world();
        let now = run(&mut w, 0.0, 2);
        w.on_key("Space", true);
        let now = run(&mut w, now, 1);
        assert!(w.time.paused());
        w.on_key("Space", false);
        w.on_key("Space", true);
        run(&mut w, now, 1);
        assert!(!w.time.paused());
    }

    #[test]
    fn focus_toggle_by_name() {
        let mut w = world();
        w.tick(0.0);
        w.set_focus("earth");
        assert!(w.focus.focused());
        w.set_focus("earth");
        assert!(!w.focus.focused());
        w.set_focus("atlantis");
        assert!(!w.focus.focused());
    }

    #[test]
    fn focus_settles_to_optimal_and_follows() {
        let mut w = world();
        let now = run(&mut w, 0.0, 2);
        w.set_focus("earth");
        let now = run(&mut w, now, 60); // past the 0.2 s + 0.5 s settle
        let earth_pos = w.registry.find_by_name("earth").unwrap().position;
        let dist = (w.camera.state.position - earth_pos).length();
        assert!((dist - 40.0).abs() < 2.0, "settled at {dist}");
        assert_eq!(w.camera.state.look_at, earth_pos);

        // Offset rides along with the orbiting body.
        let offset = w.camera.state.position - earth_pos;
        run(&mut w, now, 120);
        let earth_pos = w.registry.find_by_name("earth").unwrap().position;
        let new_offset = w.camera.state.position - earth_pos;
        assert!((new_offset - offset).length() < 1e-2);
    }

    #[test]
    fn wheel_zoom_out_updates_target_distance_and_slider() {
        let mut w = world();
        let now = run(&mut w, 0.0, 2);
        w.set_focus("earth");
        let now = run(&mut w, now, 60);
        assert_eq!(w.focus.target_distance, Some(40.0));

        w.on_wheel(120.0);
        let now = run(&mut w, now, 1); // queued, debounce pending
        run(&mut w, now, 5); // > 50 ms quiet at 60 Hz
        let distance = w.focus.target_distance.unwrap();
        assert!((distance - 46.0).abs() < 1e-3, "distance {distance}");
        let slider = w.sync_slider_from_camera();
        assert!(slider > 40.0 && slider <= 46.0, "slider {slider}");
    }

    #[test]
    fn determinism_with_identical_input() {
        let run_world = || {
            let mut w = world();
            let mut now = 0.0;
            for frame in 0..300 {
                if frame == 50 {
                    w.set_focus("mars");
                }
                if frame == 100 {
                    w.on_key("KeyW", true);
                }
                if frame == 130 {
                    w.on_key("KeyW", false);
                }
                now += 1.0 / 60.0;
                w.tick(now);
            }
            (
                w.registry.find_by_name("mars").unwrap().position,
                w.camera.state.position,
            )
        };
        assert_eq!(run_world(), run_world());
    }

    #[test]
    fn focused_info_payload() {
        let mut w = world();
        w.tick(0.0);
        assert!(w.focused_info().is_none());
        w.set_focus("halley");
        w.tick(1.0 / 60.0);
        let info = w.focused_info().unwrap();
        assert_eq!(info.name, "halley");
        assert_eq!(info.kind, BodyKind::Comet);
        assert!(info.activity.is_some());
        assert!((info.eccentricity - 0.967).abs() < 1e-6);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"halley\""));
    }

    #[test]
    fn stale_clock_does_not_panic_or_rewind() {
        let mut w = world();
        w.tick(1.0);
        w.tick(0.5); // host clock went backwards
        let earth = w.registry.find_by_name("earth").unwrap();
        assert!(earth.phase.angle > 0.0);
    }
}
