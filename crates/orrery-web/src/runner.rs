use orrery_engine::{
    catalog_from_json, Body, BodyInstance, BodyKind, CometInstance, World, WorldConfig,
};

/// Floats in the packed camera buffer: position, look-at, fov, aspect,
/// near, far, plus two pads.
pub const CAMERA_FLOATS: usize = 12;

/// Owns the `World` and the flat buffers the TypeScript renderer reads
/// through SharedArrayBuffer views. The browser glue creates one runner
/// in a `thread_local!` and drives it through free functions.
pub struct OrreryRunner {
    world: World,
    camera_buffer: [f32; CAMERA_FLOATS],
}

impl OrreryRunner {
    pub fn new() -> Result<Self, String> {
        let world =
            World::with_default_catalog(WorldConfig::default()).map_err(|e| e.to_string())?;
        Ok(Self {
            world,
            camera_buffer: [0.0; CAMERA_FLOATS],
        })
    }

    /// Advance one frame. `now` is `performance.now()` in milliseconds.
    pub fn tick(&mut self, now_ms: f64) {
        self.world.tick(now_ms * 1e-3);
        self.pack_camera();
    }

    fn pack_camera(&mut self) {
        let cam = &self.world.camera.state;
        self.camera_buffer = [
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.look_at.x,
            cam.look_at.y,
            cam.look_at.z,
            cam.fov_deg,
            cam.aspect,
            cam.near,
            cam.far,
            0.0,
            0.0,
        ];
    }

    /// Replace the default catalog with a user-supplied JSON one.
    /// Construction time only; fails without touching the world on a
    /// bad document.
    pub fn load_catalog(&mut self, json: &str) -> Result<(), String> {
        let catalog = catalog_from_json(json).map_err(|e| e.to_string())?;
        let mut world = World::new(WorldConfig::default());
        world
            .registry
            .register_all(catalog)
            .map_err(|e| e.to_string())?;
        self.world = world;
        Ok(())
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn body_names(&self) -> impl Iterator<Item = &str> {
        self.world.registry.iter().map(|b| b.name.as_str())
    }

    pub fn focused_info_json(&self) -> Option<String> {
        let info = self.world.focused_info()?;
        serde_json::to_string(&info).ok()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn bodies_ptr(&self) -> *const f32 {
        self.world.body_buffer().instances_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.world.body_buffer().instance_count()
    }

    pub fn body_floats(&self) -> u32 {
        BodyInstance::FLOATS as u32
    }

    pub fn comets_ptr(&self) -> *const f32 {
        self.world.comet_buffer().instances_ptr()
    }

    pub fn comet_count(&self) -> u32 {
        self.world.comet_buffer().instance_count()
    }

    pub fn comet_floats(&self) -> u32 {
        CometInstance::FLOATS as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera_buffer.as_ptr()
    }

    /// The nth comet in registration order, matching the comet buffer.
    fn comet_at(&self, index: u32) -> Option<&Body> {
        self.world
            .registry
            .iter_kind(BodyKind::Comet)
            .nth(index as usize)
    }

    pub fn ion_positions_ptr(&self, comet: u32) -> *const f32 {
        self.comet_at(comet)
            .and_then(|b| b.comet.as_ref())
            .map_or(std::ptr::null(), |c| c.ion_particles.positions_ptr())
    }

    pub fn ion_colors_ptr(&self, comet: u32) -> *const f32 {
        self.comet_at(comet)
            .and_then(|b| b.comet.as_ref())
            .map_or(std::ptr::null(), |c| c.ion_particles.colors_ptr())
    }

    pub fn ion_particle_count(&self, comet: u32) -> u32 {
        self.comet_at(comet)
            .and_then(|b| b.comet.as_ref())
            .map_or(0, |c| c.ion_particles.count() as u32)
    }

    pub fn dust_positions_ptr(&self, comet: u32) -> *const f32 {
        self.comet_at(comet)
            .and_then(|b| b.comet.as_ref())
            .map_or(std::ptr::null(), |c| c.dust_particles.positions_ptr())
    }

    pub fn dust_colors_ptr(&self, comet: u32) -> *const f32 {
        self.comet_at(comet)
            .and_then(|b| b.comet.as_ref())
            .map_or(std::ptr::null(), |c| c.dust_particles.colors_ptr())
    }

    pub fn dust_particle_count(&self, comet: u32) -> u32 {
        self.comet_at(comet)
            .and_then(|b| b.comet.as_ref())
            .map_or(0, |c| c.dust_particles.count() as u32)
    }

    /// True when the comet's particle buffers changed this frame and
    /// clears the flag, so the renderer re-uploads at most once.
    pub fn take_particles_dirty(&mut self, comet: u32) -> bool {
        let Some(body) = self
            .world
            .registry
            .iter_mut()
            .filter(|b| b.kind == BodyKind::Comet)
            .nth(comet as usize)
        else {
            return false;
        };
        let Some(c) = body.comet.as_mut() else {
            return false;
        };
        let dirty = c.ion_particles.needs_upload || c.dust_particles.needs_upload;
        c.ion_particles.needs_upload = false;
        c.dust_particles.needs_upload = false;
        dirty
    }
}
