//! Comet activity engine. Advances each comet along its orbit, then
//! drives every visual layer (coma, glow, tails, particle clouds) from
//! the instantaneous heliocentric distance.
//!
//! Two tail-particle modes exist: the default regenerates all particle
//! positions every frame, the physics mode ages individual particles
//! under solar-wind drift. A comet picks one at construction.

use glam::Vec3;

use crate::api::types::BodyKind;
use crate::bodies::body::CometDescriptor;
use crate::core::registry::BodyRegistry;
use crate::render::particles::{unpack_color, MaterialState, ParticleBuffer};
use crate::systems::integrator::comet_position;
use crate::systems::rng::Rng;

/// Activity fades to zero at this heliocentric distance.
pub const MAX_ACTIVITY_DISTANCE: f32 = 10.0;
/// Coma and glow only show on strongly active comets.
pub const COMA_THRESHOLD: f32 = 0.3;
/// Tails and particle clouds show at lower activity.
pub const TAIL_THRESHOLD: f32 = 0.1;

pub const ION_PARTICLES: usize = 60;
pub const DUST_PARTICLES: usize = 100;
pub const PARTICLE_MAX_AGE: f32 = 100.0;

pub const COMA_COLOR: u32 = 0xCCEEFF;
pub const GLOW_COLOR: u32 = 0x88CCFF;
pub const ION_COLOR: u32 = 0x4499FF;

/// Activity scalar in [0, 1] from heliocentric distance in AU.
pub fn activity_for(sun_distance_au: f32) -> f32 {
    ((MAX_ACTIVITY_DISTANCE - sun_distance_au) / MAX_ACTIVITY_DISTANCE).clamp(0.0, 1.0)
}

/// Per-comet mutable visual state. Mutated only by this module; the
/// renderer reads it after the tick.
#[derive(Debug)]
pub struct CometState {
    pub tail_length: f32,
    /// Base opacity of the dust-tail mesh at full activity.
    pub tail_opacity: f32,
    pub nucleus_spin: f32,
    pub nucleus_tumble: f32,
    pub physics_tail: bool,
    pub base_color: u32,

    pub activity: f32,
    /// Unit vector from Sun through the nucleus; tails extend along it.
    pub tail_dir: Vec3,

    pub coma: MaterialState,
    /// World-space coma sphere diameter.
    pub coma_diameter: f32,
    pub glow: MaterialState,

    /// Straight blue plasma tail, a unit cylinder scaled non-uniformly.
    pub ion_tail: MaterialState,
    pub ion_tail_scale: Vec3,
    /// Broad curved dust tail.
    pub dust_tail: MaterialState,
    pub dust_tail_scale: Vec3,

    pub ion_cloud: MaterialState,
    pub dust_cloud: MaterialState,
    /// Particle positions are local to the nucleus.
    pub ion_particles: ParticleBuffer,
    pub dust_particles: ParticleBuffer,

    rng: Rng,
}

impl CometState {
    pub fn new(desc: &CometDescriptor, base_color: u32, seed: u64) -> Self {
        let mut state = Self {
            tail_length: desc.tail_length,
            tail_opacity: desc.tail_opacity,
            nucleus_spin: desc.nucleus_spin,
            nucleus_tumble: desc.nucleus_tumble,
            physics_tail: desc.physics_tail,
            base_color,
            activity: 0.0,
            tail_dir: Vec3::X,
            coma: MaterialState::new(COMA_COLOR),
            coma_diameter: 2.0,
            glow: MaterialState::new(GLOW_COLOR),
            ion_tail: MaterialState::new(ION_COLOR),
            ion_tail_scale: Vec3::new(0.3, 0.0, 0.3),
            dust_tail: MaterialState::new(base_color),
            dust_tail_scale: Vec3::new(0.6, 0.0, 0.6),
            ion_cloud: MaterialState::new(ION_COLOR),
            dust_cloud: MaterialState::new(base_color),
            ion_particles: ParticleBuffer::new(ION_PARTICLES, PARTICLE_MAX_AGE),
            dust_particles: ParticleBuffer::new(DUST_PARTICLES, PARTICLE_MAX_AGE),
            rng: Rng::new(seed),
        };
        state.seed_particle_colors();
        if state.physics_tail {
            state.seed_physics_particles();
        }
        state
    }

    fn seed_particle_colors(&mut self) {
        let (r, g, b) = unpack_color(ION_COLOR);
        for chunk in self.ion_particles.colors_mut().chunks_exact_mut(3) {
            chunk[0] = r;
            chunk[1] = g;
            chunk[2] = b;
        }
        let (r, g, b) = unpack_color(self.base_color);
        for chunk in self.dust_particles.colors_mut().chunks_exact_mut(3) {
            chunk[0] = r;
            chunk[1] = g;
            chunk[2] = b;
        }
    }

    /// Stagger initial ages so the physics tail does not respawn in
    /// lockstep waves.
    fn seed_physics_particles(&mut self) {
        let max_age = self.ion_particles.max_age;
        for age in self.ion_particles.ages_mut() {
            *age = self.rng.next_f32() * max_age;
        }
        let max_age = self.dust_particles.max_age;
        for age in self.dust_particles.ages_mut() {
            *age = self.rng.next_f32() * max_age;
        }
    }

    /// World-space center of the ion-tail cylinder: offset from the
    /// nucleus by half the scaled tail length so the tail starts there.
    pub fn ion_tail_center(&self, nucleus: Vec3) -> Vec3 {
        nucleus + self.tail_dir * (self.ion_tail_scale.y * 0.5)
    }

    pub fn dust_tail_center(&self, nucleus: Vec3) -> Vec3 {
        nucleus + self.tail_dir * (self.dust_tail_scale.y * 0.5)
    }

    fn update_layers(&mut self, nucleus: Vec3, dt_sim: f32, wall_ms: f64) {
        let distance_au = nucleus.length() / crate::systems::integrator::DISTANCE_SCALE;
        self.activity = activity_for(distance_au);
        if nucleus.length_squared() > 0.0 {
            self.tail_dir = nucleus.normalize();
        }

        let pulse = 1.0 + 0.2 * ((wall_ms * 1e-3).sin() as f32);
        let flicker = 1.0 + 0.3 * ((wall_ms * 5e-3).sin() as f32);

        if self.activity > COMA_THRESHOLD {
            self.coma_diameter = 2.0 + 8.0 * self.activity;
            self.coma.opacity = self.activity * 0.6 * pulse;
            self.coma.visible = true;
            self.glow.opacity = self.activity * 0.3 * pulse;
            self.glow.visible = true;
        } else {
            self.coma.extinguish();
            self.glow.extinguish();
        }

        if self.activity > TAIL_THRESHOLD {
            self.ion_tail_scale = Vec3::new(0.3, self.activity * 20.0, 0.3);
            self.ion_tail.opacity = self.activity * 0.6 * flicker;
            self.ion_tail.visible = true;
            self.dust_tail_scale = Vec3::new(0.6, self.activity * 25.0, 0.6);
            self.dust_tail.opacity = self.activity * self.tail_opacity;
            self.dust_tail.visible = true;

            self.ion_cloud.opacity = self.activity * 0.6;
            self.ion_cloud.visible = true;
            self.dust_cloud.opacity = self.activity * 0.7;
            self.dust_cloud.visible = true;

            // Frozen time freezes particle motion; opacities keep
            // tracking the wall-clock pulse.
            if dt_sim != 0.0 {
                if self.physics_tail {
                    self.step_physics_particles(dt_sim);
                } else {
                    self.regenerate_particles();
                }
            }
        } else {
            self.ion_tail.extinguish();
            self.dust_tail.extinguish();
            self.ion_cloud.extinguish();
            self.dust_cloud.extinguish();
        }
    }

    /// Default mode: throw every particle to a fresh random spot along
    /// the tail each frame. Ion particles hug the axis; dust particles
    /// spread wide and sweep backward along the orbital tangent.
    fn regenerate_particles(&mut self) {
        let dir = self.tail_dir;
        let tangent = Vec3::new(-dir.z, 0.0, dir.x);
        let tail_length = self.tail_length;

        let positions = self.ion_particles.positions_mut();
        for chunk in positions.chunks_exact_mut(3) {
            let distance = self.rng.next_f32() * tail_length * 20.0;
            let jitter = distance * 0.02;
            chunk[0] = dir.x * distance + self.rng.next_signed() * jitter;
            chunk[1] = dir.y * distance + self.rng.next_signed() * jitter;
            chunk[2] = dir.z * distance + self.rng.next_signed() * jitter;
        }
        self.ion_particles.needs_upload = true;

        let positions = self.dust_particles.positions_mut();
        for chunk in positions.chunks_exact_mut(3) {
            let distance = self.rng.next_f32() * tail_length * 25.0;
            let jitter = distance * 0.15;
            let curve = distance * distance * 1e-3;
            chunk[0] = dir.x * distance + self.rng.next_signed() * jitter + tangent.x * curve;
            chunk[1] = dir.y * distance + self.rng.next_signed() * jitter;
            chunk[2] = dir.z * distance + self.rng.next_signed() * jitter + tangent.z * curve;
        }
        self.dust_particles.needs_upload = true;
    }

    /// Physics mode: particles live in a nucleus-local frame whose z
    /// axis runs down the tail. Age out, respawn near the nucleus,
    /// drift under solar-wind pressure plus a little turbulence.
    fn step_physics_particles(&mut self, dt_sim: f32) {
        let activity = self.activity;
        let tail_length = self.tail_length;
        let (r, g, b) = unpack_color(ION_COLOR);
        step_physics_buffer(
            &mut self.ion_particles,
            &mut self.rng,
            dt_sim,
            0.10 * activity,
            tail_length,
            (r, g, b),
        );
        let (r, g, b) = unpack_color(self.base_color);
        step_physics_buffer(
            &mut self.dust_particles,
            &mut self.rng,
            dt_sim,
            0.05 * activity,
            tail_length,
            (r, g, b),
        );
    }
}

fn step_physics_buffer(
    buffer: &mut ParticleBuffer,
    rng: &mut Rng,
    dt_sim: f32,
    solar_pressure: f32,
    tail_length: f32,
    base_rgb: (f32, f32, f32),
) {
    let max_age = buffer.max_age;
    let fade_span = tail_length * 15.0;
    let (positions, velocities, ages, colors) = buffer.arrays_mut();

    for i in 0..ages.len() {
        ages[i] += dt_sim;
        let p = &mut positions[i * 3..i * 3 + 3];
        if ages[i] > max_age {
            ages[i] = 0.0;
            p[0] = rng.next_signed() * 2.0;
            p[1] = rng.next_signed() * 2.0;
            p[2] = rng.next_signed() * 2.0;
            velocities[i * 3] = rng.next_signed() * 0.1;
            velocities[i * 3 + 1] = rng.next_signed() * 0.1;
            velocities[i * 3 + 2] = -(0.2 + rng.next_f32() * 0.3);
        } else {
            velocities[i * 3 + 2] -= solar_pressure * dt_sim;
            velocities[i * 3] += rng.next_signed() * 0.01 * dt_sim;
            velocities[i * 3 + 1] += rng.next_signed() * 0.01 * dt_sim;
            p[0] += velocities[i * 3] * dt_sim;
            p[1] += velocities[i * 3 + 1] * dt_sim;
            p[2] += velocities[i * 3 + 2] * dt_sim;
        }
        let fade = (1.0 - ages[i] / max_age).max(0.0)
            * (1.0 - positions[i * 3 + 2].abs() / fade_span).max(0.0);
        colors[i * 3] = base_rgb.0 * fade;
        colors[i * 3 + 1] = base_rgb.1 * fade;
        colors[i * 3 + 2] = base_rgb.2 * fade;
    }
    buffer.needs_upload = true;
}

/// Advance every comet: orbit, nucleus spin/tumble, then visual layers.
/// Called after the integrator; dt_sim is zero while paused, which
/// freezes orbital motion but keeps the wall-clock pulse alive.
pub fn tick_comets(registry: &mut BodyRegistry, dt_sim: f32, wall_ms: f64) {
    for index in registry.indices_of_kind(BodyKind::Comet) {
        let body = registry.body_at_mut(index);
        body.phase.angle += body.orbit.mean_motion * dt_sim;
        body.position = comet_position(
            body.phase.angle,
            body.orbit.semi_major_axis_au,
            body.orbit.eccentricity,
            body.orbit.inclination_deg,
        );
        let nucleus = body.position;
        if let Some(comet) = &mut body.comet {
            body.rotation.y += comet.nucleus_spin * dt_sim;
            body.rotation.x += comet.nucleus_tumble * dt_sim;
            comet.update_layers(nucleus, dt_sim, wall_ms);
        }
    }
}
