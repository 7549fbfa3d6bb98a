use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::{BodyId, BodyKind};
use crate::systems::comet::CometState;

/// Orbital parameters. Distances are in AU; the integrator applies
/// DISTANCE_SCALE when deriving render-unit positions.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    pub semi_major_axis_au: f32,
    /// Eccentricity in [0, 1). Zero means a circular orbit.
    pub eccentricity: f32,
    pub inclination_deg: f32,
    /// Angular rate in radians per unit of simulation time.
    pub mean_motion: f32,
    /// Set for moons only; names the planet whose instantaneous position
    /// the moon orbits.
    pub parent: Option<BodyId>,
}

/// Mutable per-body kinematic phase.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    /// Orbital angle in radians. For elliptical orbits this is treated
    /// as the true anomaly and advanced uniformly; physically wrong,
    /// visually smooth.
    pub angle: f32,
    /// Axial spin rate in radians per unit of simulation time.
    pub rotation_rate: f32,
}

/// Earth's cloud layer spins independently of the surface.
#[derive(Debug, Clone, Copy)]
pub struct CloudLayer {
    pub rate: f32,
    pub angle: f32,
}

/// One physical object in the scene. The registry exclusively owns every
/// Body; the integrator writes `phase.angle`, `position` and `rotation`,
/// and the comet engine alone touches `comet`.
#[derive(Debug)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub display_radius: f32,
    pub color: u32,
    pub orbit: Orbit,
    pub phase: Phase,
    /// World-space position, written back each tick.
    pub position: Vec3,
    /// Euler rotation (axial spin on y, comet tumble on x).
    pub rotation: Vec3,
    pub clouds: Option<CloudLayer>,
    pub has_rings: bool,
    pub comet: Option<CometState>,
}

impl Body {
    /// Heliocentric distance in AU.
    pub fn sun_distance_au(&self) -> f32 {
        self.position.length() / crate::systems::integrator::DISTANCE_SCALE
    }
}

fn default_color() -> u32 {
    0xFFFFFF
}

/// Comet-only configuration carried by a descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CometDescriptor {
    pub tail_length: f32,
    pub tail_opacity: f32,
    pub nucleus_spin: f32,
    pub nucleus_tumble: f32,
    /// Per-particle physics tail instead of per-frame regeneration.
    #[serde(default)]
    pub physics_tail: bool,
}

/// Serializable construction-time description of a body. The catalog is
/// a list of these; user catalogs load from JSON the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    pub kind: BodyKind,
    pub display_radius: f32,
    pub semi_major_axis_au: f32,
    #[serde(default)]
    pub eccentricity: f32,
    #[serde(default)]
    pub inclination_deg: f32,
    #[serde(default)]
    pub mean_motion: f32,
    #[serde(default)]
    pub rotation_rate: f32,
    #[serde(default)]
    pub initial_angle: f32,
    #[serde(default = "default_color")]
    pub color: u32,
    /// Parent planet name, moons only.
    #[serde(default)]
    pub parent: Option<String>,
    /// Cloud-layer spin rate (Earth).
    #[serde(default)]
    pub cloud_rate: Option<f32>,
    #[serde(default)]
    pub has_rings: bool,
    #[serde(default)]
    pub comet: Option<CometDescriptor>,
}

impl BodyDescriptor {
    pub fn new(name: impl Into<String>, kind: BodyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            display_radius: 1.0,
            semi_major_axis_au: 0.0,
            eccentricity: 0.0,
            inclination_deg: 0.0,
            mean_motion: 0.0,
            rotation_rate: 0.0,
            initial_angle: 0.0,
            color: default_color(),
            parent: None,
            cloud_rate: None,
            has_rings: false,
            comet: None,
        }
    }

    // -- Builder pattern --

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.display_radius = radius;
        self
    }

    pub fn with_orbit(mut self, semi_major_axis_au: f32, mean_motion: f32) -> Self {
        self.semi_major_axis_au = semi_major_axis_au;
        self.mean_motion = mean_motion;
        self
    }

    pub fn with_eccentricity(mut self, eccentricity: f32) -> Self {
        self.eccentricity = eccentricity;
        self
    }

    pub fn with_inclination(mut self, inclination_deg: f32) -> Self {
        self.inclination_deg = inclination_deg;
        self
    }

    pub fn with_rotation_rate(mut self, rate: f32) -> Self {
        self.rotation_rate = rate;
        self
    }

    pub fn with_initial_angle(mut self, angle: f32) -> Self {
        self.initial_angle = angle;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_clouds(mut self, rate: f32) -> Self {
        self.cloud_rate = Some(rate);
        self
    }

    pub fn with_rings(mut self) -> Self {
        self.has_rings = true;
        self
    }

    pub fn with_comet(mut self, comet: CometDescriptor) -> Self {
        self.comet = Some(comet);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_builder() {
        let desc = BodyDescriptor::new("earth", BodyKind::Planet)
            .with_radius(4.0)
            .with_orbit(1.0, 0.005)
            .with_color(0x6B93D6)
            .with_clouds(0.003);
        assert_eq!(desc.name, "earth");
        assert_eq!(desc.semi_major_axis_au, 1.0);
        assert_eq!(desc.cloud_rate, Some(0.003));
    }

    #[test]
    fn descriptor_round_trips_through_json() {
        let desc = BodyDescriptor::new("halley", BodyKind::Comet)
            .with_orbit(17.8, 0.0008)
            .with_eccentricity(0.967)
            .with_comet(CometDescriptor {
                tail_length: 8.0,
                tail_opacity: 0.6,
                nucleus_spin: 0.02,
                nucleus_tumble: 0.005,
                physics_tail: false,
            });
        let json = serde_json::to_string(&desc).unwrap();
        let back: BodyDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "halley");
        assert_eq!(back.eccentricity, 0.967);
        assert!(back.comet.is_some());
    }
}
