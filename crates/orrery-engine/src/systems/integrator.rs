//! Kinematic integrator. Advances every body's orbital angle and spin
//! once per tick and derives positions from closed-form orbit formulas.
//!
//! Orbits are circular or low-order conic sections with visual-scale
//! gain factors; legibility is the goal, not ephemeris accuracy.

use glam::Vec3;

use crate::api::types::BodyKind;
use crate::core::registry::BodyRegistry;

/// 1 AU in render units.
pub const DISTANCE_SCALE: f32 = 200.0;
/// Keeps planet inclination visible but subtle.
pub const PLANET_INCLINATION_GAIN: f32 = 0.05;
/// Dwarf planets ride well out of the ecliptic.
pub const DWARF_INCLINATION_GAIN: f32 = 0.3;
/// Comet height scales with instantaneous radius, not semi-major axis.
pub const COMET_INCLINATION_GAIN: f32 = 0.5;
/// Moon orbital radius multiplier relative to the parent planet.
pub const MOON_SCALE: f32 = 2.0;

/// Circular heliocentric orbit (planets).
pub fn circular_position(angle: f32, semi_major_axis_au: f32, inclination_deg: f32) -> Vec3 {
    let a = semi_major_axis_au * DISTANCE_SCALE;
    let incl = inclination_deg.to_radians();
    Vec3::new(
        angle.cos() * a,
        angle.sin() * incl.sin() * a * PLANET_INCLINATION_GAIN,
        angle.sin() * a,
    )
}

/// Conic-section radius. The angle is treated as the true anomaly even
/// though it advances uniformly, a deliberate visual trade-off.
pub fn conic_radius(angle: f32, semi_major_axis: f32, eccentricity: f32) -> f32 {
    semi_major_axis * (1.0 - eccentricity * eccentricity) / (1.0 + eccentricity * angle.cos())
}

/// Elliptical orbit for dwarf planets: height factor tied to the
/// semi-major axis.
pub fn dwarf_position(
    angle: f32,
    semi_major_axis_au: f32,
    eccentricity: f32,
    inclination_deg: f32,
) -> Vec3 {
    let a = semi_major_axis_au * DISTANCE_SCALE;
    let r = conic_radius(angle, a, eccentricity);
    let incl = inclination_deg.to_radians();
    Vec3::new(
        r * angle.cos(),
        angle.sin() * incl.sin() * a * DWARF_INCLINATION_GAIN,
        r * angle.sin(),
    )
}

/// Elliptical orbit for comets: height factor tied to the instantaneous
/// radius, so high-inclination comets dive steeply near perihelion.
pub fn comet_position(
    angle: f32,
    semi_major_axis_au: f32,
    eccentricity: f32,
    inclination_deg: f32,
) -> Vec3 {
    let a = semi_major_axis_au * DISTANCE_SCALE;
    let r = conic_radius(angle, a, eccentricity);
    let incl = inclination_deg.to_radians();
    Vec3::new(
        r * angle.cos(),
        angle.sin() * incl.sin() * r * COMET_INCLINATION_GAIN,
        r * angle.sin(),
    )
}

/// Advance every non-comet body by one tick of `dt_sim` simulation time.
/// Order: Sun (stationary, spin only) → planets → dwarf planets → moons.
/// Comets are advanced by the comet activity engine, which reuses
/// `comet_position`. Within a tier, registration order.
pub fn tick(registry: &mut BodyRegistry, dt_sim: f32) {
    for body in registry.iter_mut() {
        match body.kind {
            BodyKind::Star => {
                body.rotation.y += body.phase.rotation_rate * dt_sim;
            }
            BodyKind::Planet => {
                body.phase.angle += body.orbit.mean_motion * dt_sim;
                body.position = circular_position(
                    body.phase.angle,
                    body.orbit.semi_major_axis_au,
                    body.orbit.inclination_deg,
                );
                body.rotation.y += body.phase.rotation_rate * dt_sim;
                if let Some(clouds) = &mut body.clouds {
                    clouds.angle += clouds.rate * dt_sim;
                }
            }
            BodyKind::DwarfPlanet => {
                body.phase.angle += body.orbit.mean_motion * dt_sim;
                body.position = dwarf_position(
                    body.phase.angle,
                    body.orbit.semi_major_axis_au,
                    body.orbit.eccentricity,
                    body.orbit.inclination_deg,
                );
                body.rotation.y += body.phase.rotation_rate * dt_sim;
            }
            // Moons need their parent's fresh position; handled below.
            BodyKind::Moon | BodyKind::Comet => {}
        }
    }

    for index in registry.indices_of_kind(BodyKind::Moon) {
        let parent_pos = {
            let moon = registry.body_at_mut(index);
            moon.orbit.parent.and_then(|id| registry.position_of(id))
        };
        let Some(parent_pos) = parent_pos else { continue };
        let moon = registry.body_at_mut(index);
        moon.phase.angle += moon.orbit.mean_motion * dt_sim;
        let radius = moon.orbit.semi_major_axis_au * MOON_SCALE;
        moon.position = parent_pos
            + Vec3::new(
                moon.phase.angle.cos() * radius,
                0.0,
                moon.phase.angle.sin() * radius,
            );
        moon.rotation.y += moon.phase.rotation_rate * dt_sim;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyKind;
    use crate::bodies::body::BodyDescriptor;

    fn earth_registry() -> BodyRegistry {
        let mut reg = BodyRegistry::new();
        reg.register(BodyDescriptor::new("sun", BodyKind::Star).with_radius(20.0))
            .unwrap();
        reg.register(
            BodyDescriptor::new("earth", BodyKind::Planet)
                .with_radius(4.0)
                .with_orbit(1.0, 0.005),
        )
        .unwrap();
        reg
    }

    #[test]
    fn earth_starts_on_positive_x_axis() {
        let mut reg = earth_registry();
        tick(&mut reg, 0.0);
        let earth = reg.find_by_name("earth").unwrap();
        assert!((earth.position - Vec3::new(200.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn earth_after_thousand_ticks() {
        // 1000 ticks at timeSpeed 1 and meanMotion 0.005 → angle 5.0 rad.
        let mut reg = earth_registry();
        for _ in 0..1000 {
            tick(&mut reg, 1.0);
        }
        let earth = reg.find_by_name("earth").unwrap();
        assert!((earth.phase.angle - 5.0).abs() < 1e-3);
        let expected = Vec3::new(200.0 * 5.0f32.cos(), 0.0, 200.0 * 5.0f32.sin());
        assert!(
            (earth.position - expected).length() < 0.1,
            "got {:?}, want {:?}",
            earth.position,
            expected
        );
        // Sanity on the literal values: ≈ (56.7, 0, −191.8).
        assert!((earth.position.x - 56.7).abs() < 0.2);
        assert!((earth.position.z + 191.8).abs() < 0.2);
    }

    #[test]
    fn conic_radius_at_perihelion_and_aphelion() {
        // Halley-like: a = 17.845 AU, e = 0.967.
        let a = 17.845 * DISTANCE_SCALE;
        let peri = conic_radius(0.0, a, 0.967);
        let apo = conic_radius(std::f32::consts::PI, a, 0.967);
        assert!((peri - a * (1.0 - 0.967)).abs() < 0.5);
        assert!((apo - a * (1.0 + 0.967)).abs() < 0.5);
    }

    #[test]
    fn comet_y_is_zero_at_angle_zero() {
        let pos = comet_position(0.0, 17.845, 0.967, 162.3);
        assert!(pos.y.abs() < 1e-4);
    }

    #[test]
    fn moon_tracks_parent() {
        let mut reg = earth_registry();
        reg.register(
            BodyDescriptor::new("moon", BodyKind::Moon)
                .with_radius(1.0)
                .with_orbit(10.0, 0.02)
                .with_parent("earth"),
        )
        .unwrap();
        for _ in 0..100 {
            tick(&mut reg, 1.0);
        }
        let earth_pos = reg.find_by_name("earth").unwrap().position;
        let moon_pos = reg.find_by_name("moon").unwrap().position;
        let offset = moon_pos - earth_pos;
        assert!(
            (offset.length() - 10.0 * MOON_SCALE).abs() < 1e-3,
            "moon offset {}",
            offset.length()
        );
        assert!(offset.y.abs() < 1e-6, "moon stays in parent plane");
    }

    #[test]
    fn determinism_across_runs() {
        let run = || {
            let mut reg = earth_registry();
            for _ in 0..500 {
                tick(&mut reg, 1.5);
            }
            reg.find_by_name("earth").unwrap().position
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn registration_order_of_peers_does_not_matter() {
        let mut a = BodyRegistry::new();
        a.register(
            BodyDescriptor::new("mars", BodyKind::Planet)
                .with_radius(2.0)
                .with_orbit(1.52, 0.004),
        )
        .unwrap();
        a.register(
            BodyDescriptor::new("venus", BodyKind::Planet)
                .with_radius(3.8)
                .with_orbit(0.72, 0.006),
        )
        .unwrap();

        let mut b = BodyRegistry::new();
        b.register(
            BodyDescriptor::new("venus", BodyKind::Planet)
                .with_radius(3.8)
                .with_orbit(0.72, 0.006),
        )
        .unwrap();
        b.register(
            BodyDescriptor::new("mars", BodyKind::Planet)
                .with_radius(2.0)
                .with_orbit(1.52, 0.004),
        )
        .unwrap();

        for _ in 0..250 {
            tick(&mut a, 1.0);
            tick(&mut b, 1.0);
        }
        assert_eq!(
            a.find_by_name("mars").unwrap().position,
            b.find_by_name("mars").unwrap().position
        );
        assert_eq!(
            a.find_by_name("venus").unwrap().position,
            b.find_by_name("venus").unwrap().position
        );
    }
}
