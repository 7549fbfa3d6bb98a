//! Default solar-system data: visualization-scale orbital parameters
//! and visual properties. Proportions are exaggerated for readability
//! (real planets would be sub-pixel at this distance scale).

use crate::api::types::{BodyKind, CatalogError};
use crate::bodies::body::{BodyDescriptor, CometDescriptor};

/// Planet size scaling for visibility (Earth radii to render units).
pub const SIZE_SCALE: f32 = 4.0;

/// Default axial spin in radians per simulation tick.
const SPIN_RATE: f32 = 0.005;
/// Earth cloud-layer spin, slightly slower than the surface.
const CLOUD_RATE: f32 = 0.003;

struct PlanetRow {
    name: &'static str,
    size: f32,
    distance_au: f32,
    speed: f32,
    color: u32,
    inclination_deg: f32,
}

const PLANETS: [PlanetRow; 8] = [
    PlanetRow { name: "mercury", size: 0.38, distance_au: 0.39, speed: 0.008,  color: 0x8C7853, inclination_deg: 7.0 },
    PlanetRow { name: "venus",   size: 0.95, distance_au: 0.72, speed: 0.006,  color: 0xFFC649, inclination_deg: 3.4 },
    PlanetRow { name: "earth",   size: 1.0,  distance_au: 1.0,  speed: 0.005,  color: 0x6B93D6, inclination_deg: 0.0 },
    PlanetRow { name: "mars",    size: 0.53, distance_au: 1.52, speed: 0.004,  color: 0xCD5C5C, inclination_deg: 1.9 },
    PlanetRow { name: "jupiter", size: 11.0, distance_au: 5.2,  speed: 0.002,  color: 0xD8CA9D, inclination_deg: 1.3 },
    PlanetRow { name: "saturn",  size: 9.0,  distance_au: 9.5,  speed: 0.0015, color: 0xFAD5A5, inclination_deg: 2.5 },
    PlanetRow { name: "uranus",  size: 4.0,  distance_au: 19.2, speed: 0.001,  color: 0x4FD0E7, inclination_deg: 0.8 },
    PlanetRow { name: "neptune", size: 3.9,  distance_au: 30.1, speed: 0.0008, color: 0x4B70DD, inclination_deg: 1.8 },
];

struct DwarfRow {
    name: &'static str,
    size: f32,
    distance_au: f32,
    speed: f32,
    color: u32,
    inclination_deg: f32,
    eccentricity: f32,
}

const DWARFS: [DwarfRow; 9] = [
    DwarfRow { name: "ceres",    size: 0.07, distance_au: 2.8,  speed: 0.003,  color: 0x8C7853, inclination_deg: 10.6, eccentricity: 0.076 },
    DwarfRow { name: "pluto",    size: 0.18, distance_au: 39.5, speed: 0.0006, color: 0xD4A574, inclination_deg: 17.2, eccentricity: 0.244 },
    DwarfRow { name: "eris",     size: 0.19, distance_au: 67.7, speed: 0.0005, color: 0xCCCCCC, inclination_deg: 44.2, eccentricity: 0.436 },
    DwarfRow { name: "haumea",   size: 0.15, distance_au: 43.3, speed: 0.0006, color: 0xFFFFFF, inclination_deg: 28.2, eccentricity: 0.189 },
    DwarfRow { name: "makemake", size: 0.11, distance_au: 45.8, speed: 0.0005, color: 0xD4A574, inclination_deg: 29.0, eccentricity: 0.159 },
    DwarfRow { name: "sedna",    size: 0.08, distance_au: 76.0, speed: 0.0003, color: 0x8B4513, inclination_deg: 11.9, eccentricity: 0.855 },
    DwarfRow { name: "quaoar",   size: 0.09, distance_au: 43.7, speed: 0.0006, color: 0x654321, inclination_deg: 8.0,  eccentricity: 0.037 },
    DwarfRow { name: "orcus",    size: 0.07, distance_au: 39.4, speed: 0.0006, color: 0x444444, inclination_deg: 20.6, eccentricity: 0.226 },
    DwarfRow { name: "gonggong", size: 0.10, distance_au: 67.3, speed: 0.0005, color: 0x8B0000, inclination_deg: 30.8, eccentricity: 0.500 },
];

struct CometRow {
    name: &'static str,
    size: f32,
    perihelion_au: f32,
    aphelion_au: f32,
    eccentricity: f32,
    inclination_deg: f32,
    speed: f32,
    color: u32,
    tail_length: f32,
    tail_opacity: f32,
    nucleus_spin: f32,
    nucleus_tumble: f32,
}

const COMETS: [CometRow; 6] = [
    CometRow { name: "halley",    size: 0.02,  perihelion_au: 0.59, aphelion_au: 35.1,    eccentricity: 0.967,  inclination_deg: 162.3, speed: 0.0008,  color: 0xCCCCFF, tail_length: 8.0,  tail_opacity: 0.6, nucleus_spin: 0.02,  nucleus_tumble: 0.005 },
    CometRow { name: "hale-bopp", size: 0.03,  perihelion_au: 0.91, aphelion_au: 370.0,   eccentricity: 0.995,  inclination_deg: 89.4,  speed: 0.0003,  color: 0xFFCCCC, tail_length: 12.0, tail_opacity: 0.7, nucleus_spin: 0.015, nucleus_tumble: 0.003 },
    CometRow { name: "hyakutake", size: 0.022, perihelion_au: 0.23, aphelion_au: 3410.0,  eccentricity: 0.9998, inclination_deg: 124.9, speed: 0.0002,  color: 0xCCFFFF, tail_length: 15.0, tail_opacity: 0.8, nucleus_spin: 0.012, nucleus_tumble: 0.002 },
    CometRow { name: "encke",     size: 0.018, perihelion_au: 0.34, aphelion_au: 4.1,     eccentricity: 0.850,  inclination_deg: 11.8,  speed: 0.0012,  color: 0xCCEEDD, tail_length: 5.0,  tail_opacity: 0.5, nucleus_spin: 0.018, nucleus_tumble: 0.004 },
    CometRow { name: "neowise",   size: 0.020, perihelion_au: 0.29, aphelion_au: 715.0,   eccentricity: 0.9992, inclination_deg: 128.9, speed: 0.0002,  color: 0xFFEECC, tail_length: 10.0, tail_opacity: 0.7, nucleus_spin: 0.014, nucleus_tumble: 0.003 },
    CometRow { name: "bernstein", size: 0.15,  perihelion_au: 10.9, aphelion_au: 40000.0, eccentricity: 0.999,  inclination_deg: 95.0,  speed: 0.00005, color: 0xBBBBFF, tail_length: 6.0,  tail_opacity: 0.4, nucleus_spin: 0.006, nucleus_tumble: 0.001 },
];

/// Descriptors for the full default scene, in registration order:
/// Sun, planets, dwarf planets, Earth's moon, comets. Registering in
/// this order satisfies the moon parent-resolution requirement.
pub fn default_catalog() -> Vec<BodyDescriptor> {
    let mut catalog = Vec::with_capacity(2 + PLANETS.len() + DWARFS.len() + COMETS.len());

    catalog.push(
        BodyDescriptor::new("sun", BodyKind::Star)
            .with_radius(5.0 * SIZE_SCALE)
            .with_color(0xFDB813)
            .with_rotation_rate(0.001),
    );

    for row in &PLANETS {
        let mut desc = BodyDescriptor::new(row.name, BodyKind::Planet)
            .with_radius(row.size * SIZE_SCALE)
            .with_orbit(row.distance_au, row.speed)
            .with_inclination(row.inclination_deg)
            .with_rotation_rate(SPIN_RATE)
            .with_color(row.color);
        if row.name == "earth" {
            desc = desc.with_clouds(CLOUD_RATE);
        }
        if row.name == "saturn" {
            desc = desc.with_rings();
        }
        catalog.push(desc);
    }

    for row in &DWARFS {
        catalog.push(
            BodyDescriptor::new(row.name, BodyKind::DwarfPlanet)
                .with_radius(row.size * SIZE_SCALE)
                .with_orbit(row.distance_au, row.speed)
                .with_eccentricity(row.eccentricity)
                .with_inclination(row.inclination_deg)
                .with_rotation_rate(SPIN_RATE)
                .with_color(row.color),
        );
    }

    // Moon distance is in raw offset units, not AU; the integrator
    // multiplies it by MOON_SCALE relative to the parent.
    catalog.push(
        BodyDescriptor::new("moon", BodyKind::Moon)
            .with_radius(0.27 * SIZE_SCALE)
            .with_orbit(10.0, 0.02)
            .with_rotation_rate(SPIN_RATE)
            .with_color(0x969696)
            .with_parent("earth"),
    );

    for row in &COMETS {
        catalog.push(
            BodyDescriptor::new(row.name, BodyKind::Comet)
                .with_radius(row.size * SIZE_SCALE)
                .with_orbit((row.perihelion_au + row.aphelion_au) / 2.0, row.speed)
                .with_eccentricity(row.eccentricity)
                .with_inclination(row.inclination_deg)
                .with_color(row.color)
                .with_comet(CometDescriptor {
                    tail_length: row.tail_length,
                    tail_opacity: row.tail_opacity,
                    nucleus_spin: row.nucleus_spin,
                    nucleus_tumble: row.nucleus_tumble,
                    physics_tail: false,
                }),
        );
    }

    catalog
}

/// Parse a user-supplied catalog (a JSON array of descriptors).
pub fn catalog_from_json(json: &str) -> Result<Vec<BodyDescriptor>, CatalogError> {
    serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_counts() {
        let catalog = default_catalog();
        let count = |kind: BodyKind| catalog.iter().filter(|d| d.kind == kind).count();
        assert_eq!(count(BodyKind::Star), 1);
        assert_eq!(count(BodyKind::Planet), 8);
        assert_eq!(count(BodyKind::DwarfPlanet), 9);
        assert_eq!(count(BodyKind::Moon), 1);
        assert_eq!(count(BodyKind::Comet), 6);
    }

    #[test]
    fn moon_parent_registered_before_moon() {
        let catalog = default_catalog();
        let earth = catalog.iter().position(|d| d.name == "earth").unwrap();
        let moon = catalog.iter().position(|d| d.name == "moon").unwrap();
        assert!(earth < moon);
    }

    #[test]
    fn comet_eccentricities_below_one() {
        for desc in default_catalog() {
            assert!(desc.eccentricity < 1.0, "{} has e >= 1", desc.name);
        }
    }

    #[test]
    fn halley_semi_major_axis() {
        let catalog = default_catalog();
        let halley = catalog.iter().find(|d| d.name == "halley").unwrap();
        assert!((halley.semi_major_axis_au - 17.845).abs() < 1e-3);
    }

    #[test]
    fn json_catalog_round_trip() {
        let catalog = default_catalog();
        let json = serde_json::to_string(&catalog).unwrap();
        let back = catalog_from_json(&json).unwrap();
        assert_eq!(back.len(), catalog.len());
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let err = catalog_from_json("not json").unwrap_err();
        assert!(matches!(err, crate::api::types::CatalogError::Parse(_)));
    }
}
