use glam::Vec3;

use crate::api::types::{BodyId, BodyKind, CatalogError};
use crate::bodies::body::{Body, BodyDescriptor, CloudLayer, Orbit, Phase};
use crate::systems::comet::CometState;

/// Flat body storage. The registry exclusively owns every Body record;
/// slot index doubles as the render-buffer handle and is stable for the
/// process lifetime (bodies are never removed).
pub struct BodyRegistry {
    bodies: Vec<Body>,
    next_seed: u64,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(32),
            next_seed: 1,
        }
    }

    /// Validate a descriptor and add the body. Fails fatally (to the
    /// caller) on construction-time invariant violations; nothing past
    /// registration can fail.
    pub fn register(&mut self, desc: BodyDescriptor) -> Result<BodyId, CatalogError> {
        if self.find_by_name(&desc.name).is_some() {
            return Err(CatalogError::DuplicateName(desc.name));
        }
        if desc.display_radius <= 0.0 {
            return Err(CatalogError::NonPositiveRadius(desc.name));
        }
        if !(0.0..1.0).contains(&desc.eccentricity) {
            return Err(CatalogError::EccentricityOutOfRange(desc.name));
        }
        // The Sun sits at the origin with no orbit; everything else
        // needs a positive semi-major axis.
        if desc.kind != BodyKind::Star && desc.semi_major_axis_au <= 0.0 {
            return Err(CatalogError::NonPositiveAxis(desc.name));
        }

        let parent = match desc.kind {
            BodyKind::Moon => {
                let parent_name = desc
                    .parent
                    .as_deref()
                    .ok_or_else(|| CatalogError::MissingParent(desc.name.clone()))?;
                let parent = self.find_by_name(parent_name).ok_or_else(|| {
                    CatalogError::UnknownParent {
                        body: desc.name.clone(),
                        parent: parent_name.to_string(),
                    }
                })?;
                if parent.kind != BodyKind::Planet {
                    return Err(CatalogError::ParentNotPlanet {
                        body: desc.name.clone(),
                        parent: parent_name.to_string(),
                    });
                }
                Some(parent.id)
            }
            _ => None,
        };

        let id = BodyId(self.bodies.len() as u32);
        let comet = desc.comet.as_ref().map(|c| {
            let seed = self.next_seed;
            self.next_seed = self.next_seed.wrapping_add(0x9E37_79B9);
            CometState::new(c, desc.color, seed)
        });

        log::debug!("registered body {:?} ({:?})", desc.name, desc.kind);

        self.bodies.push(Body {
            id,
            name: desc.name,
            kind: desc.kind,
            display_radius: desc.display_radius,
            color: desc.color,
            orbit: Orbit {
                semi_major_axis_au: desc.semi_major_axis_au,
                eccentricity: desc.eccentricity,
                inclination_deg: desc.inclination_deg,
                mean_motion: desc.mean_motion,
                parent,
            },
            phase: Phase {
                angle: desc.initial_angle,
                rotation_rate: desc.rotation_rate,
            },
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            clouds: desc.cloud_rate.map(|rate| CloudLayer { rate, angle: 0.0 }),
            has_rings: desc.has_rings,
            comet,
        });
        Ok(id)
    }

    /// Register a whole catalog; the first invalid descriptor aborts.
    pub fn register_all(&mut self, catalog: Vec<BodyDescriptor>) -> Result<(), CatalogError> {
        for desc in catalog {
            self.register(desc)?;
        }
        Ok(())
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0 as usize)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn position_of(&self, id: BodyId) -> Option<Vec3> {
        self.get(id).map(|b| b.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    /// Bodies of one kind, in registration order.
    pub fn iter_kind(&self, kind: BodyKind) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |b| b.kind == kind)
    }

    /// Indices of one kind, for loops that need disjoint borrows
    /// (moons read their parent's position while being mutated).
    pub fn indices_of_kind(&self, kind: BodyKind) -> Vec<usize> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind == kind)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn body_at_mut(&mut self, index: usize) -> &mut Body {
        &mut self.bodies[index]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
