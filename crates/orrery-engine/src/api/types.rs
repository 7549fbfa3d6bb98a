use serde::{Deserialize, Serialize};

/// Unique identifier for a body in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Classification of a body. Drives the orbit formula, tick ordering,
/// and the per-kind camera zoom bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
    Comet,
}

impl BodyKind {
    /// Stable numeric tag written into the render buffer protocol.
    pub fn as_index(self) -> u32 {
        match self {
            BodyKind::Star => 0,
            BodyKind::Planet => 1,
            BodyKind::DwarfPlanet => 2,
            BodyKind::Moon => 3,
            BodyKind::Comet => 4,
        }
    }
}

/// Errors raised while validating body descriptors at registration.
/// Everything past construction is recovered locally and never surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    DuplicateName(String),
    NonPositiveAxis(String),
    NonPositiveRadius(String),
    EccentricityOutOfRange(String),
    UnknownParent { body: String, parent: String },
    ParentNotPlanet { body: String, parent: String },
    MissingParent(String),
    Parse(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateName(name) => {
                write!(f, "body name {:?} is already registered", name)
            }
            CatalogError::NonPositiveAxis(name) => {
                write!(f, "body {:?} has a non-positive semi-major axis", name)
            }
            CatalogError::NonPositiveRadius(name) => {
                write!(f, "body {:?} has a non-positive display radius", name)
            }
            CatalogError::EccentricityOutOfRange(name) => {
                write!(f, "body {:?} has eccentricity outside [0, 1)", name)
            }
            CatalogError::UnknownParent { body, parent } => {
                write!(f, "moon {:?} names unknown parent {:?}", body, parent)
            }
            CatalogError::ParentNotPlanet { body, parent } => {
                write!(f, "moon {:?} parent {:?} is not a planet", body, parent)
            }
            CatalogError::MissingParent(name) => {
                write!(f, "moon {:?} has no parent", name)
            }
            CatalogError::Parse(msg) => write!(f, "catalog parse error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}
