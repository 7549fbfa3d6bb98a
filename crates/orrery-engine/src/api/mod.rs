pub mod types;
pub mod world;

pub use types::{BodyId, BodyKind, CatalogError};
pub use world::{FocusedInfo, World, WorldConfig};
