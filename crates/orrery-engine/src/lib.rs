pub mod api;
pub mod bodies;
pub mod camera;
pub mod core;
pub mod extensions;
pub mod input;
pub mod render;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::types::{BodyId, BodyKind, CatalogError};
pub use api::world::{FocusedInfo, World, WorldConfig};
pub use bodies::body::{Body, BodyDescriptor, CometDescriptor, Orbit, Phase};
pub use bodies::catalog::{catalog_from_json, default_catalog};
pub use camera::controller::{CameraController, CameraState};
pub use camera::focus::{zoom_band, FocusManager, ZoomBand};
pub use camera::zoom::{ZoomController, ZOOM_MAX, ZOOM_MIN};
pub use core::registry::BodyRegistry;
pub use core::time::SceneTime;
pub use input::queue::{decode_key, InputEvent, InputQueue, KeyIntent};
pub use input::state::InputState;
pub use render::instance::{BodyBuffer, BodyInstance, CometBuffer, CometInstance};
pub use render::particles::{MaterialState, ParticleBuffer};
pub use systems::comet::CometState;
pub use systems::integrator::{DISTANCE_SCALE, MOON_SCALE};
pub use systems::rng::Rng;

// Extensions — decoupled helpers
pub use extensions::{ease, lerp, lerp_vec3, Easing, ExpiringFlag};
