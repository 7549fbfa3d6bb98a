pub mod instance;
pub mod particles;

pub use instance::{BodyBuffer, BodyInstance, CometBuffer, CometInstance};
pub use particles::{unpack_color, MaterialState, ParticleBuffer};
