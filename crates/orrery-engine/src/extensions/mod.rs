pub mod easing;
pub mod flag;

pub use easing::{ease, lerp, lerp_vec3, Easing};
pub use flag::ExpiringFlag;
