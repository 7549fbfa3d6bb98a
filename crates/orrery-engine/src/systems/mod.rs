pub mod comet;
pub mod integrator;
pub mod rng;

pub use comet::CometState;
pub use rng::Rng;
