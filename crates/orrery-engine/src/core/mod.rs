pub mod registry;
pub mod time;

pub use registry::BodyRegistry;
pub use time::SceneTime;
