pub mod queue;
pub mod state;

pub use queue::{decode_key, InputEvent, InputQueue, KeyIntent};
pub use state::InputState;
