pub mod controller;
pub mod focus;
pub mod zoom;

pub use controller::{CameraController, CameraState};
pub use focus::{zoom_band, FocusManager, ZoomBand};
pub use zoom::{ZoomController, ZOOM_MAX, ZOOM_MIN};
