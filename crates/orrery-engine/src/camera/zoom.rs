use crate::camera::controller::CameraController;
use crate::camera::focus::{zoom_band, FocusManager};
use crate::core::registry::BodyRegistry;
use crate::extensions::easing::lerp_vec3;

/// UI slider range, shared by both directions of the sync.
pub const ZOOM_MIN: f32 = 10.0;
pub const ZOOM_MAX: f32 = 2000.0;

/// Wheel deltas accumulate until this much quiet time passes.
const WHEEL_QUIET: f64 = 0.05;
/// Accumulated deltas below this magnitude are ignored.
const WHEEL_MIN_DELTA: f32 = 10.0;

/// Free-flight radial distance limits.
const FREE_MIN: f32 = 500.0;
const FREE_MAX: f32 = 50_000.0;

/// Keeps the UI slider and the camera distance consistent in both
/// directions and applies debounced wheel zoom.
#[derive(Debug)]
pub struct ZoomController {
    pending_delta: f32,
    quiet_until: Option<f64>,
    /// Last value pushed to the slider; the echo of that value coming
    /// back through `set_zoom_from_slider` is suppressed.
    suppress_value: Option<f32>,
    pub slider: f32,
}

impl ZoomController {
    pub fn new() -> Self {
        Self {
            pending_delta: 0.0,
            quiet_until: None,
            suppress_value: None,
            slider: ZOOM_MAX,
        }
    }

    /// Accumulate a wheel delta and restart the quiet period.
    pub fn on_wheel(&mut self, delta_y: f32, now: f64) {
        self.pending_delta += delta_y;
        self.quiet_until = Some(now + WHEEL_QUIET);
    }

    pub fn wheel_pending(&self) -> bool {
        self.quiet_until.is_some()
    }

    /// Apply the accumulated wheel delta once the quiet period elapses.
    /// Called at the top of the frame, before anything reads the focus
    /// target distance.
    pub fn tick(
        &mut self,
        now: f64,
        focus: &mut FocusManager,
        camera: &mut CameraController,
        registry: &BodyRegistry,
    ) {
        let Some(deadline) = self.quiet_until else {
            return;
        };
        if now < deadline {
            return;
        }
        self.quiet_until = None;
        let delta = std::mem::take(&mut self.pending_delta);
        if delta.abs() < WHEEL_MIN_DELTA {
            return;
        }
        self.apply_wheel(delta, focus, camera, registry);
    }

    fn apply_wheel(
        &mut self,
        delta: f32,
        focus: &mut FocusManager,
        camera: &mut CameraController,
        registry: &BodyRegistry,
    ) {
        if let Some(body) = focus.target().and_then(|id| registry.get(id)) {
            let band = zoom_band(body.kind, &body.name);
            let factor = if delta > 0.0 { 1.15 } else { 0.85 };
            let current = camera.focus_offset.length();
            let mut new = (current * factor).clamp(band.min, band.max);
            // Too close clips into the body; snap out to the optimum.
            if new < 1.5 * band.min {
                new = band.optimal;
            }
            focus.target_distance = Some(new);
            let dir = if current > f32::EPSILON {
                camera.focus_offset / current
            } else {
                crate::camera::controller::degenerate_direction()
            };
            camera.focus_offset = lerp_vec3(camera.focus_offset, dir * new, 0.05);
        } else {
            let factor = if delta > 0.0 { 1.2 } else { 0.8 };
            let current = camera.radial_distance();
            let new = (current * factor).clamp(FREE_MIN, FREE_MAX);
            let target = camera.state.position.normalize_or_zero() * new;
            camera.state.position = lerp_vec3(camera.state.position, target, 0.1);
        }
    }

    /// Slider moved by the user. The echo of our own sync write is
    /// dropped to prevent a feedback loop.
    pub fn set_zoom_from_slider(
        &mut self,
        value: f32,
        focus: &mut FocusManager,
        camera: &mut CameraController,
    ) {
        if self.suppress_value.take() == Some(value) {
            return;
        }
        let value = value.clamp(ZOOM_MIN, ZOOM_MAX);
        self.slider = value;
        if focus.focused() {
            focus.target_distance = Some(value);
            let dir = if camera.focus_offset.length_squared() > f32::EPSILON {
                camera.focus_offset.normalize()
            } else {
                crate::camera::controller::degenerate_direction()
            };
            camera.focus_offset = dir * value;
        } else {
            camera.set_radial_distance(value);
        }
    }

    /// Push the current camera distance back to the slider. Returns the
    /// clamped value for the host to display.
    pub fn sync_slider_from_camera(
        &mut self,
        focus: &FocusManager,
        camera: &CameraController,
    ) -> f32 {
        let distance = if focus.focused() {
            camera.focus_offset.length()
        } else {
            camera.radial_distance()
        };
        let value = distance.clamp(ZOOM_MIN, ZOOM_MAX);
        self.slider = value;
        self.suppress_value = Some(value);
        value
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new()
    }
}
