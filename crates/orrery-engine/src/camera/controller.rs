use std::f32::consts::PI;

use glam::Vec3;

use crate::input::InputState;

/// Polar-angle clamp for orbit drags, keeps the camera off the poles.
pub const PHI_MIN: f32 = 0.1;
/// Radians of orbit per pixel of drag.
const DRAG_SPEED: f32 = 0.005;

/// Default free-flight pose, also restored by `clear_focus`.
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 500.0, 1000.0);

/// Fallback direction when the camera sits exactly on its target.
pub fn degenerate_direction() -> Vec3 {
    Vec3::new(1.0, 0.5, 1.0).normalize()
}

/// Camera pose plus projection parameters. The projection fields are
/// passed through to the renderer; the simulation only writes `aspect`.
#[derive(Debug, Clone, Copy)]
pub struct CameraState {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            look_at: Vec3::ZERO,
            fov_deg: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100_000.0,
        }
    }
}

impl CameraState {
    /// Unit look direction, falling back to -Z when degenerate.
    pub fn forward(&self) -> Vec3 {
        let dir = self.look_at - self.position;
        if dir.length_squared() > f32::EPSILON {
            dir.normalize()
        } else {
            Vec3::NEG_Z
        }
    }
}

/// Rotate `offset` around its center through spherical coordinates,
/// clamping the polar angle away from the poles.
fn orbit(offset: Vec3, drag_dx: f32, drag_dy: f32) -> Vec3 {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return offset;
    }
    let mut theta = offset.x.atan2(offset.z);
    let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
    theta -= drag_dx * DRAG_SPEED;
    phi = (phi - drag_dy * DRAG_SPEED).clamp(PHI_MIN, PI - PHI_MIN);
    Vec3::new(
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
        radius * phi.sin() * theta.cos(),
    )
}

/// Translates held-key and drag input into camera pose changes.
/// In free mode it moves the world-space pose; in focused mode it moves
/// the stored offset from the target, which the frame loop re-anchors
/// every tick.
#[derive(Debug)]
pub struct CameraController {
    pub state: CameraState,
    /// World units per frame at the 60 Hz reference cadence.
    pub movement_speed: f32,
    /// Camera position relative to the focused body.
    pub focus_offset: Vec3,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            state: CameraState::default(),
            movement_speed: 10.0,
            focus_offset: Vec3::ZERO,
        }
    }

    pub fn set_movement_speed(&mut self, speed: f32) {
        self.movement_speed = speed.max(0.0);
    }

    /// Key translation for this frame in the camera basis.
    fn translation(&self, input: &InputState, dt_real: f32) -> Vec3 {
        if !input.translating() {
            return Vec3::ZERO;
        }
        let forward = self.state.forward();
        let right = {
            let r = forward.cross(Vec3::Y);
            if r.length_squared() > f32::EPSILON {
                r.normalize()
            } else {
                Vec3::X
            }
        };
        let boost = if input.boost { 2.0 } else { 1.0 };
        let speed = self.movement_speed * boost * dt_real * 60.0;

        let mut delta = Vec3::ZERO;
        if input.forward {
            delta += forward;
        }
        if input.backward {
            delta -= forward;
        }
        if input.right {
            delta += right;
        }
        if input.left {
            delta -= right;
        }
        if input.up {
            delta += Vec3::Y;
        }
        if input.down {
            delta -= Vec3::Y;
        }
        delta * speed
    }

    /// Apply this frame's translation and drag intents. Runs before
    /// auto-centering so user input wins against the same-frame recenter.
    pub fn apply_intent(&mut self, input: &InputState, dt_real: f32, focused: bool) {
        let delta = self.translation(input, dt_real);
        if focused {
            self.focus_offset += delta;
            if input.dragging() {
                self.focus_offset = orbit(self.focus_offset, input.drag_dx, input.drag_dy);
            }
        } else {
            self.state.position += delta;
            self.state.look_at += delta;
            if input.dragging() {
                self.state.position = orbit(self.state.position, input.drag_dx, input.drag_dy);
                self.state.look_at = Vec3::ZERO;
            }
        }
    }

    /// Record the current offset from a newly focused target.
    pub fn capture_offset(&mut self, target: Vec3) {
        let offset = self.state.position - target;
        self.focus_offset = if offset.length_squared() > f32::EPSILON {
            offset
        } else {
            degenerate_direction() * 100.0
        };
    }

    /// Rigidly follow the focused body: re-anchor to its fresh position
    /// and keep looking at it.
    pub fn anchor_to(&mut self, target: Vec3) {
        self.state.position = target + self.focus_offset;
        self.state.look_at = target;
    }

    pub fn restore_default_pose(&mut self) {
        self.state.position = DEFAULT_POSITION;
        self.state.look_at = Vec3::ZERO;
        self.focus_offset = Vec3::ZERO;
    }

    /// Radial distance from the world origin, used by free-mode zoom.
    pub fn radial_distance(&self) -> f32 {
        self.state.position.length()
    }

    /// Rescale the free-camera position to the given distance from the
    /// origin without changing its direction.
    pub fn set_radial_distance(&mut self, distance: f32) {
        let dir = if self.state.position.length_squared() > f32::EPSILON {
            self.state.position.normalize()
        } else {
            degenerate_direction()
        };
        self.state.position = dir * distance;
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.state.aspect = width / height;
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, KeyIntent};

    fn held(intent: KeyIntent) -> InputState {
        let mut input = InputState::default();
        input.apply(InputEvent::Key { intent, down: true });
        input
    }

    #[test]
    fn forward_key_moves_along_look_direction() {
        let mut cam = CameraController::new();
        cam.state.position = Vec3::new(0.0, 0.0, 1000.0);
        cam.state.look_at = Vec3::ZERO;
        let before = cam.state.position;
        cam.apply_intent(&held(KeyIntent::Forward), 1.0 / 60.0, false);
        let moved = cam.state.position - before;
        assert!(moved.z < 0.0, "moved toward look target");
        assert!((moved.length() - cam.movement_speed).abs() < 1e-3);
    }

    #[test]
    fn boost_doubles_speed() {
        let mut cam = CameraController::new();
        let mut input = held(KeyIntent::Forward);
        input.apply(InputEvent::Key {
            intent: KeyIntent::Boost,
            down: true,
        });
        let before = cam.state.position;
        cam.apply_intent(&input, 1.0 / 60.0, false);
        let dist = (cam.state.position - before).length();
        assert!((dist - cam.movement_speed * 2.0).abs() < 1e-3);
    }

    #[test]
    fn focused_translation_moves_offset_not_position() {
        let mut cam = CameraController::new();
        cam.focus_offset = Vec3::new(0.0, 0.0, 40.0);
        let position_before = cam.state.position;
        cam.apply_intent(&held(KeyIntent::Up), 1.0 / 60.0, true);
        assert_eq!(cam.state.position, position_before);
        assert!(cam.focus_offset.y > 0.0);
    }

    #[test]
    fn drag_preserves_radius_and_clamps_phi() {
        let offset = Vec3::new(0.0, 10.0, 100.0);
        let radius = offset.length();
        // Drag hard upward: phi hits the clamp, never flips over the pole.
        let turned = orbit(offset, 0.0, 10_000.0);
        assert!((turned.length() - radius).abs() < 1e-2);
        let phi = (turned.y / turned.length()).acos();
        assert!(phi >= PHI_MIN - 1e-4 && phi <= PI - PHI_MIN + 1e-4);
    }

    #[test]
    fn anchor_follows_target() {
        let mut cam = CameraController::new();
        cam.state.position = Vec3::new(240.0, 0.0, 0.0);
        cam.capture_offset(Vec3::new(200.0, 0.0, 0.0));
        assert_eq!(cam.focus_offset, Vec3::new(40.0, 0.0, 0.0));
        cam.anchor_to(Vec3::new(0.0, 0.0, 200.0));
        assert_eq!(cam.state.position, Vec3::new(40.0, 0.0, 200.0));
        assert_eq!(cam.state.look_at, Vec3::new(0.0, 0.0, 200.0));
    }

    #[test]
    fn degenerate_offset_substituted() {
        let mut cam = CameraController::new();
        cam.state.position = Vec3::new(200.0, 0.0, 0.0);
        cam.capture_offset(Vec3::new(200.0, 0.0, 0.0));
        assert!(cam.focus_offset.length() > 1.0);
        let dir = cam.focus_offset.normalize();
        assert!((dir - degenerate_direction()).length() < 1e-6);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = CameraController::new();
        cam.on_resize(1920.0, 1080.0);
        assert!((cam.state.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.on_resize(100.0, 0.0);
        assert!((cam.state.aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
