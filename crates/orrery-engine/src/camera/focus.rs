use glam::Vec3;

use crate::api::types::{BodyId, BodyKind};
use crate::camera::controller::{degenerate_direction, CameraController};
use crate::core::registry::BodyRegistry;
use crate::extensions::easing::{ease, lerp_vec3, Easing};
use crate::extensions::flag::ExpiringFlag;
use crate::input::InputState;

/// Manual override window after any user camera input.
pub const OVERRIDE_TTL: f64 = 5.0;
/// Extended window for the explicit hold-camera intent.
pub const OVERRIDE_PINNED_TTL: f64 = 10.0;
/// Delay between focus acquisition and the distance ease-in.
const SETTLE_DELAY: f64 = 0.2;
/// Duration of the distance ease-in.
const SETTLE_WINDOW: f64 = 0.5;
/// Auto-center engages only when the camera drifts this far past the
/// desired distance, so a user zoomed in close is never pulled back out.
const AUTO_CENTER_GATE: f32 = 1.2;

/// Preferred viewing distances for one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBand {
    pub min: f32,
    pub close: f32,
    pub optimal: f32,
    pub far: f32,
    pub max: f32,
}

const fn band(min: f32, close: f32, optimal: f32, far: f32, max: f32) -> ZoomBand {
    ZoomBand {
        min,
        close,
        optimal,
        far,
        max,
    }
}

/// Viewing-distance table. Gas and ice giants get wider bands than the
/// small planets; Earth's moon shares the dwarf-planet band.
pub fn zoom_band(kind: BodyKind, name: &str) -> ZoomBand {
    match kind {
        BodyKind::Star => band(50.0, 100.0, 200.0, 800.0, 2000.0),
        BodyKind::Planet => match name {
            "jupiter" | "saturn" => band(25.0, 40.0, 80.0, 400.0, 800.0),
            "uranus" | "neptune" => band(20.0, 30.0, 60.0, 300.0, 600.0),
            _ => band(15.0, 20.0, 40.0, 200.0, 400.0),
        },
        BodyKind::DwarfPlanet | BodyKind::Moon => band(10.0, 15.0, 30.0, 150.0, 300.0),
        BodyKind::Comet => band(8.0, 10.0, 20.0, 100.0, 200.0),
    }
}

/// Distance-banded lerp factor for the auto-center ease: far away the
/// pull is gentle, close in it firms up.
fn center_lerp_factor(distance: f32) -> f32 {
    if distance > 10_000.0 {
        0.003
    } else if distance > 1_000.0 {
        0.008
    } else if distance > 100.0 {
        0.02
    } else {
        0.05
    }
}

/// Post-focus ease-in as an explicit state machine advanced by the
/// frame loop, deterministic under frame-rate variation.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SettleEase {
    Idle,
    Delay { until: f64 },
    Settling { t0: f64, from: f32, to: f32 },
}

/// Owns the focus target, the desired radial distance, and the
/// auto-centering policy.
#[derive(Debug)]
pub struct FocusManager {
    target: Option<BodyId>,
    pub target_distance: Option<f32>,
    pub manual_override: ExpiringFlag,
    settle: SettleEase,
}

impl FocusManager {
    pub fn new() -> Self {
        Self {
            target: None,
            target_distance: None,
            manual_override: ExpiringFlag::new(),
            settle: SettleEase::Idle,
        }
    }

    pub fn target(&self) -> Option<BodyId> {
        self.target
    }

    pub fn focused(&self) -> bool {
        self.target.is_some()
    }

    /// The settle ease is in flight; auto-center stands down.
    pub fn is_zooming(&self) -> bool {
        self.settle != SettleEase::Idle
    }

    /// Focus a body by id. Refocusing the current target clears focus
    /// (toggle); an id not in the registry clears focus too.
    pub fn set_focus(
        &mut self,
        id: Option<BodyId>,
        registry: &BodyRegistry,
        camera: &mut CameraController,
        now: f64,
    ) {
        let Some(id) = id else {
            self.clear_focus(camera);
            return;
        };
        if self.target == Some(id) {
            self.clear_focus(camera);
            return;
        }
        let Some(body) = registry.get(id) else {
            log::debug!("focus requested for unknown body {:?}, clearing", id);
            self.clear_focus(camera);
            return;
        };

        log::info!("focus -> {}", body.name);
        self.target = Some(id);
        self.target_distance = None;
        self.manual_override.clear();
        // New focus during a pending settle supersedes it.
        self.settle = SettleEase::Delay {
            until: now + SETTLE_DELAY,
        };
        camera.capture_offset(body.position);
    }

    pub fn clear_focus(&mut self, camera: &mut CameraController) {
        self.target = None;
        self.target_distance = None;
        self.settle = SettleEase::Idle;
        camera.restore_default_pose();
    }

    /// Per-frame focus pass: arm the manual override from input, drive
    /// the settle ease, auto-center when allowed, run the health check,
    /// and re-anchor the camera to the target's fresh position.
    /// Runs after the integrator so the target position is current.
    pub fn tick(
        &mut self,
        now: f64,
        registry: &BodyRegistry,
        camera: &mut CameraController,
        input: &InputState,
    ) {
        if input.hold_camera {
            self.manual_override.set_for(now, OVERRIDE_PINNED_TTL);
        } else if input.translating() || input.dragging() {
            self.manual_override.set_for(now, OVERRIDE_TTL);
        }
        if input.release_camera {
            self.manual_override.clear();
        }

        let Some(id) = self.target else { return };
        let Some(body) = registry.get(id) else {
            self.clear_focus(camera);
            return;
        };
        let band = zoom_band(body.kind, &body.name);
        let target_pos = body.position;

        self.advance_settle(now, band, camera);

        // Both the center pull and the band check stand down while the
        // settle ease is still flying the camera in.
        if !self.is_zooming() {
            if !self.manual_override.get(now) {
                self.auto_center(band, camera, input);
            }
            self.health_check(band, camera);
        }

        camera.anchor_to(target_pos);
    }

    fn offset_direction(camera: &CameraController) -> Vec3 {
        if camera.focus_offset.length_squared() > f32::EPSILON {
            camera.focus_offset.normalize()
        } else {
            degenerate_direction()
        }
    }

    fn advance_settle(&mut self, now: f64, band: ZoomBand, camera: &mut CameraController) {
        match self.settle {
            SettleEase::Idle => {}
            SettleEase::Delay { until } => {
                if now >= until {
                    self.settle = SettleEase::Settling {
                        t0: now,
                        from: camera.focus_offset.length(),
                        to: band.optimal,
                    };
                }
            }
            SettleEase::Settling { t0, from, to } => {
                let t = ((now - t0) / SETTLE_WINDOW) as f32;
                let dir = Self::offset_direction(camera);
                if t >= 1.0 {
                    camera.focus_offset = dir * to;
                    self.target_distance = Some(to);
                    self.settle = SettleEase::Idle;
                } else {
                    camera.focus_offset = dir * ease(from, to, t, Easing::QuadOut);
                }
            }
        }
    }

    fn auto_center(&mut self, band: ZoomBand, camera: &mut CameraController, input: &InputState) {
        if input.translating() || input.dragging() {
            return;
        }
        let desired = *self.target_distance.get_or_insert(band.optimal);
        let current = camera.focus_offset.length();
        if current > AUTO_CENTER_GATE * desired {
            let dir = Self::offset_direction(camera);
            let factor = center_lerp_factor(current);
            camera.focus_offset = lerp_vec3(camera.focus_offset, dir * desired, factor);
        }
    }

    /// Snap back inside the per-kind distance band if something (a
    /// missed event, an extreme zoom) left the camera outside it.
    fn health_check(&mut self, band: ZoomBand, camera: &mut CameraController) {
        let current = camera.focus_offset.length();
        if current < band.min || current > band.max {
            log::debug!(
                "camera distance {:.1} outside [{}, {}], snapping to optimal",
                current,
                band.min,
                band.max
            );
            self.target_distance = Some(band.optimal);
            camera.focus_offset = Self::offset_direction(camera) * band.optimal;
        }
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::body::BodyDescriptor;

    fn registry() -> BodyRegistry {
        let mut reg = BodyRegistry::new();
        reg.register(
            BodyDescriptor::new("earth", BodyKind::Planet)
                .with_radius(4.0)
                .with_orbit(1.0, 0.005),
        )
        .unwrap();
        let earth = reg.get_mut(BodyId(0)).unwrap();
        earth.position = Vec3::new(200.0, 0.0, 0.0);
        reg
    }

    fn run_ticks(
        focus: &mut FocusManager,
        reg: &BodyRegistry,
        cam: &mut CameraController,
        start: f64,
        frames: usize,
    ) -> f64 {
        let input = InputState::default();
        let mut now = start;
        for _ in 0..frames {
            now += 1.0 / 60.0;
            focus.tick(now, reg, cam, &input);
        }
        now
    }

    #[test]
    fn band_table() {
        assert_eq!(zoom_band(BodyKind::Star, "sun").optimal, 200.0);
        assert_eq!(zoom_band(BodyKind::Planet, "jupiter").max, 800.0);
        assert_eq!(zoom_band(BodyKind::Planet, "neptune").optimal, 60.0);
        assert_eq!(zoom_band(BodyKind::Planet, "earth").optimal, 40.0);
        assert_eq!(zoom_band(BodyKind::DwarfPlanet, "pluto").min, 10.0);
        assert_eq!(zoom_band(BodyKind::Moon, "moon").min, 10.0);
        assert_eq!(zoom_band(BodyKind::Comet, "halley").optimal, 20.0);
    }

    #[test]
    fn settle_reaches_optimal_distance() {
        let reg = registry();
        let mut cam = CameraController::new();
        cam.state.position = Vec3::new(0.0, 500.0, 1000.0);
        let mut focus = FocusManager::new();
        focus.set_focus(Some(BodyId(0)), &reg, &mut cam, 0.0);
        assert!(focus.is_zooming());

        // ~700 ms covers the 200 ms delay plus the 500 ms settle.
        run_ticks(&mut focus, &reg, &mut cam, 0.0, 45);
        assert!(!focus.is_zooming());
        let dist = (cam.state.position - Vec3::new(200.0, 0.0, 0.0)).length();
        assert!((dist - 40.0).abs() < 2.0, "settled at {dist}");
        assert_eq!(focus.target_distance, Some(40.0));
        assert_eq!(cam.state.look_at, Vec3::new(200.0, 0.0, 0.0));
    }

    #[test]
    fn focus_toggle_clears() {
        let reg = registry();
        let mut cam = CameraController::new();
        let mut focus = FocusManager::new();
        focus.set_focus(Some(BodyId(0)), &reg, &mut cam, 0.0);
        assert!(focus.focused());
        focus.set_focus(Some(BodyId(0)), &reg, &mut cam, 0.1);
        assert!(!focus.focused());
        assert_eq!(focus.target_distance, None);
    }

    #[test]
    fn unknown_body_clears_focus() {
        let reg = registry();
        let mut cam = CameraController::new();
        let mut focus = FocusManager::new();
        focus.set_focus(Some(BodyId(0)), &reg, &mut cam, 0.0);
        focus.set_focus(Some(BodyId(99)), &reg, &mut cam, 0.1);
        assert!(!focus.focused());
    }

    #[test]
    fn offset_preserved_without_input() {
        let reg = registry();
        let mut cam = CameraController::new();
        let mut focus = FocusManager::new();
        focus.set_focus(Some(BodyId(0)), &reg, &mut cam, 0.0);
        let now = run_ticks(&mut focus, &reg, &mut cam, 0.0, 60);
        let offset = cam.focus_offset;
        run_ticks(&mut focus, &reg, &mut cam, now, 120);
        assert!((cam.focus_offset - offset).length() < 1e-5);
    }

    #[test]
    fn manual_override_blocks_auto_center() {
        let reg = registry();
        let mut cam = CameraController::new();
        let mut focus = FocusManager::new();
        focus.set_focus(Some(BodyId(0)), &reg, &mut cam, 0.0);
        let now = run_ticks(&mut focus, &reg, &mut cam, 0.0, 60);

        // Drift the camera out past the gate, then assert the override.
        cam.focus_offset = Vec3::new(0.0, 0.0, 100.0);
        focus.manual_override.set_for(now, OVERRIDE_TTL);
        let input = InputState::default();
        focus.tick(now + 1.0 / 60.0, &reg, &mut cam, &input);
        assert!((cam.focus_offset.length() - 100.0).abs() < 1e-4);

        // After expiry the center pull resumes.
        focus.tick(now + OVERRIDE_TTL + 0.1, &reg, &mut cam, &input);
        assert!(cam.focus_offset.length() < 100.0);
    }

    #[test]
    fn auto_center_gated_at_1_2x() {
        let reg = registry();
        let mut cam = CameraController::new();
        let mut focus = FocusManager::new();
        focus.set_focus(Some(BodyId(0)), &reg, &mut cam, 0.0);
        let now = run_ticks(&mut focus, &reg, &mut cam, 0.0, 60);

        // Closer than 1.2 × 40: no pull, even though it differs from
        // the desired distance.
        cam.focus_offset = Vec3::new(0.0, 0.0, 45.0);
        let input = InputState::default();
        focus.tick(now + 1.0 / 60.0, &reg, &mut cam, &input);
        assert!((cam.focus_offset.length() - 45.0).abs() < 1e-4);

        // Past the gate: pull engages.
        cam.focus_offset = Vec3::new(0.0, 0.0, 60.0);
        focus.tick(now + 2.0 / 60.0, &reg, &mut cam, &input);
        assert!(cam.focus_offset.length() < 60.0);
    }

    #[test]
    fn health_check_snaps_out_of_band_camera() {
        let reg = registry();
        let mut cam = CameraController::new();
        let mut focus = FocusManager::new();
        focus.set_focus(Some(BodyId(0)), &reg, &mut cam, 0.0);
        let now = run_ticks(&mut focus, &reg, &mut cam, 0.0, 60);

        cam.focus_offset = Vec3::new(0.0, 0.0, 5000.0); // way past max 400
        let input = InputState::default();
        focus.tick(now + 1.0 / 60.0, &reg, &mut cam, &input);
        assert!((cam.focus_offset.length() - 40.0).abs() < 1e-3);
        assert_eq!(focus.target_distance, Some(40.0));
    }

    #[test]
    fn translation_input_arms_override() {
        let reg = registry();
        let mut cam = CameraController::new();
        let mut focus = FocusManager::new();
        focus.set_focus(Some(BodyId(0)), &reg, &mut cam, 0.0);
        let now = run_ticks(&mut focus, &reg, &mut cam, 0.0, 60);

        let mut input = InputState::default();
        input.apply(crate::input::InputEvent::Key {
            intent: crate::input::KeyIntent::Forward,
            down: true,
        });
        focus.tick(now, &reg, &mut cam, &input);
        assert!(focus.manual_override.get(now + OVERRIDE_TTL - 0.1));
        assert!(!focus.manual_override.get(now + OVERRIDE_TTL + 0.1));
    }
}
