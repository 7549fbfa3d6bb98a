use crate::input::queue::{InputEvent, KeyIntent};

/// Held-key and pointer state, updated by draining the event queue at
/// the top of each frame. Per-frame accumulators (drag delta, wheel
/// delta, pause edge) reset in `begin_frame`; held flags persist.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub boost: bool,

    pub pointer_down: bool,
    pointer_x: f32,
    pointer_y: f32,
    /// Accumulated drag movement this frame, viewport pixels.
    pub drag_dx: f32,
    pub drag_dy: f32,

    /// Accumulated wheel delta this frame.
    pub wheel_delta: f32,
    /// Pause was toggled this frame (edge, not level).
    pub pause_toggled: bool,
    pub hold_camera: bool,
    pub release_camera: bool,
}

impl InputState {
    pub fn begin_frame(&mut self) {
        self.drag_dx = 0.0;
        self.drag_dy = 0.0;
        self.wheel_delta = 0.0;
        self.pause_toggled = false;
        self.hold_camera = false;
        self.release_camera = false;
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { intent, down } => self.apply_key(intent, down),
            InputEvent::PointerDown { x, y } => {
                self.pointer_down = true;
                self.pointer_x = x;
                self.pointer_y = y;
            }
            InputEvent::PointerMove { x, y } => {
                if self.pointer_down {
                    self.drag_dx += x - self.pointer_x;
                    self.drag_dy += y - self.pointer_y;
                }
                self.pointer_x = x;
                self.pointer_y = y;
            }
            InputEvent::PointerUp => self.pointer_down = false,
            InputEvent::Wheel { delta_y } => self.wheel_delta += delta_y,
        }
    }

    fn apply_key(&mut self, intent: KeyIntent, down: bool) {
        match intent {
            KeyIntent::Forward => self.forward = down,
            KeyIntent::Backward => self.backward = down,
            KeyIntent::Left => self.left = down,
            KeyIntent::Right => self.right = down,
            KeyIntent::Up => self.up = down,
            KeyIntent::Down => self.down = down,
            KeyIntent::Boost => self.boost = down,
            KeyIntent::TogglePause => {
                if down {
                    self.pause_toggled = true;
                }
            }
            KeyIntent::HoldCamera => {
                if down {
                    self.hold_camera = true;
                }
            }
            KeyIntent::ReleaseCamera => {
                if down {
                    self.release_camera = true;
                }
            }
        }
    }

    /// Any movement key held. Gates the auto-center and arms the
    /// manual-override flag.
    pub fn translating(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    /// Pointer moved while held this frame.
    pub fn dragging(&self) -> bool {
        self.pointer_down && (self.drag_dx != 0.0 || self.drag_dy != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_hold_survives_frames() {
        let mut state = InputState::default();
        state.apply(InputEvent::Key {
            intent: KeyIntent::Forward,
            down: true,
        });
        assert!(state.translating());
        state.begin_frame();
        assert!(state.translating(), "held keys persist across frames");
        state.apply(InputEvent::Key {
            intent: KeyIntent::Forward,
            down: false,
        });
        assert!(!state.translating());
    }

    #[test]
    fn drag_accumulates_only_while_down() {
        let mut state = InputState::default();
        state.apply(InputEvent::PointerMove { x: 50.0, y: 50.0 });
        assert!(!state.dragging());
        state.apply(InputEvent::PointerDown { x: 50.0, y: 50.0 });
        state.apply(InputEvent::PointerMove { x: 60.0, y: 45.0 });
        assert!(state.dragging());
        assert_eq!(state.drag_dx, 10.0);
        assert_eq!(state.drag_dy, -5.0);
        state.begin_frame();
        assert!(!state.dragging(), "delta resets each frame");
        assert!(state.pointer_down);
    }

    #[test]
    fn pause_is_an_edge() {
        let mut state = InputState::default();
        state.apply(InputEvent::Key {
            intent: KeyIntent::TogglePause,
            down: true,
        });
        assert!(state.pause_toggled);
        state.begin_frame();
        assert!(!state.pause_toggled);
        // Key release does not toggle again.
        state.apply(InputEvent::Key {
            intent: KeyIntent::TogglePause,
            down: false,
        });
        assert!(!state.pause_toggled);
    }

    #[test]
    fn wheel_deltas_merge() {
        let mut state = InputState::default();
        state.apply(InputEvent::Wheel { delta_y: 120.0 });
        state.apply(InputEvent::Wheel { delta_y: -40.0 });
        assert_eq!(state.wheel_delta, 80.0);
    }
}
