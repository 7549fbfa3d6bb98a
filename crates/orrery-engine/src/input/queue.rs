/// Movement and control intents decoded from raw key codes.
/// Generic — no UI-framework semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    Boost,
    TogglePause,
    /// Pin the manual-override flag for an extended window.
    HoldCamera,
    /// Release the manual-override flag immediately.
    ReleaseCamera,
}

/// Map a DOM `KeyboardEvent.code` to an intent. Unknown codes are
/// ignored at the boundary rather than queued.
pub fn decode_key(code: &str) -> Option<KeyIntent> {
    Some(match code {
        "KeyW" | "ArrowUp" => KeyIntent::Forward,
        "KeyS" | "ArrowDown" => KeyIntent::Backward,
        "KeyA" | "ArrowLeft" => KeyIntent::Left,
        "KeyD" | "ArrowRight" => KeyIntent::Right,
        "KeyQ" => KeyIntent::Up,
        "KeyE" => KeyIntent::Down,
        "ShiftLeft" | "ShiftRight" => KeyIntent::Boost,
        "Space" => KeyIntent::TogglePause,
        "KeyC" => KeyIntent::HoldCamera,
        "KeyV" => KeyIntent::ReleaseCamera,
        _ => return None,
    })
}

/// Input event types the simulation understands.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    Key { intent: KeyIntent, down: bool },
    /// Pointer pressed at viewport coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// Pointer moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    PointerUp,
    /// Raw wheel delta; positive zooms out.
    Wheel { delta_y: f32 },
}

/// A queue of input events.
/// The host writes events into the queue; the frame loop drains them.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
