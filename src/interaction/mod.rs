use serde::{Deserialize, Serialize};

/// Gesture currently driving the viewport, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
    Zooming,
}

/// Last pointer location over the chart surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PointerState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
}

impl PointerState {
    #[must_use]
    pub fn position(self) -> Option<(f64, f64)> {
        self.visible.then_some((self.x, self.y))
    }
}

/// Pointer and gesture bookkeeping for one chart host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    pointer: PointerState,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn pointer(self) -> PointerState {
        self.pointer
    }

    /// Returns `true` when the pointer state changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let next = PointerState {
            visible: true,
            x,
            y,
        };
        let changed = next != self.pointer;
        self.pointer = next;
        changed
    }

    /// Returns `true` when the pointer was visible.
    pub fn pointer_leave(&mut self) -> bool {
        let was_visible = self.pointer.visible;
        self.pointer.visible = false;
        self.mode = InteractionMode::Idle;
        was_visible
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionMode, InteractionState};

    #[test]
    fn leave_hides_pointer_and_resets_mode() {
        let mut state = InteractionState::default();
        assert!(state.pointer_move(10.0, 20.0));
        assert!(!state.pointer_move(10.0, 20.0));
        state.set_mode(InteractionMode::Panning);

        assert!(state.pointer_leave());
        assert_eq!(state.pointer().position(), None);
        assert_eq!(state.mode(), InteractionMode::Idle);
        assert!(!state.pointer_leave());
    }
}
