use std::collections::HashSet;

use crate::coords::PixelPos;

use super::types::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

/// Current pointer state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in physical pixels; `None` while outside the window.
    pub pointer_pos: Option<PixelPos>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck buttons when focus changes mid-press.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { pos }) => {
                self.pointer_pos = Some(*pos);
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, pos }) => {
                if pos.is_some() {
                    self.pointer_pos = *pos;
                }
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(button: MouseButton, state: MouseButtonState, x: f64, y: f64) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            pos: Some(PixelPos::new(x, y)),
        })
    }

    #[test]
    fn press_and_release_track_held_buttons() {
        let mut s = InputState::default();
        s.apply_event(&button(MouseButton::Left, MouseButtonState::Pressed, 1.0, 2.0));
        assert!(s.button_down(MouseButton::Left));

        s.apply_event(&button(MouseButton::Left, MouseButtonState::Released, 1.0, 2.0));
        assert!(!s.button_down(MouseButton::Left));
        assert_eq!(s.pointer_pos, Some(PixelPos::new(1.0, 2.0)));
    }

    #[test]
    fn focus_loss_clears_buttons() {
        let mut s = InputState::default();
        s.apply_event(&button(MouseButton::Right, MouseButtonState::Pressed, 0.0, 0.0));
        s.apply_event(&InputEvent::Focused(false));
        assert!(s.buttons_down.is_empty());
    }

    #[test]
    fn pointer_leave_forgets_position() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { pos: PixelPos::new(5.0, 5.0) }));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }

    #[test]
    fn release_without_position_keeps_pointer_unknown() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
            pos: None,
        }));
        assert_eq!(s.pointer_pos, None);
    }
}
