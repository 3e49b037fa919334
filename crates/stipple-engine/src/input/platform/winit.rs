use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};

use crate::coords::PixelPos;
use crate::input::{
    InputEvent, InputState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(state: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved(
            PointerMoveEvent {
                pos: PixelPos::new(position.x, position.y),
            },
        )),

        WindowEvent::MouseInput { state: st, button, .. } => {
            let st = match st {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };

            // winit 0.30 has no cursor query; use the tracked pointer position.
            let pos = state.pointer_pos;

            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: st,
                pos,
            }))
        }

        _ => None,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    fn device() -> DeviceId {
        // SAFETY: only compared, never passed back to the platform.
        unsafe { DeviceId::dummy() }
    }

    fn moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
        }
    }

    fn left(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: WinitMouseButton::Left,
        }
    }

    /// Translates and applies each event in turn, returning the button events.
    fn feed(events: &[WindowEvent]) -> Vec<PointerButtonEvent> {
        let mut state = InputState::default();
        let mut buttons = Vec::new();
        for event in events {
            if let Some(ev) = translate_window_event(&state, event) {
                state.apply_event(&ev);
                if let InputEvent::PointerButton(b) = ev {
                    buttons.push(b);
                }
            }
        }
        buttons
    }

    #[test]
    fn button_uses_tracked_position() {
        let buttons = feed(&[moved(500.0, 400.0), left(ElementState::Pressed), left(ElementState::Released)]);
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[1].pos, Some(PixelPos::new(500.0, 400.0)));
        assert_eq!(buttons[1].state, MouseButtonState::Released);
    }

    #[test]
    fn release_after_leaving_has_no_position() {
        let buttons = feed(&[
            moved(500.0, 400.0),
            left(ElementState::Pressed),
            WindowEvent::CursorLeft { device_id: device() },
            left(ElementState::Released),
        ]);
        assert_eq!(buttons[0].pos, Some(PixelPos::new(500.0, 400.0)));
        assert_eq!(buttons[1].pos, None);
    }

    #[test]
    fn release_before_any_move_has_no_position() {
        let buttons = feed(&[left(ElementState::Released)]);
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].pos, None);
    }
}
