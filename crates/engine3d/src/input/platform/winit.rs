use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
            })
        }

        _ => None,
    }
}

/// Translates a winit `DeviceEvent` into an engine `InputEvent`.
///
/// Only raw mouse motion is used; it keeps flowing while the cursor is locked.
pub fn translate_device_event(event: &DeviceEvent) -> Option<InputEvent> {
    match event {
        DeviceEvent::MouseMotion { delta: (dx, dy) } => {
            Some(InputEvent::MouseMotion { dx: *dx, dy: *dy })
        }
        _ => None,
    }
}

pub fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::KeyF) => Key::F,
        PhysicalKey::Code(KeyCode::KeyO) => Key::O,
        PhysicalKey::Code(KeyCode::KeyP) => Key::P,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bound_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyF)), Key::F);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyO)), Key::O);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyP)), Key::P);
    }

    #[test]
    fn unbound_keys_map_to_other() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F5)), Key::Other);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyA)), Key::Other);
    }

    #[test]
    fn mouse_motion_is_translated() {
        let ev = DeviceEvent::MouseMotion { delta: (3.0, -2.0) };
        assert_eq!(
            translate_device_event(&ev),
            Some(InputEvent::MouseMotion { dx: 3.0, dy: -2.0 })
        );
    }
}
