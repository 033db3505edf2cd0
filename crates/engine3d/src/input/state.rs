use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current input state for the engine window.
///
/// Answers level queries ("is this key held right now") and exposes a
/// virtual cursor position. The cursor is captured while the engine runs, so
/// the position is integrated from raw motion and is not bounded by the
/// window or the screen.
#[derive(Debug, Default)]
pub struct InputState {
    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Virtual cursor position in device units.
    pub cursor: (f64, f64),
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Focused(focused) => {
                if !focused {
                    // Release events are not delivered to an unfocused window.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(key);
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },

            InputEvent::MouseMotion { dx, dy } => {
                self.cursor.0 += dx;
                self.cursor.1 += dy;
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state }
    }

    #[test]
    fn press_and_release_track_held_keys() {
        let mut input = InputState::default();
        input.apply_event(key(Key::F, KeyState::Pressed));
        assert!(input.key_down(Key::F));
        assert!(!input.key_down(Key::Escape));

        input.apply_event(key(Key::F, KeyState::Released));
        assert!(!input.key_down(Key::F));
    }

    #[test]
    fn repeated_presses_keep_one_entry() {
        let mut input = InputState::default();
        input.apply_event(key(Key::P, KeyState::Pressed));
        input.apply_event(key(Key::P, KeyState::Pressed));
        assert!(input.key_down(Key::P));
        assert_eq!(input.keys_down.len(), 1);
    }

    #[test]
    fn focus_loss_releases_all_keys() {
        let mut input = InputState::default();
        input.apply_event(InputEvent::Focused(true));
        input.apply_event(key(Key::Escape, KeyState::Pressed));
        input.apply_event(key(Key::O, KeyState::Pressed));

        input.apply_event(InputEvent::Focused(false));
        assert!(input.keys_down.is_empty());
    }

    #[test]
    fn motion_accumulates_into_virtual_cursor() {
        let mut input = InputState::default();
        input.apply_event(InputEvent::MouseMotion { dx: 10.0, dy: -4.0 });
        input.apply_event(InputEvent::MouseMotion { dx: 2.5, dy: 1.0 });
        assert_eq!(input.cursor_position(), (12.5, -3.0));
    }
}
