use crate::input::{InputState, Key};
use crate::render::ProjectionMode;

pub const QUIT_KEY: Key = Key::Escape;
pub const PERSPECTIVE_KEY: Key = Key::P;
pub const ORTHOGRAPHIC_KEY: Key = Key::O;
pub const FULLSCREEN_KEY: Key = Key::F;

/// What the keyboard asked for on one tick.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ControlActions {
    pub quit: bool,
    pub projection: Option<ProjectionMode>,
    pub toggle_fullscreen: bool,
}

/// Level-triggered key sampler.
///
/// Keys are read as "held right now". The fullscreen key is latched so that
/// holding it toggles once; the latch clears when the key is seen released.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    fullscreen_latch: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, input: &InputState) -> ControlActions {
        let mut actions = ControlActions {
            quit: input.key_down(QUIT_KEY),
            ..Default::default()
        };

        if input.key_down(PERSPECTIVE_KEY) {
            actions.projection = Some(ProjectionMode::Perspective);
        }
        // Sampled second; wins when both are held.
        if input.key_down(ORTHOGRAPHIC_KEY) {
            actions.projection = Some(ProjectionMode::Orthographic);
        }

        if input.key_down(FULLSCREEN_KEY) {
            if !self.fullscreen_latch {
                self.fullscreen_latch = true;
                actions.toggle_fullscreen = true;
            }
        } else {
            self.fullscreen_latch = false;
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[Key]) -> InputState {
        let mut input = InputState::default();
        input.keys_down.extend(keys.iter().copied());
        input
    }

    #[test]
    fn nothing_held_is_no_action() {
        let mut c = Controls::new();
        assert_eq!(c.sample(&held(&[])), ControlActions::default());
    }

    #[test]
    fn escape_requests_quit() {
        let mut c = Controls::new();
        assert!(c.sample(&held(&[Key::Escape])).quit);
    }

    #[test]
    fn projection_keys_select_mode() {
        let mut c = Controls::new();
        assert_eq!(
            c.sample(&held(&[Key::O])).projection,
            Some(ProjectionMode::Orthographic)
        );
        assert_eq!(
            c.sample(&held(&[Key::P])).projection,
            Some(ProjectionMode::Perspective)
        );
        assert_eq!(
            c.sample(&held(&[Key::P, Key::O])).projection,
            Some(ProjectionMode::Orthographic)
        );
    }

    #[test]
    fn held_fullscreen_key_toggles_once() {
        let mut c = Controls::new();
        let f = held(&[Key::F]);
        assert!(c.sample(&f).toggle_fullscreen);
        for _ in 0..10 {
            assert!(!c.sample(&f).toggle_fullscreen);
        }
        assert!(c.fullscreen_latch);
    }

    #[test]
    fn release_rearms_fullscreen_key() {
        let mut c = Controls::new();
        assert!(c.sample(&held(&[Key::F])).toggle_fullscreen);
        assert!(!c.sample(&held(&[])).toggle_fullscreen);
        assert!(!c.fullscreen_latch);
        assert!(c.sample(&held(&[Key::F])).toggle_fullscreen);
    }
}
