/// Keyboard key identifier.
///
/// Only the keys the engine binds are named; everything else maps to `Other`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    F,
    O,
    P,
    Other,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: KeyState },

    /// Raw pointer motion, unaffected by cursor capture or screen edges.
    MouseMotion { dx: f64, dy: f64 },

    /// Window focus change.
    Focused(bool),
}
