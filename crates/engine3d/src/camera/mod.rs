//! Free-look camera angles driven by the mouse.

mod mouse_look;

pub use mouse_look::{MouseLook, PITCH_LIMIT_DEG};
