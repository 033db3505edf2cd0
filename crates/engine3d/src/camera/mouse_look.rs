/// Pitch is kept strictly inside ±90° so the view never flips over the pole.
pub const PITCH_LIMIT_DEG: f32 = 89.0;

/// Integrates absolute cursor positions into accumulated yaw/pitch (degrees).
///
/// The first sample after construction or [`reset`](Self::reset) only sets the
/// reference position, so recapturing the cursor never makes the view jump.
#[derive(Debug, Clone)]
pub struct MouseLook {
    sensitivity: f32,
    last: Option<(f64, f64)>,
    yaw: f32,
    pitch: f32,
}

impl MouseLook {
    /// `sensitivity` is in degrees per cursor unit.
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            last: None,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Accumulated rotation around +Y, from horizontal motion.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Accumulated rotation around +X, from vertical motion. Always within ±89°.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Forgets the reference position; angles are kept.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Feeds the current cursor position and returns the applied `(dyaw, dpitch)`.
    pub fn integrate(&mut self, pos: (f64, f64)) -> (f32, f32) {
        let (last_x, last_y) = self.last.unwrap_or(pos);
        self.last = Some(pos);

        let dyaw = ((pos.0 - last_x) as f32) * self.sensitivity;
        let dpitch = ((pos.1 - last_y) as f32) * self.sensitivity;

        self.yaw += dyaw;
        self.pitch = (self.pitch + dpitch).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);

        (dyaw, dpitch)
    }
}
