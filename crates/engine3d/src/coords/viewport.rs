/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height. A zero height (minimized window) counts as 1.
    #[inline]
    pub fn aspect(self) -> f32 {
        let h = if self.height > 0.0 { self.height } else { 1.0 };
        self.width / h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_800x600() {
        assert!((Viewport::new(800.0, 600.0).aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let vp = Viewport::new(640.0, 0.0);
        assert_eq!(vp.aspect(), 640.0);
    }
}
