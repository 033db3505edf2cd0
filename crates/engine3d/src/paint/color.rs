/// Opaque-capable RGBA color with straight alpha, components in `[0, 1]`.
///
/// Channels are display (sRGB-encoded) values, the way a non-sRGB
/// framebuffer stores them.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Decodes the color channels from sRGB to linear light. Alpha is unchanged.
    pub fn to_linear(self) -> Self {
        Self {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: self.a,
        }
    }

    /// Clear value for a render pass targeting `format`.
    ///
    /// sRGB targets encode on write, so the value is decoded first and the
    /// stored pixel ends up equal to the display value.
    pub fn to_wgpu(self, format: wgpu::TextureFormat) -> wgpu::Color {
        let c = if format.is_srgb() { self.to_linear() } else { self };
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
