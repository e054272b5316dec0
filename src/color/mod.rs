//! Color type definitions and helpers
//!
//! Colors are RGBA `f32` vectors in linear space, with every channel nominally in `[0, 1]`.

use nalgebra::Vector4;
use num_traits::clamp;

pub mod blend;

pub use self::blend::{Blend, BlendFactor, BlendOperator, BlendState};

/// RGBA 32-bit Floating Point Color
pub type Color = Vector4<f32>;

pub mod predefined {
    use super::Color;

    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
}

/// Clamps every channel to `[0, 1]`
#[inline]
pub fn saturate(color: Color) -> Color {
    color.map(|c| clamp(c, 0.0, 1.0))
}

/// Raises the RGB channels to `1 / gamma`, leaving alpha untouched.
#[inline]
pub fn gamma_correct(color: Color, gamma: f32) -> Color {
    let exponent = 1.0 / gamma;

    Color::new(color.x.powf(exponent), color.y.powf(exponent), color.z.powf(exponent), color.w)
}

/// Quantizes a linear color into four bytes, clamping out-of-range channels.
#[inline]
pub fn to_rgba8(color: Color) -> [u8; 4] {
    let c = saturate(color);

    [
        (c.x * 255.0).round() as u8,
        (c.y * 255.0).round() as u8,
        (c.z * 255.0).round() as u8,
        (c.w * 255.0).round() as u8,
    ]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_gamma_leaves_alpha() {
        let c = gamma_correct(Color::new(0.25, 1.0, 0.0, 0.25), 2.0);

        assert!((c.x - 0.5).abs() < 1e-6);
        assert_eq!(c.y, 1.0);
        assert_eq!(c.z, 0.0);
        assert_eq!(c.w, 0.25);
    }

    #[test]
    fn test_to_rgba8_clamps() {
        assert_eq!(to_rgba8(Color::new(1.5, -0.2, 0.5, 1.0)), [255, 0, 128, 255]);
    }
}
