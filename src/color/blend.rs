//! Defines color blending trait and the fixed-function blend state

use nalgebra::Vector3;
use num_traits::clamp;

use super::Color;

/// Defines some kind of color blending function
pub trait Blend: Send + Sync {
    /// The first parameter passed to the blend function is the output of the fragment shader, the source color.
    ///
    /// The second parameter passed to the blend function is the existing value in the framebuffer to blend over.
    ///
    /// You can use the tool [Here](http://www.andersriggelsen.dk/glblendfunc.php) to see how OpenGL does blending,
    /// and choose how you want to blend colors.
    fn blend(&self, src: Color, dst: Color) -> Color;
}

/// Weight applied to the source or destination color before the blend operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    DstColor,
    OneMinusSrcColor,
    OneMinusDstColor,
    SrcAlpha,
    DstAlpha,
    OneMinusSrcAlpha,
    OneMinusDstAlpha,
    ConstColor,
    OneMinusConstColor,
    ConstAlpha,
    OneMinusConstAlpha,
}

/// How the weighted source and destination are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOperator {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

impl BlendOperator {
    #[inline]
    fn apply(self, src: f32, dst: f32) -> f32 {
        let result = match self {
            BlendOperator::Add => src + dst,
            BlendOperator::Subtract => src - dst,
            BlendOperator::ReverseSubtract => dst - src,
            BlendOperator::Min => src.min(dst),
            BlendOperator::Max => src.max(dst),
        };

        clamp(result, 0.0, 1.0)
    }
}

/// Fixed-function blending configuration, applied independently to the RGB channels and to alpha.
///
/// The default configuration replaces the destination with the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendState {
    pub src_color_factor: BlendFactor,
    pub dst_color_factor: BlendFactor,
    pub src_alpha_factor: BlendFactor,
    pub dst_alpha_factor: BlendFactor,
    pub color_operator: BlendOperator,
    pub alpha_operator: BlendOperator,
    pub const_color: Vector3<f32>,
    pub const_alpha: f32,
}

impl Default for BlendState {
    fn default() -> BlendState {
        BlendState {
            src_color_factor: BlendFactor::One,
            dst_color_factor: BlendFactor::Zero,
            src_alpha_factor: BlendFactor::One,
            dst_alpha_factor: BlendFactor::Zero,
            color_operator: BlendOperator::Add,
            alpha_operator: BlendOperator::Add,
            const_color: Vector3::zeros(),
            const_alpha: 0.0,
        }
    }
}

impl BlendState {
    /// Classic "over" compositing with non-premultiplied alpha
    pub fn alpha_over() -> BlendState {
        BlendState {
            src_color_factor: BlendFactor::SrcAlpha,
            dst_color_factor: BlendFactor::OneMinusSrcAlpha,
            src_alpha_factor: BlendFactor::One,
            dst_alpha_factor: BlendFactor::OneMinusSrcAlpha,
            ..BlendState::default()
        }
    }

    /// Adds the source on top of the destination
    pub fn additive() -> BlendState {
        BlendState {
            dst_color_factor: BlendFactor::One,
            dst_alpha_factor: BlendFactor::One,
            ..BlendState::default()
        }
    }

    fn color_factor(&self, factor: BlendFactor, src: &Color, dst: &Color) -> Vector3<f32> {
        let one = Vector3::repeat(1.0);

        match factor {
            BlendFactor::Zero => Vector3::zeros(),
            BlendFactor::One => one,
            BlendFactor::SrcColor => src.xyz(),
            BlendFactor::DstColor => dst.xyz(),
            BlendFactor::OneMinusSrcColor => one - src.xyz(),
            BlendFactor::OneMinusDstColor => one - dst.xyz(),
            BlendFactor::SrcAlpha => Vector3::repeat(src.w),
            BlendFactor::DstAlpha => Vector3::repeat(dst.w),
            BlendFactor::OneMinusSrcAlpha => Vector3::repeat(1.0 - src.w),
            BlendFactor::OneMinusDstAlpha => Vector3::repeat(1.0 - dst.w),
            BlendFactor::ConstColor => self.const_color,
            BlendFactor::OneMinusConstColor => one - self.const_color,
            BlendFactor::ConstAlpha => Vector3::repeat(self.const_alpha),
            BlendFactor::OneMinusConstAlpha => Vector3::repeat(1.0 - self.const_alpha),
        }
    }

    fn alpha_factor(&self, factor: BlendFactor, src: &Color, dst: &Color) -> f32 {
        match factor {
            BlendFactor::Zero => 0.0,
            BlendFactor::One => 1.0,
            BlendFactor::SrcAlpha => src.w,
            BlendFactor::DstAlpha => dst.w,
            BlendFactor::OneMinusSrcAlpha => 1.0 - src.w,
            BlendFactor::OneMinusDstAlpha => 1.0 - dst.w,
            BlendFactor::ConstAlpha => self.const_alpha,
            BlendFactor::OneMinusConstAlpha => 1.0 - self.const_alpha,
            BlendFactor::SrcColor |
            BlendFactor::DstColor |
            BlendFactor::OneMinusSrcColor |
            BlendFactor::OneMinusDstColor |
            BlendFactor::ConstColor |
            BlendFactor::OneMinusConstColor => {
                panic!("{:?} is a color blend factor and cannot weight the alpha channel", factor)
            }
        }
    }
}

impl Blend for BlendState {
    fn blend(&self, src: Color, dst: Color) -> Color {
        let src_factor = self.color_factor(self.src_color_factor, &src, &dst);
        let dst_factor = self.color_factor(self.dst_color_factor, &src, &dst);

        // Weighted terms are saturated before the operator, then the operator result is saturated again
        let src_color = src.xyz().component_mul(&src_factor).map(|c| clamp(c, 0.0, 1.0));
        let dst_color = dst.xyz().component_mul(&dst_factor).map(|c| clamp(c, 0.0, 1.0));

        let op = self.color_operator;
        let color = src_color.zip_map(&dst_color, |s, d| op.apply(s, d));

        let src_alpha = src.w * self.alpha_factor(self.src_alpha_factor, &src, &dst);
        let dst_alpha = dst.w * self.alpha_factor(self.dst_alpha_factor, &src, &dst);
        let alpha = self.alpha_operator.apply(src_alpha, dst_alpha);

        Color::new(color.x, color.y, color.z, alpha)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_color_eq(a: Color, b: Color) {
        assert!((a - b).amax() < 1e-6, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_replace_is_identity() {
        let c = Color::new(0.2, 0.4, 0.6, 0.8);

        assert_color_eq(BlendState::default().blend(c, c), c);
        assert_color_eq(BlendState::default().blend(c, Color::new(1.0, 1.0, 1.0, 1.0)), c);
        assert_color_eq(().blend(c, Color::zeros()), c);
    }

    #[test]
    fn test_alpha_over() {
        let src = Color::new(1.0, 0.0, 0.0, 0.25);
        let dst = Color::new(0.0, 0.0, 1.0, 1.0);

        assert_color_eq(BlendState::alpha_over().blend(src, dst), Color::new(0.25, 0.0, 0.75, 1.0));
    }

    #[test]
    fn test_operators_clamp() {
        let src = Color::new(0.75, 0.25, 0.5, 1.0);
        let dst = Color::new(0.5, 0.5, 0.5, 1.0);

        let mut state = BlendState::additive();
        assert_color_eq(state.blend(src, dst), Color::new(1.0, 0.75, 1.0, 1.0));

        state.color_operator = BlendOperator::Subtract;
        state.alpha_operator = BlendOperator::Subtract;
        assert_color_eq(state.blend(src, dst), Color::new(0.25, 0.0, 0.0, 0.0));

        state.color_operator = BlendOperator::ReverseSubtract;
        assert_color_eq(state.blend(src, dst), Color::new(0.0, 0.25, 0.0, 0.0));

        state.color_operator = BlendOperator::Min;
        assert_color_eq(state.blend(src, dst).xyz().push(0.0), Color::new(0.5, 0.25, 0.5, 0.0));

        state.color_operator = BlendOperator::Max;
        assert_color_eq(state.blend(src, dst).xyz().push(0.0), Color::new(0.75, 0.5, 0.5, 0.0));
    }

    #[test]
    fn test_constant_factors() {
        let state = BlendState {
            src_color_factor: BlendFactor::ConstColor,
            dst_color_factor: BlendFactor::OneMinusConstColor,
            src_alpha_factor: BlendFactor::ConstAlpha,
            dst_alpha_factor: BlendFactor::OneMinusConstAlpha,
            const_color: Vector3::new(1.0, 0.5, 0.0),
            const_alpha: 0.5,
            ..BlendState::default()
        };

        let src = Color::new(1.0, 1.0, 1.0, 1.0);
        let dst = Color::new(0.0, 0.0, 0.0, 0.0);

        assert_color_eq(state.blend(src, dst), Color::new(1.0, 0.5, 0.0, 0.5));
    }

    #[test]
    #[should_panic]
    fn test_color_factor_on_alpha_panics() {
        let state = BlendState { src_alpha_factor: BlendFactor::SrcColor, ..BlendState::default() };
        state.blend(Color::zeros(), Color::zeros());
    }
}
