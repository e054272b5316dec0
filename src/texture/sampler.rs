//! Texture sampling with wrapping, filtering and mip selection

use nalgebra::{Point2, Vector2};

use crate::color::{predefined, Color};
use crate::interpolate::linear_interpolate;

use super::{MipLevel, Texture};

/// Texel filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Nearest texel, equivalent to `GL_NEAREST`
    Point,
    /// Weighted average of the four nearest texels, equivalent to `GL_LINEAR`
    Linear,
}

/// Handling of texture coordinates outside of `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wrap {
    /// Equivalent to `GL_CLAMP_TO_EDGE`
    Clamp,
    /// Equivalent to `GL_CLAMP_TO_BORDER`, using [`SamplerState::border_color`]
    Border,
    /// Equivalent to `GL_REPEAT`
    Repeat,
    /// Equivalent to `GL_MIRRORED_REPEAT`
    MirrorRepeat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerState {
    pub wrap_u: Wrap,
    pub wrap_v: Wrap,
    pub border_color: Color,
    /// Filter used when a texel covers more than a pixel
    pub mag_filter: Filter,
    /// Filter used within a level when a pixel covers more than a texel
    pub min_filter: Filter,
    /// Blending between adjacent mip levels
    pub mip_filter: Filter,
    pub use_mips: bool,
    pub lod_bias: f32,
}

impl Default for SamplerState {
    fn default() -> SamplerState {
        SamplerState {
            wrap_u: Wrap::Repeat,
            wrap_v: Wrap::Repeat,
            border_color: predefined::TRANSPARENT,
            mag_filter: Filter::Linear,
            min_filter: Filter::Linear,
            mip_filter: Filter::Linear,
            use_mips: true,
            lod_bias: 0.0,
        }
    }
}

/// Wraps one texture coordinate, or returns `None` when it falls on the border.
fn wrap(value: f32, mode: Wrap) -> Option<f32> {
    match mode {
        Wrap::Clamp => Some(value.clamp(0.0, 1.0)),
        Wrap::Border => if (0.0..=1.0).contains(&value) { Some(value) } else { None },
        Wrap::Repeat => Some(value - value.floor()),
        Wrap::MirrorRepeat => {
            let whole = value.floor();
            let fraction = value - whole;

            if whole.rem_euclid(2.0) == 0.0 { Some(fraction) } else { Some(1.0 - fraction) }
        }
    }
}

fn sample_point(level: &MipLevel, uv: Point2<f32>) -> Color {
    let x = (uv.x * level.dimensions.width as f32).floor() as i64;
    let y = (uv.y * level.dimensions.height as f32).floor() as i64;

    level.texel_clamped(x, y)
}

fn sample_linear(level: &MipLevel, uv: Point2<f32>) -> Color {
    // Texel centers sit at half-integer positions
    let x = uv.x * level.dimensions.width as f32 - 0.5;
    let y = uv.y * level.dimensions.height as f32 - 0.5;

    let (x0, y0) = (x.floor(), y.floor());
    let (tx, ty) = (x - x0, y - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let bottom = linear_interpolate(tx, level.texel_clamped(x0, y0), level.texel_clamped(x0 + 1, y0));
    let top = linear_interpolate(tx, level.texel_clamped(x0, y0 + 1), level.texel_clamped(x0 + 1, y0 + 1));

    linear_interpolate(ty, bottom, top)
}

fn sample_filtered(level: &MipLevel, uv: Point2<f32>, filter: Filter) -> Color {
    match filter {
        Filter::Point => sample_point(level, uv),
        Filter::Linear => sample_linear(level, uv),
    }
}

/// Reads filtered colors from a texture.
#[derive(Debug, Clone, Copy)]
pub struct Sampler2D<'a> {
    texture: &'a Texture,
    state: SamplerState,
}

impl<'a> Sampler2D<'a> {
    pub fn new(texture: &'a Texture, state: SamplerState) -> Sampler2D<'a> {
        Sampler2D { texture, state }
    }

    #[inline]
    pub fn texture(&self) -> &'a Texture { self.texture }

    #[inline]
    pub fn state(&self) -> &SamplerState { &self.state }

    /// Level of detail for the given screen-space derivatives of the texture coordinates.
    ///
    /// Negative values mean the texture is magnified.
    pub fn lod(&self, duv_dx: Vector2<f32>, duv_dy: Vector2<f32>) -> f32 {
        let footprint = duv_dx.x.abs().max(duv_dx.y.abs()).max(duv_dy.x.abs().max(duv_dy.y.abs()));

        let levels = self.texture.level_count() as f32;

        levels - 1.0 + footprint.max(1e-8).log2() + self.state.lod_bias
    }

    /// Samples the texture at `uv`, where `(0, 0)` is the bottom-left corner.
    ///
    /// The derivatives are usually taken from [`InFragmentInfo::derivative_x`](crate::pipeline::InFragmentInfo::derivative_x)
    /// and [`InFragmentInfo::derivative_y`](crate::pipeline::InFragmentInfo::derivative_y) of the coordinates.
    pub fn sample(&self, uv: Point2<f32>, duv_dx: Vector2<f32>, duv_dy: Vector2<f32>) -> Color {
        let uv = match (wrap(uv.x, self.state.wrap_u), wrap(uv.y, self.state.wrap_v)) {
            (Some(u), Some(v)) => Point2::new(u, v),
            _ => return self.state.border_color,
        };

        let lod = self.lod(duv_dx, duv_dy);

        if lod < 0.0 {
            return sample_filtered(self.texture.base(), uv, self.state.mag_filter);
        }

        if !self.state.use_mips {
            return sample_filtered(self.texture.base(), uv, self.state.min_filter);
        }

        self.sample_trilinear(uv, lod)
    }

    fn sample_trilinear(&self, uv: Point2<f32>, lod: f32) -> Color {
        let levels = self.texture.levels();
        let last = levels.len() - 1;

        let lod = lod.min(last as f32);
        let floor = lod.floor() as usize;
        let ceil = (floor + 1).min(last);
        let t = lod - floor as f32;

        let lower = sample_filtered(&levels[floor], uv, self.state.min_filter);
        let upper = sample_filtered(&levels[ceil], uv, self.state.min_filter);

        match self.state.mip_filter {
            Filter::Point => if t > 0.5 { upper } else { lower },
            Filter::Linear => linear_interpolate(t, lower, upper),
        }
    }
}
