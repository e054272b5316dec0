//! Textures with optional mip chains, and the sampler that reads them

use crate::color::Color;
use crate::error::{RenderError, RenderResult};
use crate::geometry::{Coordinate, Dimensions, HasDimensions};

pub mod sampler;

pub use self::sampler::{Filter, Sampler2D, SamplerState, Wrap};

/// A single image of a texture's mip chain. Texel `(0, 0)` is the bottom-left one.
#[derive(Debug, Clone, PartialEq)]
pub struct MipLevel {
    dimensions: Dimensions,
    texels: Vec<Color>,
}

impl MipLevel {
    #[inline]
    pub fn texel(&self, coord: Coordinate) -> Color {
        self.texels[coord.into_index(self.dimensions)]
    }

    /// Texel access with coordinates clamped to the edges
    #[inline]
    pub(crate) fn texel_clamped(&self, x: i64, y: i64) -> Color {
        let x = x.clamp(0, self.dimensions.width as i64 - 1) as u32;
        let y = y.clamp(0, self.dimensions.height as i64 - 1) as u32;

        self.texel(Coordinate::new(x, y))
    }

    pub fn texels(&self) -> &[Color] { &self.texels }

    /// Box filters the level down to half its size, rounding odd sizes down but never below one texel.
    fn downsample(&self) -> MipLevel {
        let Dimensions { width, height } = self.dimensions;
        let dimensions = Dimensions::new((width / 2).max(1), (height / 2).max(1));

        let mut texels = Vec::with_capacity(dimensions.area());

        for y in 0..dimensions.height as i64 {
            for x in 0..dimensions.width as i64 {
                let sum = self.texel_clamped(2 * x, 2 * y) +
                    self.texel_clamped(2 * x + 1, 2 * y) +
                    self.texel_clamped(2 * x, 2 * y + 1) +
                    self.texel_clamped(2 * x + 1, 2 * y + 1);

                texels.push(sum * 0.25);
            }
        }

        MipLevel { dimensions, texels }
    }
}

impl HasDimensions for MipLevel {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}

/// Texture made of a base level and, after [`Texture::generate_mips`], a chain of smaller levels.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    levels: Vec<MipLevel>,
}

impl Texture {
    /// Creates a texture from linear colors laid out row by row, starting with the bottom row.
    pub fn new(width: u32, height: u32, texels: Vec<Color>) -> RenderResult<Texture> {
        let dimensions = Dimensions::new(width, height);

        if dimensions.is_empty() {
            return Err(RenderError::ZeroDimensions(dimensions));
        }

        if texels.len() != dimensions.area() {
            return Err(RenderError::TexelCountMismatch { expected: dimensions.area(), found: texels.len() });
        }

        Ok(Texture { levels: vec![MipLevel { dimensions, texels }] })
    }

    /// Texture of a single color
    pub fn solid(width: u32, height: u32, color: Color) -> RenderResult<Texture> {
        Texture::new(width, height, vec![color; width as usize * height as usize])
    }

    /// Rebuilds the mip chain down to a single texel
    pub fn generate_mips(&mut self) {
        self.levels.truncate(1);

        loop {
            let next = match self.levels.last() {
                Some(last) if last.dimensions.width > 1 || last.dimensions.height > 1 => last.downsample(),
                _ => break,
            };

            self.levels.push(next);
        }
    }

    /// Same as [`Texture::generate_mips`], for construction chains
    pub fn with_mips(mut self) -> Texture {
        self.generate_mips();
        self
    }

    #[inline]
    pub fn base(&self) -> &MipLevel { &self.levels[0] }

    #[inline]
    pub fn level(&self, index: usize) -> Option<&MipLevel> { self.levels.get(index) }

    /// Number of levels including the base one
    #[inline]
    pub fn level_count(&self) -> usize { self.levels.len() }

    pub(crate) fn levels(&self) -> &[MipLevel] { &self.levels }
}

impl HasDimensions for Texture {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.base().dimensions }
}

#[cfg(test)]
mod test {
    use crate::color::predefined;

    use super::*;

    #[test]
    fn test_construction_errors() {
        assert_eq!(Texture::new(0, 4, vec![]), Err(RenderError::ZeroDimensions(Dimensions::new(0, 4))));
        assert_eq!(Texture::new(2, 2, vec![predefined::RED; 3]),
                   Err(RenderError::TexelCountMismatch { expected: 4, found: 3 }));
    }

    #[test]
    fn test_mip_chain() {
        let texture = Texture::solid(8, 2, predefined::RED).unwrap().with_mips();

        let sizes: Vec<Dimensions> = texture.levels().iter().map(|level| level.dimensions()).collect();

        assert_eq!(sizes, vec![Dimensions::new(8, 2), Dimensions::new(4, 1), Dimensions::new(2, 1), Dimensions::new(1, 1)]);
        assert_eq!(texture.level(3).map(|level| level.texels()[0]), Some(predefined::RED));
    }

    #[test]
    fn test_downsample_averages() {
        let texture = Texture::new(2, 2, vec![predefined::BLACK, predefined::WHITE,
                                              predefined::WHITE, predefined::BLACK]).unwrap().with_mips();

        assert_eq!(texture.level_count(), 2);
        assert_eq!(texture.level(1).map(|level| level.texel(Coordinate::new(0, 0))),
                   Some(Color::new(0.5, 0.5, 0.5, 1.0)));
    }
}
