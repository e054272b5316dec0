//! Render target contract and the default interleaved color/depth buffer

use crate::color::Color;
use crate::geometry::{Bounds2i, Coordinate, HasDimensions};

pub mod renderbuffer;

pub use self::renderbuffer::RenderBuffer;

/// Storage the rasterizer reads from and writes into.
///
/// The origin is the bottom-left pixel, X grows to the right and Y grows upward. Colors are in linear
/// space, depth values are in `[0, 1]` where `0` is nearest.
///
/// Accessors are only ever called with coordinates inside [`Image::bounds`]. The rasterizer never
/// allocates, resizes or keeps an image past a single draw call.
pub trait Image: HasDimensions {
    /// Pixel rectangle covered by the image, the maximum corner is exclusive
    #[inline]
    fn bounds(&self) -> Bounds2i {
        self.dimensions().bounds()
    }

    #[inline]
    fn width(&self) -> u32 { self.dimensions().width }

    #[inline]
    fn height(&self) -> u32 { self.dimensions().height }

    fn pixel_color(&self, coord: Coordinate) -> Color;

    fn set_pixel_color(&mut self, coord: Coordinate, color: Color);

    fn pixel_depth(&self, coord: Coordinate) -> f32;

    fn set_pixel_depth(&mut self, coord: Coordinate, depth: f32);
}
