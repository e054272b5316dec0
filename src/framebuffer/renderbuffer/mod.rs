//! An efficient framebuffer implementation

use crate::color::{predefined, Color};
use crate::error::{RenderError, RenderResult};
use crate::geometry::{Coordinate, Dimensions, HasDimensions};

use super::Image;

pub mod iterator;

pub use self::iterator::{RenderBufferIter, RenderBufferPixelRef};

/// Depth value of a freshly cleared buffer, the farthest representable depth
pub const FAR_DEPTH: f32 = 1.0;

/// Framebuffer with interleaved color and depth, allowing for more cache locality.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    dimensions: Dimensions,
    /// Interlaced framebuffer for more cache-friendly access
    pub(crate) buffer: Vec<(Color, f32)>,
}

impl RenderBuffer {
    /// Create a new `RenderBuffer` cleared to opaque black and the far depth.
    pub fn new(width: u32, height: u32) -> RenderResult<RenderBuffer> {
        RenderBuffer::with_dimensions(Dimensions::new(width, height))
    }

    /// Create a new `RenderBuffer` with the given number of pixels allocated.
    pub fn with_dimensions(dimensions: Dimensions) -> RenderResult<RenderBuffer> {
        if dimensions.is_empty() {
            return Err(RenderError::ZeroDimensions(dimensions));
        }

        Ok(RenderBuffer {
            dimensions,
            buffer: vec![(predefined::BLACK, FAR_DEPTH); dimensions.area()],
        })
    }

    /// Reset every pixel to the given color and depth
    pub fn clear(&mut self, color: Color, depth: f32) {
        for pixel in &mut self.buffer {
            *pixel = (color, depth);
        }
    }

    pub fn clear_color(&mut self, color: Color) {
        for pixel in &mut self.buffer {
            pixel.0 = color;
        }
    }

    pub fn clear_depth(&mut self, depth: f32) {
        for pixel in &mut self.buffer {
            pixel.1 = depth;
        }
    }

    /// Checked color access
    pub fn color_at(&self, coord: Coordinate) -> RenderResult<Color> {
        self.checked_index(coord).map(|index| self.buffer[index].0)
    }

    /// Checked depth access
    pub fn depth_at(&self, coord: Coordinate) -> RenderResult<f32> {
        self.checked_index(coord).map(|index| self.buffer[index].1)
    }

    /// Return an efficient iterator for `RenderBuffer` pixels
    pub fn iter(&self) -> RenderBufferIter<'_> {
        RenderBufferIter { iter: self.buffer.iter() }
    }

    fn checked_index(&self, coord: Coordinate) -> RenderResult<usize> {
        if self.dimensions.in_bounds(coord) {
            Ok(coord.into_index(self.dimensions))
        } else {
            Err(RenderError::InvalidPixelCoordinate(coord, self.dimensions))
        }
    }

    #[inline(always)]
    fn index(&self, coord: Coordinate) -> usize {
        debug_assert!(self.dimensions.in_bounds(coord), "{:?} outside of {:?}", coord, self.dimensions);
        coord.into_index(self.dimensions)
    }
}

impl HasDimensions for RenderBuffer {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}

impl Image for RenderBuffer {
    #[inline]
    fn pixel_color(&self, coord: Coordinate) -> Color {
        self.buffer[self.index(coord)].0
    }

    #[inline]
    fn set_pixel_color(&mut self, coord: Coordinate, color: Color) {
        let index = self.index(coord);
        self.buffer[index].0 = color;
    }

    #[inline]
    fn pixel_depth(&self, coord: Coordinate) -> f32 {
        self.buffer[self.index(coord)].1
    }

    #[inline]
    fn set_pixel_depth(&mut self, coord: Coordinate, depth: f32) {
        let index = self.index(coord);
        self.buffer[index].1 = depth;
    }
}
