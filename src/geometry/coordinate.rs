use super::Dimensions;

/// Discrete pixel position. The origin is the bottom-left pixel, X grows to the right and Y grows upward.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    #[inline]
    pub fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }

    /// Row-major index of this coordinate inside a buffer of the given dimensions
    #[inline]
    pub fn into_index(self, dimensions: Dimensions) -> usize {
        let Coordinate { x, y } = self;
        y as usize * dimensions.width as usize + x as usize
    }

    /// Position of the pixel center in continuous space, where a pixel spans `[x, x + 1)`.
    #[inline]
    pub fn center(self) -> (f32, f32) {
        (self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}
