//! Integer pixel rectangles

use super::Coordinate;

/// Axis-aligned pixel rectangle. `min` is inclusive and `max` is exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bounds2i {
    pub min: (i32, i32),
    pub max: (i32, i32),
}

impl Bounds2i {
    #[inline]
    pub fn new(min: (i32, i32), max: (i32, i32)) -> Bounds2i {
        Bounds2i { min, max }
    }

    /// Smallest rectangle holding every pixel whose center may lie inside the continuous box `[min, max]`.
    pub fn from_continuous(min: (f32, f32), max: (f32, f32)) -> Bounds2i {
        Bounds2i {
            min: (min.0.floor() as i32, min.1.floor() as i32),
            max: (max.0.ceil() as i32, max.1.ceil() as i32),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 { (self.max.0 - self.min.0).max(0) }

    #[inline]
    pub fn height(&self) -> i32 { (self.max.1 - self.min.1).max(0) }

    #[inline]
    pub fn area(&self) -> usize { self.width() as usize * self.height() as usize }

    #[inline]
    pub fn is_empty(&self) -> bool { self.width() == 0 || self.height() == 0 }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min.0 && x < self.max.0 && y >= self.min.1 && y < self.max.1
    }

    #[inline]
    pub fn overlaps(&self, other: &Bounds2i) -> bool {
        self.min.0 < other.max.0 && other.min.0 < self.max.0 &&
            self.min.1 < other.max.1 && other.min.1 < self.max.1
    }

    /// Intersection of both rectangles, or an empty rectangle at the origin when they don't overlap.
    pub fn intersect(&self, other: &Bounds2i) -> Bounds2i {
        if !self.overlaps(other) {
            return Bounds2i::default();
        }

        Bounds2i {
            min: (self.min.0.max(other.min.0), self.min.1.max(other.min.1)),
            max: (self.max.0.min(other.max.0), self.max.1.min(other.max.1)),
        }
    }

    /// Iterates every pixel row by row, bottom to top.
    pub fn pixels(&self) -> impl Iterator<Item=Coordinate> {
        let Bounds2i { min, max } = *self;

        (min.1..max.1.max(min.1)).flat_map(move |y| {
            (min.0..max.0.max(min.0)).map(move |x| Coordinate::new(x as u32, y as u32))
        })
    }
}
