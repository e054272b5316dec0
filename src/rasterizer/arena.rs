//! Reusable per-draw storage

use nalgebra::Vector4;

use crate::geometry::BarycentricCoordinates;
use crate::pipeline::Triangle;

/// Link from a fragment to the neighbor used for its derivatives
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NeighborLink {
    /// Index of the neighbor in the fragment grid
    pub index: usize,
    /// `-1` when the neighbor lies in the negative direction
    pub mult: f32,
}

/// One pixel of a triangle's fragment grid
#[derive(Debug, Clone, Copy)]
pub(crate) struct FragmentCell {
    pub bar: BarycentricCoordinates,
    pub inside: bool,
    pub next_x: Option<NeighborLink>,
    pub next_y: Option<NeighborLink>,
}

/// Buffers shared by every stage of a draw call.
///
/// Everything is addressed by index and cleared at the start of a draw, so capacity only ever grows to
/// the largest draw seen so far.
#[derive(Debug, Default)]
pub(crate) struct ScratchArena {
    /// Clip-space position of every shaded vertex, instance major
    pub positions: Vec<Vector4<f32>>,
    /// Varying records of every shaded vertex, `stride` components each
    pub varyings: Vec<f32>,
    pub stride: usize,
    pub triangles: Vec<Triangle>,
    /// Fragment grid of the triangle being rasterized
    pub fragments: Vec<FragmentCell>,
}

impl ScratchArena {
    pub fn with_capacity(vertices: usize, triangles: usize, fragments: usize) -> ScratchArena {
        ScratchArena {
            positions: Vec::with_capacity(vertices),
            varyings: Vec::new(),
            stride: 0,
            triangles: Vec::with_capacity(triangles),
            fragments: Vec::with_capacity(fragments),
        }
    }

    /// Clears all buffers and zeroes room for `vertices` varying records of `stride` components.
    pub fn reset(&mut self, stride: usize, vertices: usize) {
        self.positions.clear();
        self.positions.reserve(vertices);
        self.varyings.clear();
        self.varyings.resize(vertices * stride, 0.0);
        self.stride = stride;
        self.triangles.clear();
        self.fragments.clear();
    }
}

/// Varying record of a shaded vertex inside the arena's varying buffer
#[inline]
pub(crate) fn vertex_record(varyings: &[f32], stride: usize, vertex: usize) -> &[f32] {
    &varyings[vertex * stride..(vertex + 1) * stride]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reset_keeps_capacity() {
        let mut arena = ScratchArena::with_capacity(4, 4, 16);

        arena.reset(3, 100);
        arena.positions.extend((0..100).map(|_| Vector4::zeros()));
        arena.varyings[5] = 1.0;

        let capacity = arena.varyings.capacity();

        arena.reset(3, 10);

        assert!(arena.positions.is_empty());
        assert_eq!(arena.varyings.len(), 30);
        assert_eq!(arena.varyings[5], 0.0);
        assert_eq!(arena.varyings.capacity(), capacity);
        assert_eq!(vertex_record(&arena.varyings, arena.stride, 2), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_stride_records() {
        let mut arena = ScratchArena::default();
        arena.reset(0, 8);

        assert!(vertex_record(&arena.varyings, arena.stride, 7).is_empty());
    }
}
