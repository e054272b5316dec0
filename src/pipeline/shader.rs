//! Shader inputs and outputs

use nalgebra::{Point2, SVector, Vector4};

use crate::color::{predefined, Color};
use crate::geometry::{BarycentricCoordinates, Coordinate};
use crate::model::read_f32;
use crate::varying::{Field, Varying, VaryingsMut};

use super::triangle::Triangle;

/// Everything a vertex shader invocation can read.
#[derive(Debug, Clone, Copy)]
pub struct InVertexInfo<'a> {
    /// Which instance of the model is being drawn
    pub instance_index: usize,
    /// Index of the vertex inside the model's vertex buffer
    pub vertex_index: usize,
    pub vertex: &'a [u8],
    pub instance: Option<&'a [u8]>,
    pub constants: &'a [u8],
}

impl<'a> InVertexInfo<'a> {
    /// The `index`-th `f32` of the vertex data
    #[inline]
    pub fn vertex_f32(&self, index: usize) -> f32 {
        read_f32(self.vertex, index)
    }

    /// `D` consecutive `f32` values of the vertex data, starting at the `first`-th
    #[inline]
    pub fn vertex_vector<const D: usize>(&self, first: usize) -> SVector<f32, D> {
        SVector::from_fn(|i, _| read_f32(self.vertex, first + i))
    }

    #[inline]
    pub fn instance_f32(&self, index: usize) -> Option<f32> {
        self.instance.map(|bytes| read_f32(bytes, index))
    }

    #[inline]
    pub fn constant_f32(&self, index: usize) -> f32 {
        read_f32(self.constants, index)
    }
}

/// Vertex shader output.
pub struct OutVertexInfo<'a> {
    /// Homogeneous clip-space position
    pub position: Vector4<f32>,
    pub varyings: VaryingsMut<'a>,
}

impl<'a> OutVertexInfo<'a> {
    #[inline]
    pub fn set<T: Varying>(&mut self, field: Field<T>, value: T) {
        self.varyings.set(field, value)
    }
}

/// A neighboring fragment used to compute screen-space derivatives
#[derive(Debug, Clone, Copy)]
pub(crate) struct Neighbor {
    pub bar: BarycentricCoordinates,
    /// `-1` when the neighbor lies in the negative direction
    pub mult: f32,
}

/// Everything a fragment shader invocation can read.
pub struct InFragmentInfo<'a> {
    pub(crate) triangle: &'a Triangle,
    pub(crate) pixel: Coordinate,
    pub(crate) bar: BarycentricCoordinates,
    pub(crate) w: f32,
    pub(crate) depth: f32,
    pub(crate) varyings: [&'a [f32]; 3],
    pub(crate) constants: &'a [u8],
    pub(crate) next_x: Option<Neighbor>,
    pub(crate) next_y: Option<Neighbor>,
}

impl<'a> InFragmentInfo<'a> {
    /// Perspective-correct value of a varying at this fragment
    #[inline]
    pub fn interpolate<T: Varying>(&self, field: Field<T>) -> T {
        self.interpolate_at(field, &self.bar)
    }

    /// Difference of a varying between this fragment and its horizontal neighbor.
    ///
    /// Zero for fragments that have no neighbor on either side inside the triangle.
    pub fn derivative_x<T: Varying>(&self, field: Field<T>) -> T {
        self.derivative(field, self.next_x)
    }

    /// Difference of a varying between this fragment and its vertical neighbor.
    pub fn derivative_y<T: Varying>(&self, field: Field<T>) -> T {
        self.derivative(field, self.next_y)
    }

    fn derivative<T: Varying>(&self, field: Field<T>, neighbor: Option<Neighbor>) -> T {
        let start = self.interpolate(field);

        match neighbor {
            Some(Neighbor { bar, mult }) => (self.interpolate_at(field, &bar) - start) * mult,
            None => start - start,
        }
    }

    fn interpolate_at<T: Varying>(&self, field: Field<T>, bar: &BarycentricCoordinates) -> T {
        let weights = self.triangle.perspective_weights(bar);
        let offset = field.offset();

        T::barycentric_interpolate(weights.x, &T::read(&self.varyings[0][offset..]),
                                   weights.y, &T::read(&self.varyings[1][offset..]),
                                   weights.z, &T::read(&self.varyings[2][offset..]))
    }

    /// Discrete pixel position
    #[inline]
    pub fn pixel(&self) -> Coordinate { self.pixel }

    /// Raster-space position of the pixel center
    #[inline]
    pub fn position(&self) -> Point2<f32> {
        let (x, y) = self.pixel.center();
        Point2::new(x, y)
    }

    /// Screen-space barycentric coordinates, without perspective correction
    #[inline]
    pub fn bar_coords(&self) -> BarycentricCoordinates { self.bar }

    /// Interpolated clip-space `W`
    #[inline]
    pub fn w(&self) -> f32 { self.w }

    /// Interpolated depth in `[0, 1]`
    #[inline]
    pub fn depth(&self) -> f32 { self.depth }

    #[inline]
    pub fn constants(&self) -> &'a [u8] { self.constants }

    #[inline]
    pub fn constant_f32(&self, index: usize) -> f32 {
        read_f32(self.constants, index)
    }
}

/// Fragment shader output. The depth starts out as the interpolated depth of the fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutFragmentInfo {
    pub color: Color,
    pub depth: f32,
}

impl OutFragmentInfo {
    #[inline]
    pub(crate) fn new(depth: f32) -> OutFragmentInfo {
        OutFragmentInfo { color: predefined::BLACK, depth }
    }
}

/// Whether a shaded fragment is written to the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fragment {
    Keep,
    Discard,
}
