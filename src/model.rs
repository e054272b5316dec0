//! Indexed geometry submitted to the rasterizer

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::pipeline::Pipeline;

/// Packs `f32` values into native-endian bytes, the layout the shader input helpers read.
pub fn pack_f32(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|value| value.to_ne_bytes()).collect()
}

/// Reads the `index`-th `f32` of a packed buffer
#[inline]
pub(crate) fn read_f32(bytes: &[u8], index: usize) -> f32 {
    let start = index * 4;
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[start..start + 4]);
    f32::from_ne_bytes(raw)
}

/// Triangle geometry with indexed vertices.
///
/// Vertex and instance data are opaque byte buffers with a fixed stride; only the vertex shader interprets
/// them. The model is never modified by a draw call.
#[derive(Clone)]
pub struct Model {
    pipeline: Option<Arc<Pipeline>>,
    vertex_data: Vec<u8>,
    vertex_stride: usize,
    /// Vertex indices
    ///
    /// If you are unfamiliar with vertex indices, it's a way of re-using vertices for multiple primitives.
    ///
    /// For example, for a rectangle made of two triangles, you would define the four points for each corner vertex:
    ///
    /// ```text
    /// vertex #: name         = (x,   y)
    /// 0:        bottom_left  = (0.0, 0.0)
    /// 1:        bottom_right = (1.0, 0.0)
    /// 2:        top_right    = (1.0, 1.0)
    /// 3:        top_left     = (0.0, 1.0)
    /// ```
    ///
    /// then you'd have your index list be something like:
    ///
    /// ```text
    /// [0, 1, 2, // bottom right half
    ///  0, 2, 3] // top left half
    /// ```
    ///
    /// Note that both of those triangles go in a counter-clockwise direction from vertex to vertex.
    indices: Vec<u32>,
    instance_data: Option<Vec<u8>>,
    instance_stride: usize,
    instance_count: usize,
    constants: Vec<u8>,
}

impl Model {
    /// Creates a model drawn once, without instance data or constants.
    ///
    /// # Panics
    ///
    /// If the stride is zero, the vertex buffer is not a whole number of vertices, the index count is not a
    /// multiple of three, or an index refers to a vertex past the end of the buffer.
    pub fn new(vertex_data: Vec<u8>, vertex_stride: usize, indices: Vec<u32>) -> Model {
        assert!(vertex_stride > 0, "vertex stride must be non-zero");
        assert_eq!(vertex_data.len() % vertex_stride, 0,
                   "vertex buffer of {} bytes is not a multiple of the {} byte stride", vertex_data.len(), vertex_stride);
        assert_eq!(indices.len() % 3, 0, "index count {} is not a multiple of 3", indices.len());

        let vertex_count = vertex_data.len() / vertex_stride;

        if let Some(index) = indices.iter().find(|&&index| index as usize >= vertex_count) {
            panic!("index {} out of range for {} vertices", index, vertex_count);
        }

        Model {
            pipeline: None,
            vertex_data,
            vertex_stride,
            indices,
            instance_data: None,
            instance_stride: 0,
            instance_count: 1,
            constants: Vec::new(),
        }
    }

    /// Creates a model from tightly packed `f32` vertex attributes.
    pub fn from_f32(vertices: &[f32], floats_per_vertex: usize, indices: Vec<u32>) -> Model {
        Model::new(pack_f32(vertices), floats_per_vertex * 4, indices)
    }

    pub fn with_pipeline(mut self, pipeline: Arc<Pipeline>) -> Model {
        self.pipeline = Some(pipeline);
        self
    }

    /// Draws the model `count` times, handing the `i`-th `stride` bytes of `data` to every vertex of instance `i`.
    ///
    /// # Panics
    ///
    /// If the stride is zero or the buffer does not hold exactly `count` instances.
    pub fn with_instances(mut self, data: Vec<u8>, stride: usize, count: usize) -> Model {
        assert!(stride > 0, "instance stride must be non-zero");
        assert_eq!(data.len(), stride * count,
                   "instance buffer of {} bytes does not hold {} instances of {} bytes", data.len(), count, stride);

        self.instance_data = Some(data);
        self.instance_stride = stride;
        self.instance_count = count;
        self
    }

    /// Bytes shared by every shader invocation of a draw call
    pub fn with_constants(mut self, constants: Vec<u8>) -> Model {
        self.constants = constants;
        self
    }

    pub fn set_pipeline(&mut self, pipeline: Option<Arc<Pipeline>>) {
        self.pipeline = pipeline;
    }

    pub fn set_constants(&mut self, constants: Vec<u8>) {
        self.constants = constants;
    }

    #[inline]
    pub fn pipeline(&self) -> Option<&Arc<Pipeline>> { self.pipeline.as_ref() }

    #[inline]
    pub fn indices(&self) -> &[u32] { &self.indices }

    #[inline]
    pub fn vertex_count(&self) -> usize { self.vertex_data.len() / self.vertex_stride }

    #[inline]
    pub fn vertex_stride(&self) -> usize { self.vertex_stride }

    #[inline]
    pub fn triangle_count(&self) -> usize { self.indices.len() / 3 }

    /// Number of times the model is drawn. One when no instance buffer is attached.
    #[inline]
    pub fn instance_count(&self) -> usize { self.instance_count }

    #[inline]
    pub fn constants(&self) -> &[u8] { &self.constants }

    /// Bytes of a single vertex
    #[inline]
    pub fn vertex(&self, index: usize) -> &[u8] {
        let start = index * self.vertex_stride;
        &self.vertex_data[start..start + self.vertex_stride]
    }

    /// Bytes of a single instance, if an instance buffer is attached
    #[inline]
    pub fn instance(&self, index: usize) -> Option<&[u8]> {
        let stride = self.instance_stride;

        self.instance_data.as_ref().map(|data| &data[index * stride..(index + 1) * stride])
    }
}

impl Debug for Model {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "Model {{ vertices: {}, triangles: {}, instances: {}, pipeline: {} }}",
               self.vertex_count(), self.triangle_count(), self.instance_count, self.pipeline.is_some())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_vertex_access() {
        let model = Model::from_f32(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 2, vec![0, 1, 2]);

        assert_eq!(model.vertex_count(), 3);
        assert_eq!(model.triangle_count(), 1);
        assert_eq!(model.instance_count(), 1);
        assert_eq!(read_f32(model.vertex(2), 1), 5.0);
        assert!(model.instance(0).is_none());
    }

    #[test]
    fn test_instances() {
        let model = Model::from_f32(&[0.0; 9], 3, vec![0, 1, 2])
            .with_instances(pack_f32(&[1.0, 2.0]), 4, 2);

        assert_eq!(model.instance_count(), 2);
        assert_eq!(model.instance(1).map(|bytes| read_f32(bytes, 0)), Some(2.0));
    }

    #[test]
    #[should_panic]
    fn test_partial_triangle_panics() {
        Model::from_f32(&[0.0; 6], 2, vec![0, 1]);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        Model::from_f32(&[0.0; 6], 2, vec![0, 1, 3]);
    }

    #[test]
    #[should_panic]
    fn test_ragged_vertex_buffer_panics() {
        Model::new(vec![0; 10], 4, vec![]);
    }
}
