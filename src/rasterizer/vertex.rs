//! Vertex shading stage

use nalgebra::Vector4;

use crate::model::Model;
use crate::pipeline::{InVertexInfo, OutVertexInfo, Pipeline};
use crate::varying::VaryingsMut;

use super::arena::ScratchArena;

/// Runs the vertex shader once for every vertex of every instance, filling the arena's position and
/// varying buffers. Vertex `v` of instance `i` is stored at record `i * vertex_count + v`.
///
/// Returns the number of shader invocations.
pub(crate) fn run_vertex_shaders(pipeline: &Pipeline, model: &Model, arena: &mut ScratchArena) -> usize {
    let stride = pipeline.varyings().stride();
    let vertex_count = model.vertex_count();
    let total = vertex_count * model.instance_count();

    arena.reset(stride, total);

    let shader = pipeline.vertex_shader();

    for instance_index in 0..model.instance_count() {
        let instance = model.instance(instance_index);

        for vertex_index in 0..vertex_count {
            let record = instance_index * vertex_count + vertex_index;

            let input = InVertexInfo {
                instance_index,
                vertex_index,
                vertex: model.vertex(vertex_index),
                instance,
                constants: model.constants(),
            };

            let mut output = OutVertexInfo {
                position: Vector4::new(0.0, 0.0, 0.0, 1.0),
                varyings: VaryingsMut::new(&mut arena.varyings[record * stride..(record + 1) * stride]),
            };

            shader(&input, &mut output);

            arena.positions.push(output.position);
        }
    }

    total
}
