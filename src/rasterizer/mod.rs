//! The rasterizer drives a model through every pipeline stage into an image.
//!
//! A draw call runs these stages in order:
//!
//! 1. Vertex shading, once per vertex and instance
//! 2. Triangle setup: perspective divide and viewport transform
//! 3. Discard pass: non-finite, out of depth range, culled, zero area or off-image triangles are dropped
//! 4. Fragment classification over each triangle's bounding box
//! 5. Neighbor linking for screen-space derivatives
//! 6. Depth testing and fragment shading, early or late depending on the pipeline
//! 7. Blending, gamma correction and writeback
//!
//! Triangles are rasterized in submission order, instance major, so when depths tie under an inclusive
//! comparator the later triangle wins.

use log::{debug, trace, warn};
use nalgebra::Point3;

use crate::framebuffer::Image;
use crate::geometry::Dimensions;
use crate::model::Model;
use crate::pipeline;

pub(crate) mod arena;
pub(crate) mod vertex;
pub(crate) mod setup;
pub(crate) mod fragment;

use self::arena::ScratchArena;

/// Counters collected during a single draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawStats {
    /// Vertex shader invocations
    pub vertices_shaded: usize,
    /// Triangles read from the index buffer, counting every instance
    pub triangles_submitted: usize,
    /// Triangles dropped before rasterization
    pub triangles_discarded: usize,
    pub triangles_rasterized: usize,
    /// Fragments found inside rasterized triangles
    pub fragments_generated: usize,
    /// Fragment shader invocations
    pub fragments_shaded: usize,
    /// Fragments whose color was written to the image
    pub fragments_written: usize,
}

/// Initial sizes of the rasterizer's internal buffers.
///
/// Buffers grow as needed, these only avoid reallocations during the first few draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizerConfig {
    pub vertex_capacity: usize,
    pub triangle_capacity: usize,
    pub fragment_capacity: usize,
}

impl Default for RasterizerConfig {
    fn default() -> RasterizerConfig {
        RasterizerConfig {
            vertex_capacity: 1024,
            triangle_capacity: 1024,
            fragment_capacity: 64 * 64,
        }
    }
}

/// Single-threaded software rasterizer.
///
/// The rasterizer owns no image and no pipeline; it only keeps scratch buffers that are reused between draws.
#[derive(Debug)]
pub struct Rasterizer {
    arena: ScratchArena,
}

impl Default for Rasterizer {
    fn default() -> Rasterizer { Rasterizer::new() }
}

impl Rasterizer {
    pub fn new() -> Rasterizer {
        Rasterizer::with_config(RasterizerConfig::default())
    }

    pub fn with_config(config: RasterizerConfig) -> Rasterizer {
        Rasterizer {
            arena: ScratchArena::with_capacity(config.vertex_capacity,
                                               config.triangle_capacity,
                                               config.fragment_capacity),
        }
    }

    /// Converts a point from normalized device coordinates to raster space for an image of the given size
    #[inline]
    pub fn ndc_to_raster(ndc: Point3<f32>, dimensions: Dimensions) -> Point3<f32> {
        pipeline::ndc_to_raster(ndc, dimensions)
    }

    #[inline]
    pub fn raster_to_ndc(raster: Point3<f32>, dimensions: Dimensions) -> Point3<f32> {
        pipeline::raster_to_ndc(raster, dimensions)
    }

    /// Renders the model with its pipeline into the image.
    ///
    /// A model without a pipeline draws nothing.
    ///
    /// # Panics
    ///
    /// Only if a shader panics, or a varying handle from another layout is used.
    pub fn draw<I>(&mut self, model: &Model, image: &mut I) -> DrawStats where I: Image + ?Sized {
        let pipeline = match model.pipeline() {
            Some(pipeline) => pipeline,
            None => {
                warn!("model {:?} has no pipeline, skipping draw", model);
                return DrawStats::default();
            }
        };

        let dimensions = image.dimensions();
        let image_bounds = image.bounds();

        debug!("drawing {:?} into a {}x{} image with {:?}", model, dimensions.width, dimensions.height, pipeline);

        let mut stats = DrawStats::default();

        stats.vertices_shaded = vertex::run_vertex_shaders(pipeline, model, &mut self.arena);

        let ScratchArena { ref positions, ref varyings, stride, ref mut triangles, ref mut fragments } = self.arena;

        let vertex_count = model.vertex_count();

        for instance in 0..model.instance_count() {
            let base = instance * vertex_count;

            for (primitive, indices) in model.indices().chunks_exact(3).enumerate() {
                stats.triangles_submitted += 1;

                let vertices = [
                    base + indices[0] as usize,
                    base + indices[1] as usize,
                    base + indices[2] as usize,
                ];

                match setup::setup_triangle(pipeline, primitive, instance, vertices, positions, dimensions, image_bounds) {
                    Ok(triangle) => triangles.push(triangle),
                    Err(reason) => {
                        trace!("discarding triangle {} of instance {}: {}", primitive, instance, reason);
                        stats.triangles_discarded += 1;
                    }
                }
            }
        }

        for triangle in triangles.iter_mut() {
            // Grids are only needed while their triangle is shaded
            fragments.clear();

            stats.fragments_generated += fragment::classify_fragments(triangle, fragments);

            fragment::link_neighbors(triangle, fragments);

            fragment::shade_fragments(pipeline, triangle, fragments, varyings, stride, model.constants(), image, &mut stats);

            stats.triangles_rasterized += 1;
        }

        trace!("draw finished: {:?}", stats);

        stats
    }
}
