//! Declarative rendering state: shaders, varyings, blending, depth testing, culling and gamma

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::color::{Blend, BlendState, Color};
use crate::geometry::{CullFace, WindingOrder};
use crate::varying::VaryingLayout;

pub mod depth;
pub mod shader;
pub mod triangle;

pub use self::depth::{DepthState, DepthTest};
pub use self::shader::{Fragment, InFragmentInfo, InVertexInfo, OutFragmentInfo, OutVertexInfo};
pub use self::triangle::{ndc_to_raster, raster_to_ndc, Triangle};

/// Transforms a single vertex into clip space and fills its varying record.
pub type VertexShader = Arc<dyn Fn(&InVertexInfo, &mut OutVertexInfo) + Send + Sync>;

/// Colors a single fragment, optionally replacing its depth or discarding it.
pub type FragmentShader = Arc<dyn Fn(&Triangle, &InFragmentInfo, &mut OutFragmentInfo) -> Fragment + Send + Sync>;

/// Complete rendering configuration for a draw call.
///
/// A pipeline is immutable once built and shared between models through an `Arc`. Create one with
/// [`PipelineBuilder`].
#[derive(Clone)]
pub struct Pipeline {
    vertex_shader: VertexShader,
    fragment_shader: FragmentShader,
    varyings: VaryingLayout,
    blend: BlendState,
    depth: DepthState,
    winding_order: WindingOrder,
    cull_face: CullFace,
    gamma: f32,
    gamma_correction: bool,
}

impl Pipeline {
    /// Blends the shaded fragment color over the color already in the image
    #[inline]
    pub fn blend(&self, src: Color, dst: Color) -> Color {
        self.blend.blend(src, dst)
    }

    /// Returns true if a fragment with the `candidate` depth should replace one at the `current` depth.
    #[inline]
    pub fn depth_test(&self, candidate: f32, current: f32) -> bool {
        self.depth.test.compare(candidate, current)
    }

    #[inline]
    pub fn vertex_shader(&self) -> &VertexShader { &self.vertex_shader }

    #[inline]
    pub fn fragment_shader(&self) -> &FragmentShader { &self.fragment_shader }

    #[inline]
    pub fn varyings(&self) -> &VaryingLayout { &self.varyings }

    #[inline]
    pub fn blend_state(&self) -> &BlendState { &self.blend }

    #[inline]
    pub fn depth_state(&self) -> &DepthState { &self.depth }

    /// Winding order of front faces
    #[inline]
    pub fn winding_order(&self) -> WindingOrder { self.winding_order }

    #[inline]
    pub fn cull_face(&self) -> CullFace { self.cull_face }

    #[inline]
    pub fn gamma(&self) -> f32 { self.gamma }

    #[inline]
    pub fn gamma_correction(&self) -> bool { self.gamma_correction }
}

impl Debug for Pipeline {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("Pipeline")
            .field("varyings", &self.varyings)
            .field("blend", &self.blend)
            .field("depth", &self.depth)
            .field("winding_order", &self.winding_order)
            .field("cull_face", &self.cull_face)
            .field("gamma", &self.gamma)
            .field("gamma_correction", &self.gamma_correction)
            .finish()
    }
}

/// Builder for [`Pipeline`].
///
/// Defaults: blending replaces the destination, depth testing with `Less`, counter-clockwise front faces,
/// back faces culled, gamma 2.2 without correction, and no varyings.
#[derive(Clone)]
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl Debug for PipelineBuilder {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("PipelineBuilder").field("pipeline", &self.pipeline).finish()
    }
}

impl PipelineBuilder {
    pub fn new<V, F>(vertex_shader: V, fragment_shader: F) -> PipelineBuilder
        where V: Fn(&InVertexInfo, &mut OutVertexInfo) + Send + Sync + 'static,
              F: Fn(&Triangle, &InFragmentInfo, &mut OutFragmentInfo) -> Fragment + Send + Sync + 'static {
        PipelineBuilder {
            pipeline: Pipeline {
                vertex_shader: Arc::new(vertex_shader),
                fragment_shader: Arc::new(fragment_shader),
                varyings: VaryingLayout::new(),
                blend: BlendState::default(),
                depth: DepthState::default(),
                winding_order: WindingOrder::CounterClockwise,
                cull_face: CullFace::Back,
                gamma: 2.2,
                gamma_correction: false,
            }
        }
    }

    /// Layout of the records written by the vertex shader
    pub fn varyings(mut self, varyings: VaryingLayout) -> PipelineBuilder {
        self.pipeline.varyings = varyings;
        self
    }

    pub fn blend(mut self, blend: BlendState) -> PipelineBuilder {
        self.pipeline.blend = blend;
        self
    }

    pub fn depth_test(mut self, test: DepthTest) -> PipelineBuilder {
        self.pipeline.depth.test = test;
        self
    }

    pub fn depth_test_enabled(mut self, enabled: bool) -> PipelineBuilder {
        self.pipeline.depth.enabled = enabled;
        self
    }

    /// Run the fragment shader before the depth test, using the depth it outputs
    pub fn fragment_shader_writes_depth(mut self, writes_depth: bool) -> PipelineBuilder {
        self.pipeline.depth.fragment_shader_writes_depth = writes_depth;
        self
    }

    pub fn winding_order(mut self, winding_order: WindingOrder) -> PipelineBuilder {
        self.pipeline.winding_order = winding_order;
        self
    }

    pub fn cull_face(mut self, cull_face: CullFace) -> PipelineBuilder {
        self.pipeline.cull_face = cull_face;
        self
    }

    pub fn gamma(mut self, gamma: f32) -> PipelineBuilder {
        self.pipeline.gamma = gamma;
        self
    }

    pub fn gamma_correction(mut self, enabled: bool) -> PipelineBuilder {
        self.pipeline.gamma_correction = enabled;
        self
    }

    pub fn build(self) -> Pipeline {
        self.pipeline
    }

    pub fn build_shared(self) -> Arc<Pipeline> {
        Arc::new(self.pipeline)
    }
}
