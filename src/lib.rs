//! CPU Software Rasterizer in Rust
//!
//! [Documentation](https://docs.rs/softraster/)
//!
//! Turns indexed triangle geometry and programmable vertex and fragment shaders into colors and depth values
//! in CPU memory, without any GPU involvement.
//!
//! ### Features:
//!
//! * Rendering pipeline with user-defined vertex and fragment shaders, as plain closures.
//! * Typed varyings, declared once in a [`VaryingLayout`] and accessed through [`Field`] handles.
//! * Perspective-correct interpolation of every varying.
//! * Screen-space derivatives of varyings in the fragment shader.
//! * Configurable depth testing, with early or late testing depending on whether the fragment shader
//! writes depth.
//! * Fixed-function blending with the classic set of blend factors and operators.
//! * Back/front face culling and gamma correction.
//! * Textures with mip chains and a sampler with wrap modes and point, bilinear and trilinear filtering.
//! * Instanced drawing.
//! * Built-in compatibility with the `image` crate, using the `image_compat` cargo feature.
//!
//! ### Coordinate conventions
//!
//! Images have their origin at the bottom-left pixel with Y growing upward. Pixel centers are sampled
//! at `(x + 0.5, y + 0.5)`. Depth is in `[0, 1]`, where `0` is nearest.
//!
//! ### Known limitations
//!
//! There is no clipping against the near and far planes. A triangle with any vertex outside of the
//! `[0, 1]` depth range is dropped entirely.
//!
//! Rendering is single-threaded.

pub mod error;
pub mod geometry;
pub mod color;
pub mod interpolate;
pub mod varying;
pub mod framebuffer;
pub mod model;
pub mod pipeline;
pub mod rasterizer;
pub mod texture;

#[cfg(feature = "image_compat")]
pub mod image_compat;

pub use error::{RenderError, RenderResult};
pub use geometry::{BarycentricCoordinates, BarycentricHelper, Bounds2i, Coordinate, CullFace, Dimensions,
                   HasDimensions, WindingOrder};
pub use color::{Blend, BlendFactor, BlendOperator, BlendState, Color};
pub use interpolate::Interpolate;
pub use varying::{Field, Varying, VaryingLayout, VaryingsMut};
pub use framebuffer::{Image, RenderBuffer};
pub use model::Model;
pub use pipeline::{DepthState, DepthTest, Fragment, InFragmentInfo, InVertexInfo, OutFragmentInfo, OutVertexInfo,
                   Pipeline, PipelineBuilder, Triangle};
pub use rasterizer::{DrawStats, Rasterizer, RasterizerConfig};
pub use texture::{Filter, Sampler2D, SamplerState, Texture, Wrap};
