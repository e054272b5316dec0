//! Triangle setup and the discard pass

use std::fmt::{Display, Formatter, Result as FmtResult};

use nalgebra::Vector4;

use crate::geometry::{BarycentricHelper, Bounds2i, Dimensions, WindingOrder};
use crate::pipeline::{Pipeline, Triangle};

/// Reason a triangle was dropped before rasterization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    NonFinite,
    DepthRange,
    Culled,
    Degenerate,
    OutOfBounds,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(match *self {
            Rejection::NonFinite => "non-finite position",
            Rejection::DepthRange => "vertex depth outside of [0, 1]",
            Rejection::Culled => "culled",
            Rejection::Degenerate => "zero area",
            Rejection::OutOfBounds => "outside of the image",
        })
    }
}

/// Builds the triangle for three shaded vertices and decides whether it gets rasterized.
///
/// On success the triangle's barycentric helper expects the winding the triangle actually has, so every
/// surviving triangle covers its pixels.
pub(crate) fn setup_triangle(pipeline: &Pipeline,
                             primitive_index: usize,
                             instance_index: usize,
                             vertices: [usize; 3],
                             positions: &[Vector4<f32>],
                             dimensions: Dimensions,
                             image_bounds: Bounds2i) -> Result<Triangle, Rejection> {
    let front = pipeline.winding_order();

    let clip = [positions[vertices[0]], positions[vertices[1]], positions[vertices[2]]];

    let mut triangle = Triangle::setup(primitive_index, instance_index, vertices, clip,
                                       dimensions, image_bounds, front);

    if !triangle.is_finite() {
        return Err(Rejection::NonFinite);
    }

    // Coarse near/far rejection in place of clipping
    if triangle.exceeds_depth_range() {
        return Err(Rejection::DepthRange);
    }

    if triangle.helper.is_degenerate() {
        return Err(Rejection::Degenerate);
    }

    let kept = match pipeline.cull_face().kept_winding(front) {
        Some(kept) => kept,
        None => WindingOrder::from_signed_area(triangle.helper.signed_area()),
    };

    match kept {
        Some(winding) => {
            if winding != front {
                triangle.helper = BarycentricHelper::new(winding, &triangle.positions);
            }

            if !triangle.helper.is_winding_order_correct() {
                return Err(Rejection::Culled);
            }
        }
        None => return Err(Rejection::Culled),
    }

    if triangle.bounds.is_empty() {
        return Err(Rejection::OutOfBounds);
    }

    Ok(triangle)
}
