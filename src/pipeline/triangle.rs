//! Per-primitive working data

use std::ops::Range;

use nalgebra::{Point3, Vector4};

use crate::geometry::{BarycentricCoordinates, BarycentricHelper, Bounds2i, Dimensions, WindingOrder};

/// Converts a point from normalized device coordinates to raster space, keeping its depth.
///
/// NDC `[-1, 1]` maps onto `[0, width]` and `[0, height]`, with `-1` at the left and bottom edges.
#[inline]
pub fn ndc_to_raster(ndc: Point3<f32>, dimensions: Dimensions) -> Point3<f32> {
    Point3::new((1.0 + ndc.x) * 0.5 * dimensions.width as f32,
                (1.0 + ndc.y) * 0.5 * dimensions.height as f32,
                ndc.z)
}

/// Inverse of [`ndc_to_raster`]
#[inline]
pub fn raster_to_ndc(raster: Point3<f32>, dimensions: Dimensions) -> Point3<f32> {
    Point3::new(raster.x / dimensions.width as f32 * 2.0 - 1.0,
                raster.y / dimensions.height as f32 * 2.0 - 1.0,
                raster.z)
}

/// A triangle after vertex shading and perspective division, alive for the duration of one draw call.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub(crate) primitive_index: usize,
    pub(crate) instance_index: usize,
    /// Index of each vertex's shader output in the draw's vertex arena
    pub(crate) vertices: [usize; 3],
    pub(crate) positions: [Point3<f32>; 3],
    pub(crate) w: [f32; 3],
    pub(crate) one_over_w: [f32; 3],
    pub(crate) one_over_depth: [f32; 3],
    pub(crate) bounds: Bounds2i,
    pub(crate) helper: BarycentricHelper,
    /// Dense grid of classified fragments covering `bounds`, stored in the draw's fragment arena
    pub(crate) fragments: Range<usize>,
}

impl Triangle {
    /// Performs the perspective divide and the viewport transform of three clip-space positions.
    ///
    /// `winding` is the winding order the triangle is expected to have. The bounding box is clipped to
    /// `image_bounds`; the fragment range is left empty.
    pub(crate) fn setup(primitive_index: usize,
                        instance_index: usize,
                        vertices: [usize; 3],
                        clip: [Vector4<f32>; 3],
                        dimensions: Dimensions,
                        image_bounds: Bounds2i,
                        winding: WindingOrder) -> Triangle {
        let w = [clip[0].w, clip[1].w, clip[2].w];
        let one_over_w = [1.0 / w[0], 1.0 / w[1], 1.0 / w[2]];

        let positions = [
            ndc_to_raster(Point3::from(clip[0].xyz() * one_over_w[0]), dimensions),
            ndc_to_raster(Point3::from(clip[1].xyz() * one_over_w[1]), dimensions),
            ndc_to_raster(Point3::from(clip[2].xyz() * one_over_w[2]), dimensions),
        ];

        let one_over_depth = [1.0 / positions[0].z, 1.0 / positions[1].z, 1.0 / positions[2].z];

        let min = (positions[0].x.min(positions[1].x).min(positions[2].x),
                   positions[0].y.min(positions[1].y).min(positions[2].y));
        let max = (positions[0].x.max(positions[1].x).max(positions[2].x),
                   positions[0].y.max(positions[1].y).max(positions[2].y));

        let bounds = Bounds2i::from_continuous(min, max).intersect(&image_bounds);

        Triangle {
            primitive_index,
            instance_index,
            vertices,
            positions,
            w,
            one_over_w,
            one_over_depth,
            bounds,
            helper: BarycentricHelper::new(winding, &positions),
            fragments: 0..0,
        }
    }

    /// Whether every raster position and `W` is a finite number
    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) &&
            self.w.iter().all(|w| w.is_finite())
    }

    /// Whether any vertex lies in front of the near plane or past the far plane
    pub fn exceeds_depth_range(&self) -> bool {
        self.positions.iter().any(|p| !(0.0..=1.0).contains(&p.z))
    }

    /// Index of the triangle inside the model's index buffer
    #[inline]
    pub fn primitive_index(&self) -> usize { self.primitive_index }

    #[inline]
    pub fn instance_index(&self) -> usize { self.instance_index }

    /// Raster-space positions, with X and Y in pixels and Z the normalized depth
    #[inline]
    pub fn positions(&self) -> &[Point3<f32>; 3] { &self.positions }

    /// Clip-space `W` of each vertex
    #[inline]
    pub fn w(&self) -> &[f32; 3] { &self.w }

    #[inline]
    pub fn one_over_w(&self) -> &[f32; 3] { &self.one_over_w }

    #[inline]
    pub fn one_over_depth(&self) -> &[f32; 3] { &self.one_over_depth }

    /// Pixel rectangle covered by the triangle, clipped to the image
    #[inline]
    pub fn bounds(&self) -> Bounds2i { self.bounds }

    #[inline]
    pub fn helper(&self) -> &BarycentricHelper { &self.helper }

    /// Interpolated clip-space `W` at the given screen-space barycentric coordinates
    #[inline]
    pub fn interpolate_w(&self, bar: &BarycentricCoordinates) -> f32 {
        1.0 / bar.interpolate(&self.one_over_w)
    }

    /// Weights that interpolate vertex attributes perspective-correctly at the given screen-space coordinates.
    #[inline]
    pub fn perspective_weights(&self, bar: &BarycentricCoordinates) -> BarycentricCoordinates {
        let w = self.interpolate_w(bar);

        BarycentricCoordinates::new(bar.x * self.one_over_w[0] * w,
                                    bar.y * self.one_over_w[1] * w,
                                    bar.z * self.one_over_w[2] * w)
    }

    /// Depth at the given screen-space coordinates.
    ///
    /// Raster-space depth is affine in screen space, so it is interpolated without perspective correction.
    #[inline]
    pub fn interpolate_depth(&self, bar: &BarycentricCoordinates) -> f32 {
        let [z0, z1, z2] = [self.positions[0].z, self.positions[1].z, self.positions[2].z];

        z0 + bar.y * (z1 - z0) + bar.z * (z2 - z0)
    }
}
