//! Interpolation utilities

use std::ops::{Add, Mul};

use nalgebra::{SMatrix, Scalar};

/// Describes a type that can be interpolated with barycentric coordinates.
///
/// This is required for any rasterization to occur. Weights are always `f32`, since raster space and
/// the perspective correction factors are computed in single precision.
///
/// See [This document](https://classes.soe.ucsc.edu/cmps160/Fall10/resources/barycentricInterpolation.pdf) for more information.
pub trait Interpolate: Sized {
    /// Interpolate the three values with their corresponding barycentric coordinate weight
    fn barycentric_interpolate(u: f32, ux: &Self, v: f32, vx: &Self, w: f32, wx: &Self) -> Self;
}

/// Convenience method for linearly interpolating two values
#[inline]
pub fn linear_interpolate<T>(t: f32, x1: T, x2: T) -> T where T: Add<Output=T> + Mul<f32, Output=T> {
    x1 * (1.0 - t) + x2 * t
}

impl Interpolate for f32 {
    #[inline(always)]
    fn barycentric_interpolate(u: f32, ux: &f32, v: f32, vx: &f32, w: f32, wx: &f32) -> f32 {
        ux * u + vx * v + wx * w
    }
}

impl<N, const R: usize, const C: usize> Interpolate for SMatrix<N, R, C> where N: Scalar + Interpolate {
    #[inline]
    fn barycentric_interpolate(u: f32, ux: &Self, v: f32, vx: &Self, w: f32, wx: &Self) -> Self {
        SMatrix::from_fn(|row, col| {
            N::barycentric_interpolate(u, &ux[(row, col)], v, &vx[(row, col)], w, &wx[(row, col)])
        })
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{Vector3, Vector4};

    use super::*;

    #[test]
    fn test_vector_interpolation() {
        let v = Vector3::barycentric_interpolate(0.5, &Vector3::new(1.0, 0.0, 0.0),
                                                 0.25, &Vector3::new(0.0, 1.0, 0.0),
                                                 0.25, &Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(v, Vector3::new(0.5, 0.25, 0.25));
    }

    #[test]
    fn test_scalar_weights_at_vertex() {
        assert_eq!(f32::barycentric_interpolate(0.0, &3.0, 1.0, &7.5, 0.0, &-2.0), 7.5);
    }

    #[test]
    fn test_linear_interpolation() {
        let c = linear_interpolate(0.25, Vector4::new(0.0f32, 4.0, 8.0, 1.0), Vector4::new(8.0, 0.0, 0.0, 1.0));

        assert_eq!(c, Vector4::new(2.0, 3.0, 6.0, 1.0));
    }
}
