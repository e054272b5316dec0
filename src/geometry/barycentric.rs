//! Barycentric coordinates and the triangle coverage rule

use std::ops::Index;

use nalgebra::{Point3, Vector2};

use super::{Coordinate, WindingOrder};

/// Weights of the three triangle vertices for some point, such that the point equals
/// `x * P0 + y * P1 + z * P2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarycentricCoordinates {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl BarycentricCoordinates {
    #[inline(always)]
    pub fn new(x: f32, y: f32, z: f32) -> BarycentricCoordinates {
        BarycentricCoordinates { x, y, z }
    }

    /// Linear interpolation of one scalar per vertex
    #[inline]
    pub fn interpolate(&self, values: &[f32; 3]) -> f32 {
        self.x * values[0] + self.y * values[1] + self.z * values[2]
    }

    #[inline]
    pub fn sum(&self) -> f32 {
        self.x + self.y + self.z
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Index<usize> for BarycentricCoordinates {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("barycentric coordinate index {} out of range", index),
        }
    }
}

#[inline(always)]
fn cross_2d(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Edge function of the directed edge `from -> to` at `point`, positive on its left.
///
/// Always evaluated from the lexicographically smaller endpoint, so that the same edge traversed in
/// the opposite direction yields exactly the negated value.
#[inline]
fn edge_function(from: Vector2<f32>, to: Vector2<f32>, point: Vector2<f32>) -> f32 {
    if (from.x, from.y) <= (to.x, to.y) {
        cross_2d(to - from, point - from)
    } else {
        -cross_2d(from - to, point - to)
    }
}

/// Precomputed edge data for one triangle in raster space.
///
/// The depth of the points is ignored, only X and Y take part in the computation.
#[derive(Debug, Clone, Copy)]
pub struct BarycentricHelper {
    winding: WindingOrder,
    points: [Vector2<f32>; 3],
    edges: [Vector2<f32>; 3],
    signed_area: f32,
    // Zero for degenerate triangles, so no coordinate ever comes out of a division by zero
    one_over_area: f32,
}

impl BarycentricHelper {
    /// Creates the helper for a triangle that is expected to have the given winding order.
    pub fn new(winding: WindingOrder, points: &[Point3<f32>; 3]) -> BarycentricHelper {
        let points = [points[0].xy().coords, points[1].xy().coords, points[2].xy().coords];

        let edges = [
            points[2] - points[1],
            points[0] - points[2],
            points[1] - points[0],
        ];

        let signed_area = cross_2d(edges[2], points[2] - points[0]);

        let one_over_area = if signed_area != 0.0 && signed_area.is_finite() {
            1.0 / signed_area.abs()
        } else {
            0.0
        };

        BarycentricHelper { winding, points, edges, signed_area, one_over_area }
    }

    /// Twice the signed area of the triangle. Positive for counter-clockwise triangles.
    #[inline]
    pub fn signed_area(&self) -> f32 { self.signed_area }

    #[inline]
    pub fn winding(&self) -> WindingOrder { self.winding }

    /// Zero-area or non-finite triangles cover no pixels at all
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.one_over_area == 0.0
    }

    /// Whether the triangle's actual winding matches the one it was created with
    #[inline]
    pub fn is_winding_order_correct(&self) -> bool {
        !self.is_degenerate() && self.signed_area * self.winding.sign() > 0.0
    }

    /// Coordinates of the center of the given pixel
    #[inline]
    pub fn coordinates(&self, pixel: Coordinate) -> BarycentricCoordinates {
        let (x, y) = pixel.center();
        self.coordinates_at(x, y)
    }

    /// Coordinates of an arbitrary point in continuous raster space.
    ///
    /// For triangles with the expected winding, points inside have all coordinates non-negative.
    pub fn coordinates_at(&self, x: f32, y: f32) -> BarycentricCoordinates {
        let point = Vector2::new(x, y);
        let scale = self.one_over_area * self.winding.sign();

        let [p0, p1, p2] = self.points;

        BarycentricCoordinates {
            x: edge_function(p1, p2, point) * scale,
            y: edge_function(p2, p0, point) * scale,
            z: edge_function(p0, p1, point) * scale,
        }
    }

    /// Coverage test with a top-left style tie rule.
    ///
    /// A point lying exactly on an edge is only inside if that edge points "downward" (or leftward
    /// when horizontal) relative to the expected winding. The two triangles sharing an edge traverse it in
    /// opposite directions, so exactly one of them owns pixels on it.
    pub fn is_inside(&self, coords: &BarycentricCoordinates) -> bool {
        if self.is_degenerate() {
            return false;
        }

        if coords.x < 0.0 || coords.y < 0.0 || coords.z < 0.0 {
            return false;
        }

        let sign = self.winding.sign();

        let owns_edge = |edge: &Vector2<f32>| {
            (edge.y == 0.0 && sign * edge.x < 0.0) || sign * edge.y < 0.0
        };

        (coords.x != 0.0 || owns_edge(&self.edges[0])) &&
            (coords.y != 0.0 || owns_edge(&self.edges[1])) &&
            (coords.z != 0.0 || owns_edge(&self.edges[2]))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::geometry::Bounds2i;

    fn ccw_points() -> [Point3<f32>; 3] {
        [Point3::new(10.0, 10.0, 0.5), Point3::new(50.0, 10.0, 0.5), Point3::new(10.0, 50.0, 0.5)]
    }

    #[test]
    fn test_weights_sum_to_one() {
        let helper = BarycentricHelper::new(WindingOrder::CounterClockwise,
                                            &[Point3::new(3.3, 1.7, 0.0),
                                              Point3::new(58.1, 12.9, 0.0),
                                              Point3::new(21.4, 61.2, 0.0)]);

        let mut inside = 0;

        for pixel in Bounds2i::new((0, 0), (64, 64)).pixels() {
            let coords = helper.coordinates(pixel);

            if helper.is_inside(&coords) {
                inside += 1;
                assert!((coords.sum() - 1.0).abs() < 1e-5, "{:?} sums to {}", coords, coords.sum());
                assert!(coords.x >= 0.0 && coords.y >= 0.0 && coords.z >= 0.0);
            }
        }

        assert!(inside > 0);
    }

    #[test]
    fn test_coordinates_reproduce_point() {
        let points = ccw_points();
        let helper = BarycentricHelper::new(WindingOrder::CounterClockwise, &points);

        let c = helper.coordinates(Coordinate::new(20, 15));
        let x = c.interpolate(&[points[0].x, points[1].x, points[2].x]);
        let y = c.interpolate(&[points[0].y, points[1].y, points[2].y]);

        assert!((x - 20.5).abs() < 1e-4);
        assert!((y - 15.5).abs() < 1e-4);
    }

    #[test]
    fn test_winding_order() {
        let points = ccw_points();

        assert!(BarycentricHelper::new(WindingOrder::CounterClockwise, &points).is_winding_order_correct());
        assert!(!BarycentricHelper::new(WindingOrder::Clockwise, &points).is_winding_order_correct());

        let reversed = [points[0], points[2], points[1]];
        assert!(BarycentricHelper::new(WindingOrder::Clockwise, &reversed).is_winding_order_correct());
    }

    #[test]
    fn test_wrong_winding_covers_nothing() {
        let helper = BarycentricHelper::new(WindingOrder::Clockwise, &ccw_points());

        assert!(Bounds2i::new((0, 0), (64, 64)).pixels().all(|p| !helper.is_inside(&helper.coordinates(p))));
    }

    #[test]
    fn test_degenerate_triangle_covers_nothing() {
        let collinear = [Point3::new(0.0, 0.0, 0.0), Point3::new(16.0, 16.0, 0.0), Point3::new(32.0, 32.0, 0.0)];
        let helper = BarycentricHelper::new(WindingOrder::CounterClockwise, &collinear);

        assert!(helper.is_degenerate());
        assert!(!helper.is_winding_order_correct());

        for pixel in Bounds2i::new((0, 0), (33, 33)).pixels() {
            let coords = helper.coordinates(pixel);
            assert!(coords.x.is_finite() && coords.y.is_finite() && coords.z.is_finite());
            assert!(!helper.is_inside(&coords));
        }
    }

    #[test]
    fn test_shared_edge_owned_once() {
        // Square split along its diagonal, every pixel center on the diagonal lies exactly on the shared edge
        let lower = BarycentricHelper::new(WindingOrder::CounterClockwise,
                                           &[Point3::new(0.0, 0.0, 0.0),
                                             Point3::new(32.0, 0.0, 0.0),
                                             Point3::new(32.0, 32.0, 0.0)]);
        let upper = BarycentricHelper::new(WindingOrder::CounterClockwise,
                                           &[Point3::new(0.0, 0.0, 0.0),
                                             Point3::new(32.0, 32.0, 0.0),
                                             Point3::new(0.0, 32.0, 0.0)]);

        for pixel in Bounds2i::new((0, 0), (32, 32)).pixels() {
            let a = lower.is_inside(&lower.coordinates(pixel));
            let b = upper.is_inside(&upper.coordinates(pixel));

            assert!(a ^ b, "pixel {:?} covered by lower: {}, upper: {}", pixel, a, b);
        }
    }

    #[test]
    fn test_shared_horizontal_edge_owned_once() {
        let bottom = BarycentricHelper::new(WindingOrder::Clockwise,
                                            &[Point3::new(0.0, 8.5, 0.0),
                                              Point3::new(16.0, 8.5, 0.0),
                                              Point3::new(8.0, 0.0, 0.0)]);
        let top = BarycentricHelper::new(WindingOrder::Clockwise,
                                         &[Point3::new(16.0, 8.5, 0.0),
                                           Point3::new(0.0, 8.5, 0.0),
                                           Point3::new(8.0, 16.0, 0.0)]);

        assert!(bottom.is_winding_order_correct() && top.is_winding_order_correct());

        for x in 1..15 {
            let pixel = Coordinate::new(x, 8);
            let a = bottom.is_inside(&bottom.coordinates(pixel));
            let b = top.is_inside(&top.coordinates(pixel));

            assert!(a ^ b, "pixel {:?} covered by bottom: {}, top: {}", pixel, a, b);
        }
    }

    #[test]
    fn test_shared_edge_owned_once_off_grid() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut checked = 0;

        for _ in 0..2000 {
            let a = Vector2::new(rng.random_range(10..140) as f32 * 0.37, rng.random_range(10..140) as f32 * 0.37);
            let b = Vector2::new(rng.random_range(10..140) as f32 * 0.37, rng.random_range(10..140) as f32 * 0.37);

            let along = b - a;
            let length = along.norm();

            if length < 8.0 {
                continue;
            }

            // Apexes far out on both sides keep the pixels near the middle of the edge inside the pair
            let middle = (a + b) * 0.5;
            let left = Vector2::new(-along.y, along.x);

            let c1 = middle + left;
            let c2 = middle - left;

            let point = |v: Vector2<f32>| Point3::new(v.x, v.y, 0.0);

            let t1 = BarycentricHelper::new(WindingOrder::CounterClockwise, &[point(a), point(b), point(c1)]);
            let t2 = BarycentricHelper::new(WindingOrder::CounterClockwise, &[point(b), point(a), point(c2)]);

            assert!(t1.is_winding_order_correct() && t2.is_winding_order_correct());

            let min = (a.x.min(b.x).floor() as i32 - 1, a.y.min(b.y).floor() as i32 - 1);
            let max = (a.x.max(b.x).ceil() as i32 + 1, a.y.max(b.y).ceil() as i32 + 1);

            for pixel in Bounds2i::new(min, max).pixels() {
                let (x, y) = pixel.center();
                let offset = Vector2::new(x, y) - a;

                let t = offset.dot(&along) / (length * length);
                let distance = cross_2d(along, offset) / length;

                if t < 0.2 || t > 0.8 || distance.abs() > 0.5 {
                    continue;
                }

                let in_first = t1.is_inside(&t1.coordinates(pixel));
                let in_second = t2.is_inside(&t2.coordinates(pixel));

                assert!(in_first ^ in_second, "pixel {:?} along {:?} -> {:?} covered by first: {}, second: {}",
                        pixel, a, b, in_first, in_second);

                checked += 1;
            }
        }

        assert!(checked > 1000, "only {} pixels near shared edges", checked);
    }
}
