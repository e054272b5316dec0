//! Polygon face winding definitions

/// Defines face winding variations. These apply to raster-space vertices, where the origin is the bottom-left
/// corner of the image and Y grows upward, so imagine the vertices as they are viewed from the final image.
///
/// If all triangles of a mesh have the same face winding,
/// then triangles that are facing away from the screen can be skipped since they
/// will have the opposite winding order, since they are viewed from the back. This is known
/// as backface culling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindingOrder {
    /// Clockwise face winding, where the vertices are like so:
    ///
    /// ```text
    ///                   0
    ///                  /|
    ///           A    /  |
    ///         /    /    |
    ///       /    /      | |
    ///     /    /        | |
    ///        /          | |
    ///      /            | V
    ///    /              |
    /// 2 *---------------* 1
    ///       <-------
    /// ```
    Clockwise,
    /// Counter-Clockwise face winding, where the vertices are like so:
    ///
    /// ```text
    ///                   2
    ///                  /|
    ///           /    /  |
    ///         /    /    |
    ///       /    /      | A
    ///     V    /        | |
    ///        /          | |
    ///      /            | |
    ///    /              |
    /// 0 *---------------* 1
    ///       ------->
    /// ```
    CounterClockwise,
}

impl Default for WindingOrder {
    fn default() -> WindingOrder { WindingOrder::CounterClockwise }
}

impl WindingOrder {
    /// Winding of a triangle with the given signed (doubled) area, or `None` for a degenerate triangle.
    #[inline]
    pub fn from_signed_area(area: f32) -> Option<WindingOrder> {
        if area > 0.0 {
            Some(WindingOrder::CounterClockwise)
        } else if area < 0.0 {
            Some(WindingOrder::Clockwise)
        } else {
            None
        }
    }

    #[inline]
    pub fn reversed(self) -> WindingOrder {
        match self {
            WindingOrder::Clockwise => WindingOrder::CounterClockwise,
            WindingOrder::CounterClockwise => WindingOrder::Clockwise,
        }
    }

    /// `1.0` for counter-clockwise, `-1.0` for clockwise. Multiplying signed areas by this keeps them positive.
    #[inline(always)]
    pub fn sign(self) -> f32 {
        match self {
            WindingOrder::CounterClockwise => 1.0,
            WindingOrder::Clockwise => -1.0,
        }
    }
}

/// Which faces are dropped before rasterization. Front faces are the ones whose winding matches
/// the pipeline's configured [`WindingOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullFace {
    /// Every triangle is rasterized regardless of its winding
    None,
    /// Drop triangles whose winding matches the front face winding
    Front,
    /// Drop triangles whose winding is opposite of the front face winding
    Back,
    /// Drop everything
    FrontAndBack,
}

impl Default for CullFace {
    fn default() -> CullFace { CullFace::Back }
}

impl CullFace {
    /// Winding that survives culling given the front face winding.
    ///
    /// Returns `None` when both windings survive, and `Some(None)` when neither does.
    pub fn kept_winding(self, front_face: WindingOrder) -> Option<Option<WindingOrder>> {
        match self {
            CullFace::None => None,
            CullFace::Back => Some(Some(front_face)),
            CullFace::Front => Some(Some(front_face.reversed())),
            CullFace::FrontAndBack => Some(None),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_signed_area_winding() {
        assert_eq!(WindingOrder::from_signed_area(2.0), Some(WindingOrder::CounterClockwise));
        assert_eq!(WindingOrder::from_signed_area(-0.5), Some(WindingOrder::Clockwise));
        assert_eq!(WindingOrder::from_signed_area(0.0), None);
    }

    #[test]
    fn test_kept_winding() {
        let ccw = WindingOrder::CounterClockwise;

        assert_eq!(CullFace::None.kept_winding(ccw), None);
        assert_eq!(CullFace::Back.kept_winding(ccw), Some(Some(ccw)));
        assert_eq!(CullFace::Front.kept_winding(ccw), Some(Some(WindingOrder::Clockwise)));
        assert_eq!(CullFace::FrontAndBack.kept_winding(ccw), Some(None));
    }
}
