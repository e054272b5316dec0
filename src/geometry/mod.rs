//! Raster-space geometry: pixel coordinates, rectangles, winding and barycentric coverage

pub mod dimension;
pub mod coordinate;
pub mod bounds;
pub mod winding;
pub mod barycentric;

pub use self::dimension::{Dimensions, HasDimensions};
pub use self::coordinate::Coordinate;
pub use self::bounds::Bounds2i;
pub use self::winding::{WindingOrder, CullFace};
pub use self::barycentric::{BarycentricCoordinates, BarycentricHelper};
