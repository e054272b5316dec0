//! Error types for recoverable failures outside the per-pixel hot path

use thiserror::Error;

use crate::geometry::{Coordinate, Dimensions};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("pixel coordinate {0:?} is outside of a {1:?} buffer")]
    InvalidPixelCoordinate(Coordinate, Dimensions),
    #[error("buffer dimensions must be non-zero, got {0:?}")]
    ZeroDimensions(Dimensions),
    #[error("expected {expected} texels for the given dimensions, found {found}")]
    TexelCountMismatch { expected: usize, found: usize },
    #[error("no varying named `{0}` in the layout")]
    UnknownVarying(String),
    #[error("varying `{name}` is a `{actual}`, not a `{requested}`")]
    VaryingTypeMismatch { name: String, actual: &'static str, requested: &'static str },
}

pub type RenderResult<T> = Result<T, RenderError>;
