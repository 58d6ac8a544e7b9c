//! Domain error types.

use thiserror::Error;

use super::Dimensions;

/// Errors raised by grid construction and access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A lattice dimension was zero.
    #[error("invalid dimension: {axis} must be positive, got {value}")]
    InvalidDimension { axis: char, value: usize },

    /// Cell count `x * y * z` does not fit in `usize`.
    #[error("grid {0} is too large to allocate")]
    TooLarge(Dimensions),

    /// Coordinate outside the lattice. Indicates a logic defect in the caller.
    #[error("coordinate ({i}, {j}, {k}) out of bounds for {dims} grid")]
    OutOfBounds {
        i: usize,
        j: usize,
        k: usize,
        dims: Dimensions,
    },

    /// Alive probability outside `[0, 1]`.
    #[error("invalid probability: {0} is not within [0, 1]")]
    InvalidProbability(f64),

    /// Step input and output buffers differ in shape.
    #[error("dimension mismatch: input is {input}, output is {output}")]
    DimensionMismatch { input: Dimensions, output: Dimensions },
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
