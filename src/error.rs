use thiserror::Error;

/// A comprehensive error type for all operations within this crate.
#[derive(Error, Debug)]
pub enum BasisError {
    #[error(
        "The provided knot vector is invalid: {0}. It must be non-decreasing, clamped at both ends, and contain only finite values."
    )]
    InvalidKnotVector(String),

    #[error("Spline degree must be at least 1 for this operation, but was {0}.")]
    InvalidDegree(usize),

    #[error("Local order ({order}) must lie in [0, {degree}] for a degree-{degree} basis set.")]
    InvalidOrder { order: usize, degree: usize },

    #[error("Basis index ({index}) is out of range for a set of {count} basis functions.")]
    InvalidIndex { index: usize, count: usize },

    #[error("Parameter {value} is outside the knot domain [{min}, {max}].")]
    OutOfDomain { value: f64, min: f64, max: f64 },

    #[error("Weight at position {index} must be strictly positive and finite, but was {value}.")]
    InvalidWeight { index: usize, value: f64 },

    #[error(
        "Weight count mismatch: expected {expected} weights to match the number of basis functions, but got {found}."
    )]
    WeightSizeMismatch { expected: usize, found: usize },

    #[error("Transform matrix must be {expected}x{expected}, but was {rows}x{cols}.")]
    TransformShapeMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Rational denominator summed to zero for this span; the weight vector is degenerate.")]
    DegenerateWeights,

    #[error("Operation not supported: {0}")]
    NotSupported(&'static str),
}
