//! The error type returned by every fallible matrix, vector and numerical operation.
//!
//! Each error carries an [ErrorCode] that callers should match on, a human-readable
//! message, the time at which it was raised and optional structured [Details] about
//! the offending operands.

use std::fmt::{self, Display, Formatter};
use std::time::SystemTime;

use thiserror::Error;

use crate::domains::ElementKind;
use crate::tensors::matrix::Shape;

/// A shorthand for results of this crate.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// The group an [ErrorCode] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Structural,
    Dimensional,
    Type,
    Numerical,
    ShapeClass,
    Capability,
}

/// A symbolic error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Empty input, ragged rows or row/column counts that do not describe the data.
    InvalidDimensions,
    /// The entries do not all share the same element type.
    HeterogeneousElements,
    /// A sub-matrix range is empty, reversed or out of range.
    InvalidBounds,
    /// A reshape target does not have the same number of elements.
    ReshapeMismatch,
    IndexOutOfBounds,
    InvalidArgument,
    DimensionMismatch,
    TypeMismatch,
    /// A zero pivot or diagonal entry was encountered.
    Unsolvable,
    LinearlyDependent,
    DivisionByZero,
    ZeroVector,
    NotSquare,
    NotTriangular,
    /// A generic operation was called without a capability for a non-native element type.
    MissingCapability,
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::InvalidDimensions
            | ErrorCode::HeterogeneousElements
            | ErrorCode::InvalidBounds
            | ErrorCode::ReshapeMismatch
            | ErrorCode::IndexOutOfBounds
            | ErrorCode::InvalidArgument => ErrorCategory::Structural,
            ErrorCode::DimensionMismatch => ErrorCategory::Dimensional,
            ErrorCode::TypeMismatch => ErrorCategory::Type,
            ErrorCode::Unsolvable
            | ErrorCode::LinearlyDependent
            | ErrorCode::DivisionByZero
            | ErrorCode::ZeroVector => ErrorCategory::Numerical,
            ErrorCode::NotSquare | ErrorCode::NotTriangular => ErrorCategory::ShapeClass,
            ErrorCode::MissingCapability => ErrorCategory::Capability,
        }
    }

    /// Return the stable string form of the code, e.g. `DIMENSION_MISMATCH`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidDimensions => "INVALID_DIMENSIONS",
            ErrorCode::HeterogeneousElements => "HETEROGENEOUS_ELEMENTS",
            ErrorCode::InvalidBounds => "INVALID_BOUNDS",
            ErrorCode::ReshapeMismatch => "RESHAPE_MISMATCH",
            ErrorCode::IndexOutOfBounds => "INDEX_OUT_OF_BOUNDS",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::DimensionMismatch => "DIMENSION_MISMATCH",
            ErrorCode::TypeMismatch => "TYPE_MISMATCH",
            ErrorCode::Unsolvable => "UNSOLVABLE",
            ErrorCode::LinearlyDependent => "LINEARLY_DEPENDENT",
            ErrorCode::DivisionByZero => "DIVISION_BY_ZERO",
            ErrorCode::ZeroVector => "ZERO_VECTOR",
            ErrorCode::NotSquare => "NOT_SQUARE",
            ErrorCode::NotTriangular => "NOT_TRIANGULAR",
            ErrorCode::MissingCapability => "MISSING_CAPABILITY",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured information about the operands that caused an error.
#[derive(Clone, Debug, PartialEq)]
pub enum Details {
    Shapes(Shape, Shape),
    Kinds(ElementKind, ElementKind),
    Index { row: usize, col: usize, shape: Shape },
    Lengths(usize, usize),
    Shape(Shape),
}

#[derive(Error, Clone, Debug)]
#[error("{code}: {message}")]
pub struct MatrixError {
    pub code: ErrorCode,
    pub message: String,
    pub timestamp: SystemTime,
    pub details: Option<Details>,
}

impl MatrixError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> MatrixError {
        MatrixError {
            code,
            message: message.into(),
            timestamp: SystemTime::now(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Details) -> MatrixError {
        self.details = Some(details);
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    pub(crate) fn shape_mismatch(op: &str, lhs: Shape, rhs: Shape) -> MatrixError {
        MatrixError::new(
            ErrorCode::DimensionMismatch,
            format!("Cannot {} matrices of shape {} and {}", op, lhs, rhs),
        )
        .with_details(Details::Shapes(lhs, rhs))
    }

    pub(crate) fn kind_mismatch(lhs: ElementKind, rhs: ElementKind) -> MatrixError {
        MatrixError::new(
            ErrorCode::TypeMismatch,
            format!("Element types differ: {} vs {}", lhs, rhs),
        )
        .with_details(Details::Kinds(lhs, rhs))
    }

    pub(crate) fn length_mismatch(what: &str, expected: usize, found: usize) -> MatrixError {
        MatrixError::new(
            ErrorCode::DimensionMismatch,
            format!("{} has length {}, expected {}", what, found, expected),
        )
        .with_details(Details::Lengths(expected, found))
    }

    pub(crate) fn not_square(shape: Shape) -> MatrixError {
        MatrixError::new(
            ErrorCode::NotSquare,
            format!("The matrix is not square: {}", shape),
        )
        .with_details(Details::Shape(shape))
    }
}
