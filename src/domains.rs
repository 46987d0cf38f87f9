//! Defines the numerical capability that matrices and vectors are generic over.
//!
//! The core trait is [Numerical]. Each numerical has an associated element type, that should
//! not be confused with the numerical type itself. For example:
//! - The floating-point numbers [F64](type@float::F64) have elements of type [f64].
//! - The integers [Z](type@integer::Z) have elements of type [Integer](integer::Integer).
//! - The fractions [Q](type@rational::Q) have elements of type [Fraction](rational::Fraction).
//! - The dynamically tagged numbers [ScalarField](scalar::ScalarField) have elements of type
//!   [Scalar](scalar::Scalar).
//!
//! The elements do not need to implement arithmetic themselves, rather the numerical does.
//! This way a single implementation of an algorithm works for every element type, and
//! user-defined types only need to implement [Numerical] to be usable in a
//! [Matrix](crate::tensors::matrix::Matrix).
pub mod float;
pub mod integer;
pub mod rational;
pub mod scalar;

use std::fmt::{Debug, Display, Formatter};

use crate::error::{ErrorCode, MatrixError, Result};
use crate::options::Tolerance;

/// A tag describing the type of the elements of a matrix or vector.
///
/// Binary operations reject operands with different tags before doing any arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Number,
    BigInt,
    Fraction,
    Custom(&'static str),
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Number => f.write_str("number"),
            ElementKind::BigInt => f.write_str("bigint"),
            ElementKind::Fraction => f.write_str("fraction"),
            ElementKind::Custom(name) => f.write_str(name),
        }
    }
}

/// The arithmetic capability of an element type.
///
/// Only the identities, the four basic operations, the square root, the sign and the
/// conversions are required. Everything else has a default implementation in terms of
/// these, which implementations may override with a faster version.
pub trait Numerical: Clone + PartialEq + Debug + Display {
    type Element: Clone + PartialEq + Debug + Display;

    /// The tag shared by all elements of this numerical.
    fn kind(&self) -> ElementKind;

    /// The tag of a single element. Only differs from [Numerical::kind] for
    /// numericals whose elements carry their own type.
    fn element_kind(&self, _a: &Self::Element) -> ElementKind {
        self.kind()
    }

    /// The numerical to use when none is supplied, if the element type is natively supported.
    fn native() -> Option<Self> {
        None
    }

    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element>;
    fn sqrt(&self, a: &Self::Element) -> Result<Self::Element>;
    /// Return `-1`, `0` or `1`.
    fn sign(&self, a: &Self::Element) -> i8;

    fn from_i64(&self, n: i64) -> Self::Element;
    /// Convert to a 64-bit integer, truncating towards zero.
    /// Returns `None` when the value does not fit.
    fn to_i64(&self, a: &Self::Element) -> Option<i64>;
    fn to_f64(&self, a: &Self::Element) -> f64;
    fn from_f64(&self, x: f64) -> Result<Self::Element>;

    fn is_integral(&self, a: &Self::Element) -> bool;
    /// Round to `digits` decimal places.
    fn round_to(&self, a: &Self::Element, digits: u32) -> Self::Element;

    /// Sample an element from the range `[range.0, range.1)`.
    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element;

    fn neg(&self, a: &Self::Element) -> Self::Element {
        self.sub(&self.zero(), a)
    }

    fn abs(&self, a: &Self::Element) -> Self::Element {
        if self.sign(a) < 0 {
            self.neg(a)
        } else {
            a.clone()
        }
    }

    fn is_zero(&self, a: &Self::Element) -> bool {
        self.sign(a) == 0
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        *a == self.one()
    }

    /// Check if `a` is zero up to the tolerance. Exact numericals ignore the tolerance.
    fn is_near_zero(&self, a: &Self::Element, _tolerance: &Tolerance) -> bool {
        self.is_zero(a)
    }

    /// Check if `a` and `b` are equal up to the tolerance. Exact numericals ignore the tolerance.
    fn approx_eq(&self, a: &Self::Element, b: &Self::Element, _tolerance: &Tolerance) -> bool {
        a == b
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    /// Compute `a += b * c`.
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.add(a, &self.mul(b, c));
    }

    /// Compute `a -= b * c`.
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.sub(a, &self.mul(b, c));
    }

    /// The scalar product of two slices of equal length.
    fn dot(&self, a: &[Self::Element], b: &[Self::Element]) -> Self::Element {
        debug_assert_eq!(a.len(), b.len());
        let mut res = self.zero();
        for (x, y) in a.iter().zip(b) {
            self.add_mul_assign(&mut res, x, y);
        }
        res
    }
}

/// Use the explicitly supplied numerical, or the native numerical of the element type.
///
/// Fails with [ErrorCode::MissingCapability] when neither is available.
pub fn resolve<N: Numerical>(numerical: Option<&N>) -> Result<N> {
    match numerical {
        Some(n) => Ok(n.clone()),
        None => N::native().ok_or_else(|| {
            MatrixError::new(
                ErrorCode::MissingCapability,
                format!(
                    "No numerical capability was supplied for elements of type {}",
                    std::any::type_name::<N::Element>()
                ),
            )
        }),
    }
}
