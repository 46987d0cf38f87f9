use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
};

use rand::Rng;
pub use rug::Integer;

use crate::error::{ErrorCode, MatrixError, Result};

use super::{ElementKind, Numerical};

/// The integer ring.
pub type Z = IntegerRing;
/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The ring of arbitrary-precision integers.
///
/// Division truncates towards zero, so `Z` is only a field for exact quotients.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntegerRing;

impl Default for IntegerRing {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

impl Display for IntegerRing {
    fn fmt(&self, _: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl Numerical for IntegerRing {
    type Element = Integer;

    fn kind(&self) -> ElementKind {
        ElementKind::BigInt
    }

    fn native() -> Option<Self> {
        Some(IntegerRing)
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Integer::new()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Integer::from(1)
    }

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a + b)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a - b)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a * b)
    }

    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        if b.cmp0() == Ordering::Equal {
            return Err(MatrixError::new(
                ErrorCode::DivisionByZero,
                format!("Cannot divide {} by zero", a),
            ));
        }
        Ok(Integer::from(a / b))
    }

    /// The floor of the square root.
    fn sqrt(&self, a: &Self::Element) -> Result<Self::Element> {
        if a.cmp0() == Ordering::Less {
            return Err(MatrixError::new(
                ErrorCode::InvalidArgument,
                format!("Cannot take the square root of negative integer {}", a),
            ));
        }
        Ok(Integer::from(a.sqrt_ref()))
    }

    #[inline]
    fn sign(&self, a: &Self::Element) -> i8 {
        match a.cmp0() {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    #[inline]
    fn from_i64(&self, n: i64) -> Self::Element {
        Integer::from(n)
    }

    #[inline]
    fn to_i64(&self, a: &Self::Element) -> Option<i64> {
        a.to_i64()
    }

    #[inline]
    fn to_f64(&self, a: &Self::Element) -> f64 {
        a.to_f64()
    }

    fn from_f64(&self, x: f64) -> Result<Self::Element> {
        if !x.is_finite() || x.fract() != 0. {
            return Err(MatrixError::new(
                ErrorCode::TypeMismatch,
                format!("{} cannot be represented as an integer", x),
            ));
        }

        Integer::from_f64(x).ok_or_else(|| {
            MatrixError::new(
                ErrorCode::TypeMismatch,
                format!("{} cannot be represented as an integer", x),
            )
        })
    }

    #[inline]
    fn is_integral(&self, _a: &Self::Element) -> bool {
        true
    }

    #[inline]
    fn round_to(&self, a: &Self::Element, _digits: u32) -> Self::Element {
        a.clone()
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Integer::from(rng.gen_range(range.0..range.1))
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        Integer::from(-a)
    }

    #[inline]
    fn abs(&self, a: &Self::Element) -> Self::Element {
        Integer::from(a.abs_ref())
    }

    #[inline]
    fn is_zero(&self, a: &Self::Element) -> bool {
        a.cmp0() == Ordering::Equal
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline(always)]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        // prevent the creation of a temporary integer b * c
        *a += b * c;
    }

    #[inline(always)]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= b * c;
    }
}
