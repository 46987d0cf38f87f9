use std::fmt::{self, Display, Formatter};

use rand::Rng;

use crate::{
    error::{ErrorCode, MatrixError, Result},
    options::Tolerance,
};

use super::{ElementKind, Numerical};

/// The double-precision floating-point numbers.
pub type F64 = FloatField;
/// The double-precision floating-point numbers.
pub const F64: FloatField = FloatField::new();

/// The double-precision floating-point numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FloatField;

impl Default for FloatField {
    fn default() -> Self {
        Self::new()
    }
}

impl FloatField {
    pub const fn new() -> FloatField {
        FloatField
    }
}

impl Display for FloatField {
    fn fmt(&self, _: &mut Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl Numerical for FloatField {
    type Element = f64;

    fn kind(&self) -> ElementKind {
        ElementKind::Number
    }

    fn native() -> Option<Self> {
        Some(FloatField)
    }

    #[inline(always)]
    fn zero(&self) -> Self::Element {
        0.
    }

    #[inline(always)]
    fn one(&self) -> Self::Element {
        1.
    }

    #[inline(always)]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    #[inline(always)]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    #[inline(always)]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    /// Divide following IEEE 754, so dividing by zero yields an infinity or NaN.
    #[inline(always)]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        Ok(a / b)
    }

    fn sqrt(&self, a: &Self::Element) -> Result<Self::Element> {
        if *a < 0. {
            return Err(MatrixError::new(
                ErrorCode::InvalidArgument,
                format!("Cannot take the square root of negative number {}", a),
            ));
        }
        Ok(a.sqrt())
    }

    #[inline]
    fn sign(&self, a: &Self::Element) -> i8 {
        if *a > 0. {
            1
        } else if *a < 0. {
            -1
        } else {
            0
        }
    }

    #[inline(always)]
    fn from_i64(&self, n: i64) -> Self::Element {
        n as f64
    }

    fn to_i64(&self, a: &Self::Element) -> Option<i64> {
        let t = a.trunc();
        if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
            Some(t as i64)
        } else {
            None
        }
    }

    #[inline(always)]
    fn to_f64(&self, a: &Self::Element) -> f64 {
        *a
    }

    fn from_f64(&self, x: f64) -> Result<Self::Element> {
        if x.is_nan() {
            return Err(MatrixError::new(
                ErrorCode::TypeMismatch,
                "The scalar is not a number",
            ));
        }
        Ok(x)
    }

    fn is_integral(&self, a: &Self::Element) -> bool {
        a.is_finite() && a.fract() == 0.
    }

    /// Values whose scaled form is not an exactly representable integer are returned as is.
    fn round_to(&self, a: &Self::Element, digits: u32) -> Self::Element {
        if digits > f64::MAX_10_EXP as u32 {
            return *a;
        }

        let scale = 10f64.powi(digits as i32);
        let scaled = a * scale;
        if !scaled.is_finite() || scaled.abs() >= 2f64.powi(f64::MANTISSA_DIGITS as i32) {
            return *a;
        }
        scaled.round() / scale
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        rng.gen_range(range.0 as f64..range.1 as f64)
    }

    #[inline(always)]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    #[inline(always)]
    fn abs(&self, a: &Self::Element) -> Self::Element {
        a.abs()
    }

    #[inline(always)]
    fn is_zero(&self, a: &Self::Element) -> bool {
        *a == 0.
    }

    #[inline(always)]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1.
    }

    #[inline]
    fn is_near_zero(&self, a: &Self::Element, tolerance: &Tolerance) -> bool {
        a.abs() <= tolerance.epsilon
    }

    fn approx_eq(&self, a: &Self::Element, b: &Self::Element, tolerance: &Tolerance) -> bool {
        if a == b {
            return true;
        }
        let diff = (a - b).abs();
        diff <= tolerance.epsilon || diff <= tolerance.epsilon * a.abs().max(b.abs())
    }

    #[inline(always)]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline(always)]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline(always)]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline(always)]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += b * c;
    }

    #[inline(always)]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= b * c;
    }

    fn dot(&self, a: &[Self::Element], b: &[Self::Element]) -> Self::Element {
        dot_f64(a, b)
    }
}

/// The scalar product of two slices of equal length, using four independent accumulators.
pub fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let mut acc = [0f64; 4];
    let ca = a.chunks_exact(4);
    let cb = b.chunks_exact(4);
    let (ra, rb) = (ca.remainder(), cb.remainder());

    for (x, y) in ca.zip(cb) {
        acc[0] += x[0] * y[0];
        acc[1] += x[1] * y[1];
        acc[2] += x[2] * y[2];
        acc[3] += x[3] * y[3];
    }

    let mut res = (acc[0] + acc[1]) + (acc[2] + acc[3]);
    for (x, y) in ra.iter().zip(rb) {
        res += x * y;
    }
    res
}
