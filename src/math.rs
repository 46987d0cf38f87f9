//! Scalar and slice utilities that are generic over a [Numerical].
//!
//! Every generic function takes an optional numerical. When it is `None`, the native
//! numerical of the element type is used, which only exists for [f64] and
//! [Integer](crate::domains::integer::Integer):
//!
//! ```
//! use numerica::{domains::float::F64, math};
//!
//! let d = math::dot::<F64>(&[1., 2.], &[3., 4.], None).unwrap();
//! assert_eq!(d, 11.);
//! ```

use crate::{
    domains::{float::dot_f64, resolve, Numerical},
    error::{ErrorCode, MatrixError, Result},
    options::Tolerance,
    utils,
};

/// The scalar product of `a` and `b`.
pub fn dot<N: Numerical>(
    a: &[N::Element],
    b: &[N::Element],
    numerical: Option<&N>,
) -> Result<N::Element> {
    let n = resolve(numerical)?;
    if a.len() != b.len() {
        return Err(MatrixError::length_mismatch(
            "The right operand of the dot product",
            a.len(),
            b.len(),
        ));
    }
    Ok(n.dot(a, b))
}

/// The Euclidean norm of `a`.
pub fn norm<N: Numerical>(a: &[N::Element], numerical: Option<&N>) -> Result<N::Element> {
    let n = resolve(numerical)?;
    n.sqrt(&n.dot(a, a))
}

/// Divide every entry of `a` by the Euclidean norm of `a`.
pub fn normalize<N: Numerical>(
    a: &[N::Element],
    numerical: Option<&N>,
) -> Result<Vec<N::Element>> {
    let n = resolve(numerical)?;
    let norm = n.sqrt(&n.dot(a, a))?;
    if n.is_zero(&norm) {
        return Err(MatrixError::new(
            ErrorCode::ZeroVector,
            "Cannot normalize a vector with norm zero",
        ));
    }
    a.iter().map(|x| n.div(x, &norm)).collect()
}

pub fn sqrt<N: Numerical>(a: &N::Element, numerical: Option<&N>) -> Result<N::Element> {
    resolve(numerical)?.sqrt(a)
}

pub fn abs<N: Numerical>(a: &N::Element, numerical: Option<&N>) -> Result<N::Element> {
    Ok(resolve(numerical)?.abs(a))
}

/// Check if `a` and `b` are equal up to `tolerance`. Exact element types are compared exactly.
pub fn equal<N: Numerical>(
    a: &N::Element,
    b: &N::Element,
    tolerance: &Tolerance,
    numerical: Option<&N>,
) -> Result<bool> {
    Ok(resolve(numerical)?.approx_eq(a, b, tolerance))
}

/// Round `a` to `digits` decimal places.
pub fn round_to_fixed<N: Numerical>(
    a: &N::Element,
    digits: u32,
    numerical: Option<&N>,
) -> Result<N::Element> {
    Ok(resolve(numerical)?.round_to(a, digits))
}

/// Replace `a` by an exact zero if it is zero up to `tolerance`.
pub fn round_to_zero<N: Numerical>(
    a: &N::Element,
    tolerance: &Tolerance,
    numerical: Option<&N>,
) -> Result<N::Element> {
    let n = resolve(numerical)?;
    if n.is_near_zero(a, tolerance) {
        Ok(n.zero())
    } else {
        Ok(a.clone())
    }
}

/// The Euclidean norm of a slice of floats.
#[inline]
pub fn norm_f64(a: &[f64]) -> f64 {
    dot_f64(a, a).sqrt()
}

#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}

/// The smallest power of two that is at least `n`. For `n = 0` this is `1`.
#[inline]
pub fn next_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

#[inline]
pub fn gcd(a: i64, b: i64) -> u64 {
    utils::gcd_signed(a, b)
}

/// The least common multiple of `a` and `b`, or `None` when it does not fit in a `u64`.
#[inline]
pub fn lcm(a: i64, b: i64) -> Option<u64> {
    utils::lcm_signed(a, b)
}
