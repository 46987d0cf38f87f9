use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    str::FromStr,
};

use rand::Rng;
use rug::{Integer, Rational};

use crate::error::{ErrorCode, MatrixError, Result};

use super::{ElementKind, Numerical};

/// The field of fractions.
pub type Q = FractionField;
/// The field of fractions.
pub const Q: FractionField = FractionField::new();

/// The field of arbitrary-precision fractions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FractionField;

impl Default for FractionField {
    fn default() -> Self {
        Self::new()
    }
}

impl FractionField {
    pub const fn new() -> FractionField {
        FractionField
    }
}

impl Display for FractionField {
    fn fmt(&self, _: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

/// A fraction in lowest terms with a positive denominator.
///
/// A fraction can be parsed from its string form `n/d` or `n`:
/// ```
/// use numerica::domains::rational::Fraction;
///
/// let f: Fraction = "6/-8".parse().unwrap();
/// assert_eq!(f.to_string(), "-3/4");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Fraction(Rational);

impl Fraction {
    /// Create the fraction `num/den`.
    pub fn new(num: i64, den: i64) -> Result<Fraction> {
        if den == 0 {
            return Err(MatrixError::new(
                ErrorCode::DivisionByZero,
                format!("The fraction {}/0 has a zero denominator", num),
            ));
        }
        Ok(Fraction(Rational::from((num, den))))
    }

    pub fn from_integers(num: Integer, den: Integer) -> Result<Fraction> {
        if den.cmp0() == Ordering::Equal {
            return Err(MatrixError::new(
                ErrorCode::DivisionByZero,
                format!("The fraction {}/0 has a zero denominator", num),
            ));
        }
        Ok(Fraction(Rational::from((num, den))))
    }

    pub fn numerator(&self) -> &Integer {
        self.0.numer()
    }

    pub fn denominator(&self) -> &Integer {
        self.0.denom()
    }

    pub fn is_integer(&self) -> bool {
        *self.0.denom() == 1
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64()
    }

    pub fn as_rational(&self) -> &Rational {
        &self.0
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction(Rational::from(value))
    }
}

impl From<Integer> for Fraction {
    fn from(value: Integer) -> Self {
        Fraction(Rational::from(value))
    }
}

impl From<Rational> for Fraction {
    fn from(value: Rational) -> Self {
        Fraction(value)
    }
}

impl FromStr for Fraction {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |p: &str| {
            p.trim().parse::<Integer>().map_err(|e| {
                MatrixError::new(
                    ErrorCode::InvalidArgument,
                    format!("Cannot parse fraction '{}': {}", s, e),
                )
            })
        };

        match s.split_once('/') {
            Some((n, d)) => Fraction::from_integers(parse(n)?, parse(d)?),
            None => Ok(Fraction::from(parse(s)?)),
        }
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Numerical for FractionField {
    type Element = Fraction;

    fn kind(&self) -> ElementKind {
        ElementKind::Fraction
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Fraction(Rational::new())
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Fraction(Rational::from(1))
    }

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Fraction(Rational::from(&a.0 + &b.0))
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Fraction(Rational::from(&a.0 - &b.0))
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Fraction(Rational::from(&a.0 * &b.0))
    }

    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        if b.0.cmp0() == Ordering::Equal {
            return Err(MatrixError::new(
                ErrorCode::DivisionByZero,
                format!("Cannot divide {} by zero", a),
            ));
        }
        Ok(Fraction(Rational::from(&a.0 / &b.0)))
    }

    /// The exact square root for squares of fractions, otherwise the fraction closest to
    /// the floating-point square root.
    fn sqrt(&self, a: &Self::Element) -> Result<Self::Element> {
        if a.0.cmp0() == Ordering::Less {
            return Err(MatrixError::new(
                ErrorCode::InvalidArgument,
                format!("Cannot take the square root of negative fraction {}", a),
            ));
        }

        let (num, den) = (a.0.numer(), a.0.denom());
        if num.is_perfect_square() && den.is_perfect_square() {
            return Ok(Fraction(Rational::from((
                Integer::from(num.sqrt_ref()),
                Integer::from(den.sqrt_ref()),
            ))));
        }

        self.from_f64(a.0.to_f64().sqrt())
    }

    #[inline]
    fn sign(&self, a: &Self::Element) -> i8 {
        match a.0.cmp0() {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    #[inline]
    fn from_i64(&self, n: i64) -> Self::Element {
        Fraction::from(n)
    }

    fn to_i64(&self, a: &Self::Element) -> Option<i64> {
        Integer::from(a.0.numer() / a.0.denom()).to_i64()
    }

    #[inline]
    fn to_f64(&self, a: &Self::Element) -> f64 {
        a.0.to_f64()
    }

    fn from_f64(&self, x: f64) -> Result<Self::Element> {
        Rational::from_f64(x).map(Fraction).ok_or_else(|| {
            MatrixError::new(
                ErrorCode::TypeMismatch,
                format!("{} cannot be represented as a fraction", x),
            )
        })
    }

    #[inline]
    fn is_integral(&self, a: &Self::Element) -> bool {
        a.is_integer()
    }

    fn round_to(&self, a: &Self::Element, digits: u32) -> Self::Element {
        let scale = Integer::from(Integer::u_pow_u(10, digits));
        let scaled = Rational::from((Integer::from(a.0.numer() * &scale), a.0.denom().clone()));
        let rounded = scaled.round();
        Fraction(Rational::from((rounded.numer().clone(), scale)))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let num = rng.gen_range(range.0..range.1);
        let den = rng.gen_range(1..=16i64);
        Fraction(Rational::from((num, den)))
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        Fraction(Rational::from(-&a.0))
    }

    #[inline]
    fn is_zero(&self, a: &Self::Element) -> bool {
        a.0.cmp0() == Ordering::Equal
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        a.0 == 1
    }
}
