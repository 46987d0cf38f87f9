//! Numbers that carry their own type.
//!
//! A [Scalar] is either a float, an integer or a fraction. This is useful when the entries of
//! a matrix come from untyped input: the [ScalarField] checks every entry against its
//! [ElementKind], so that a matrix can never silently mix element types.

use std::fmt::{Display, Formatter};

use crate::{
    error::{ErrorCode, MatrixError, Result},
    options::Tolerance,
};

use super::{
    float::F64,
    integer::{Integer, Z},
    rational::{Fraction, Q},
    ElementKind, Numerical,
};

#[derive(Clone, PartialEq, Debug)]
pub enum Scalar {
    Number(f64),
    BigInt(Integer),
    Fraction(Fraction),
}

impl Scalar {
    pub fn kind(&self) -> ElementKind {
        match self {
            Scalar::Number(_) => ElementKind::Number,
            Scalar::BigInt(_) => ElementKind::BigInt,
            Scalar::Fraction(_) => ElementKind::Fraction,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<Integer> for Scalar {
    fn from(value: Integer) -> Self {
        Scalar::BigInt(value)
    }
}

impl From<Fraction> for Scalar {
    fn from(value: Fraction) -> Self {
        Scalar::Fraction(value)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Number(n) => n.fmt(f),
            Scalar::BigInt(n) => n.fmt(f),
            Scalar::Fraction(n) => n.fmt(f),
        }
    }
}

/// The numerical for [Scalar] entries of one fixed [ElementKind].
///
/// Operands of a different kind than the field are promoted along
/// `bigint -> fraction -> number` before the operation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ScalarField {
    kind: ElementKind,
}

impl ScalarField {
    pub const NUMBER: ScalarField = ScalarField {
        kind: ElementKind::Number,
    };
    pub const BIGINT: ScalarField = ScalarField {
        kind: ElementKind::BigInt,
    };
    pub const FRACTION: ScalarField = ScalarField {
        kind: ElementKind::Fraction,
    };

    /// Create the field whose kind is the kind of `first`.
    pub fn infer(first: &Scalar) -> ScalarField {
        ScalarField { kind: first.kind() }
    }

    fn rank(kind: ElementKind) -> u8 {
        match kind {
            ElementKind::BigInt => 0,
            ElementKind::Fraction => 1,
            _ => 2,
        }
    }

    fn promote(&self, a: &Scalar, kind: ElementKind) -> Scalar {
        match (a, kind) {
            (Scalar::BigInt(n), ElementKind::Fraction) => {
                Scalar::Fraction(Fraction::from(n.clone()))
            }
            (Scalar::BigInt(n), ElementKind::Number) => Scalar::Number(n.to_f64()),
            (Scalar::Fraction(n), ElementKind::Number) => Scalar::Number(n.to_f64()),
            _ => a.clone(),
        }
    }

    /// Apply a binary operation after bringing both operands to a common kind.
    fn binary<R>(
        &self,
        a: &Scalar,
        b: &Scalar,
        number: impl FnOnce(&f64, &f64) -> R,
        bigint: impl FnOnce(&Integer, &Integer) -> R,
        fraction: impl FnOnce(&Fraction, &Fraction) -> R,
    ) -> R {
        let kind = if Self::rank(a.kind()) >= Self::rank(b.kind()) {
            a.kind()
        } else {
            b.kind()
        };

        match (self.promote(a, kind), self.promote(b, kind)) {
            (Scalar::Number(x), Scalar::Number(y)) => number(&x, &y),
            (Scalar::BigInt(x), Scalar::BigInt(y)) => bigint(&x, &y),
            (Scalar::Fraction(x), Scalar::Fraction(y)) => fraction(&x, &y),
            _ => unreachable!("Operands were promoted to the same kind"),
        }
    }
}

impl Default for ScalarField {
    fn default() -> Self {
        ScalarField::NUMBER
    }
}

impl Display for ScalarField {
    fn fmt(&self, _: &mut Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl Numerical for ScalarField {
    type Element = Scalar;

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn element_kind(&self, a: &Self::Element) -> ElementKind {
        a.kind()
    }

    fn zero(&self) -> Self::Element {
        match self.kind {
            ElementKind::BigInt => Scalar::BigInt(Z.zero()),
            ElementKind::Fraction => Scalar::Fraction(Q.zero()),
            _ => Scalar::Number(0.),
        }
    }

    fn one(&self) -> Self::Element {
        match self.kind {
            ElementKind::BigInt => Scalar::BigInt(Z.one()),
            ElementKind::Fraction => Scalar::Fraction(Q.one()),
            _ => Scalar::Number(1.),
        }
    }

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.binary(
            a,
            b,
            |x, y| Scalar::Number(F64.add(x, y)),
            |x, y| Scalar::BigInt(Z.add(x, y)),
            |x, y| Scalar::Fraction(Q.add(x, y)),
        )
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.binary(
            a,
            b,
            |x, y| Scalar::Number(F64.sub(x, y)),
            |x, y| Scalar::BigInt(Z.sub(x, y)),
            |x, y| Scalar::Fraction(Q.sub(x, y)),
        )
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.binary(
            a,
            b,
            |x, y| Scalar::Number(F64.mul(x, y)),
            |x, y| Scalar::BigInt(Z.mul(x, y)),
            |x, y| Scalar::Fraction(Q.mul(x, y)),
        )
    }

    fn div(&self, a: &Self::Element, b: &Self::Element) -> Result<Self::Element> {
        self.binary(
            a,
            b,
            |x, y| F64.div(x, y).map(Scalar::Number),
            |x, y| Z.div(x, y).map(Scalar::BigInt),
            |x, y| Q.div(x, y).map(Scalar::Fraction),
        )
    }

    fn sqrt(&self, a: &Self::Element) -> Result<Self::Element> {
        match a {
            Scalar::Number(x) => F64.sqrt(x).map(Scalar::Number),
            Scalar::BigInt(x) => Z.sqrt(x).map(Scalar::BigInt),
            Scalar::Fraction(x) => Q.sqrt(x).map(Scalar::Fraction),
        }
    }

    fn sign(&self, a: &Self::Element) -> i8 {
        match a {
            Scalar::Number(x) => F64.sign(x),
            Scalar::BigInt(x) => Z.sign(x),
            Scalar::Fraction(x) => Q.sign(x),
        }
    }

    fn from_i64(&self, n: i64) -> Self::Element {
        match self.kind {
            ElementKind::BigInt => Scalar::BigInt(Z.from_i64(n)),
            ElementKind::Fraction => Scalar::Fraction(Q.from_i64(n)),
            _ => Scalar::Number(F64.from_i64(n)),
        }
    }

    fn to_i64(&self, a: &Self::Element) -> Option<i64> {
        match a {
            Scalar::Number(x) => F64.to_i64(x),
            Scalar::BigInt(x) => Z.to_i64(x),
            Scalar::Fraction(x) => Q.to_i64(x),
        }
    }

    fn to_f64(&self, a: &Self::Element) -> f64 {
        match a {
            Scalar::Number(x) => *x,
            Scalar::BigInt(x) => x.to_f64(),
            Scalar::Fraction(x) => x.to_f64(),
        }
    }

    fn from_f64(&self, x: f64) -> Result<Self::Element> {
        match self.kind {
            ElementKind::BigInt => Z.from_f64(x).map(Scalar::BigInt),
            ElementKind::Fraction => Q.from_f64(x).map(Scalar::Fraction),
            _ => F64.from_f64(x).map(Scalar::Number),
        }
    }

    fn is_integral(&self, a: &Self::Element) -> bool {
        match a {
            Scalar::Number(x) => F64.is_integral(x),
            Scalar::BigInt(_) => true,
            Scalar::Fraction(x) => x.is_integer(),
        }
    }

    fn round_to(&self, a: &Self::Element, digits: u32) -> Self::Element {
        match a {
            Scalar::Number(x) => Scalar::Number(F64.round_to(x, digits)),
            Scalar::BigInt(_) => a.clone(),
            Scalar::Fraction(x) => Scalar::Fraction(Q.round_to(x, digits)),
        }
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        match self.kind {
            ElementKind::BigInt => Scalar::BigInt(Z.sample(rng, range)),
            ElementKind::Fraction => Scalar::Fraction(Q.sample(rng, range)),
            _ => Scalar::Number(F64.sample(rng, range)),
        }
    }

    fn is_near_zero(&self, a: &Self::Element, tolerance: &Tolerance) -> bool {
        match a {
            Scalar::Number(x) => F64.is_near_zero(x, tolerance),
            _ => self.is_zero(a),
        }
    }

    fn approx_eq(&self, a: &Self::Element, b: &Self::Element, tolerance: &Tolerance) -> bool {
        self.binary(
            a,
            b,
            |x, y| F64.approx_eq(x, y, tolerance),
            |x, y| x == y,
            |x, y| x == y,
        )
    }
}

/// Check that every scalar has the same kind, and return the field for that kind.
pub fn homogeneous_field(data: &[Scalar]) -> Result<ScalarField> {
    let first = data.first().ok_or_else(|| {
        MatrixError::new(ErrorCode::InvalidDimensions, "Cannot infer the type of no scalars")
    })?;

    let field = ScalarField::infer(first);
    if let Some(other) = data.iter().find(|x| x.kind() != field.kind) {
        return Err(MatrixError::new(
            ErrorCode::HeterogeneousElements,
            format!(
                "Scalars are not all of the same type: found {} and {}",
                field.kind,
                other.kind()
            ),
        ));
    }

    Ok(field)
}
