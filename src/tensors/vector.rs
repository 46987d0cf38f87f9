use std::{
    fmt::Display,
    ops::{Index, Neg},
};

use crate::{
    domains::{
        resolve,
        scalar::{homogeneous_field, Scalar, ScalarField},
        ElementKind, Numerical,
    },
    error::{ErrorCode, MatrixError, Result},
    printer::VectorPrinter,
};

use super::matrix::Matrix;

/// An n-dimensional vector.
#[derive(Clone, PartialEq, Debug)]
pub struct Vector<N: Numerical> {
    pub(crate) data: Vec<N::Element>,
    pub(crate) field: N,
    pub(crate) kind: ElementKind,
}

impl<N: Numerical> Vector<N> {
    /// Create a new vector from a list of scalars.
    pub fn new(data: Vec<N::Element>, field: N) -> Result<Vector<N>> {
        if data.is_empty() {
            return Err(MatrixError::new(
                ErrorCode::InvalidDimensions,
                "Cannot create a vector without entries",
            ));
        }

        let kind = field.kind();
        if let Some(e) = data.iter().find(|e| field.element_kind(e) != kind) {
            return Err(MatrixError::new(
                ErrorCode::HeterogeneousElements,
                format!(
                    "Entry {} has type {}, while the vector has type {}",
                    e,
                    field.element_kind(e),
                    kind
                ),
            ));
        }

        Ok(Vector { data, field, kind })
    }

    /// Create a new vector, using the native numerical of the element type.
    pub fn from_native(data: Vec<N::Element>) -> Result<Vector<N>> {
        Self::new(data, resolve(None)?)
    }

    pub(crate) fn from_parts(data: Vec<N::Element>, field: N, kind: ElementKind) -> Vector<N> {
        Vector { data, field, kind }
    }

    /// Create the unit vector of dimension `n` with a one at position `i`.
    pub(crate) fn unit(n: usize, i: usize, field: N) -> Vector<N> {
        let data = (0..n)
            .map(|j| if i == j { field.one() } else { field.zero() })
            .collect();
        Vector {
            data,
            kind: field.kind(),
            field,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false, as vectors are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&N::Element> {
        self.data.get(index).ok_or_else(|| {
            MatrixError::new(
                ErrorCode::IndexOutOfBounds,
                format!(
                    "Index {} is out of bounds for a vector of length {}",
                    index,
                    self.len()
                ),
            )
        })
    }

    pub fn data(&self) -> &[N::Element] {
        &self.data
    }

    pub fn field(&self) -> &N {
        &self.field
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    fn check_compatible(&self, other: &Vector<N>, op: &str) -> Result<()> {
        if self.len() != other.len() {
            return Err(MatrixError::length_mismatch(
                &format!("The right operand of {}", op),
                self.len(),
                other.len(),
            ));
        }

        if self.kind != other.kind {
            return Err(MatrixError::kind_mismatch(self.kind, other.kind));
        }

        Ok(())
    }

    fn zip_with(
        &self,
        other: &Vector<N>,
        f: impl Fn(&N::Element, &N::Element) -> N::Element,
    ) -> Vector<N> {
        Vector {
            data: self.data.iter().zip(&other.data).map(|(a, b)| f(a, b)).collect(),
            field: self.field.clone(),
            kind: self.kind,
        }
    }

    /// Compute the scalar product of two vectors.
    pub fn dot(&self, other: &Vector<N>) -> Result<N::Element> {
        self.check_compatible(other, "the dot product")?;
        Ok(self.field.dot(&self.data, &other.data))
    }

    pub fn norm_squared(&self) -> N::Element {
        self.field.dot(&self.data, &self.data)
    }

    /// The Euclidean norm.
    pub fn norm(&self) -> Result<N::Element> {
        self.field.sqrt(&self.norm_squared())
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.data.iter().all(|e| self.field.is_zero(e))
    }

    /// Scale the vector to unit length.
    pub fn normalize(&self) -> Result<Vector<N>> {
        let norm = self.norm()?;
        if self.field.is_zero(&norm) {
            return Err(MatrixError::new(
                ErrorCode::ZeroVector,
                "Cannot normalize the zero vector",
            ));
        }

        Ok(Vector {
            data: self
                .data
                .iter()
                .map(|e| self.field.div(e, &norm))
                .collect::<Result<_>>()?,
            field: self.field.clone(),
            kind: self.kind,
        })
    }

    /// Project the vector onto `target`.
    pub fn project_onto(&self, target: &Vector<N>) -> Result<Vector<N>> {
        self.check_compatible(target, "a projection")?;
        if target.is_zero() {
            return Err(MatrixError::new(
                ErrorCode::ZeroVector,
                "Cannot project onto the zero vector",
            ));
        }

        let f = &self.field;
        let scale = f.div(&f.dot(&target.data, &self.data), &target.norm_squared())?;
        Ok(target.mul_scalar(&scale))
    }

    /// Compute the cross product of two three-dimensional vectors.
    pub fn cross(&self, other: &Vector<N>) -> Result<Vector<N>> {
        if self.len() != 3 || other.len() != 3 {
            return Err(MatrixError::new(
                ErrorCode::DimensionMismatch,
                format!(
                    "The cross product is only defined for vectors of length 3, not {} and {}",
                    self.len(),
                    other.len()
                ),
            ));
        }
        self.check_compatible(other, "the cross product")?;

        let (a, b, f) = (&self.data, &other.data, &self.field);
        Ok(Vector {
            data: vec![
                f.sub(&f.mul(&a[1], &b[2]), &f.mul(&a[2], &b[1])),
                f.sub(&f.mul(&a[2], &b[0]), &f.mul(&a[0], &b[2])),
                f.sub(&f.mul(&a[0], &b[1]), &f.mul(&a[1], &b[0])),
            ],
            field: f.clone(),
            kind: self.kind,
        })
    }

    /// The angle between two vectors in radians.
    pub fn angle(&self, other: &Vector<N>) -> Result<f64> {
        self.check_compatible(other, "an angle")?;
        if self.is_zero() || other.is_zero() {
            return Err(MatrixError::new(
                ErrorCode::ZeroVector,
                "The angle with the zero vector is undefined",
            ));
        }

        let f = &self.field;
        let cos = f.to_f64(&f.dot(&self.data, &other.data))
            / (f.to_f64(&self.norm_squared()) * f.to_f64(&other.norm_squared())).sqrt();
        Ok(cos.clamp(-1., 1.).acos())
    }

    /// The Euclidean distance between two vectors.
    pub fn distance(&self, other: &Vector<N>) -> Result<N::Element> {
        self.subtract(other)?.norm()
    }

    pub fn add(&self, other: &Vector<N>) -> Result<Vector<N>> {
        self.check_compatible(other, "an addition")?;
        Ok(self.zip_with(other, |a, b| self.field.add(a, b)))
    }

    pub fn subtract(&self, other: &Vector<N>) -> Result<Vector<N>> {
        self.check_compatible(other, "a subtraction")?;
        Ok(self.zip_with(other, |a, b| self.field.sub(a, b)))
    }

    /// Multiply every entry by `factor`, converted to the element type.
    pub fn scale(&self, factor: f64) -> Result<Vector<N>> {
        if !factor.is_finite() {
            return Err(MatrixError::new(
                ErrorCode::TypeMismatch,
                format!("Cannot scale a vector by {}", factor),
            ));
        }
        Ok(self.mul_scalar(&self.field.from_f64(factor)?))
    }

    pub fn mul_scalar(&self, e: &N::Element) -> Vector<N> {
        Vector {
            data: self.data.iter().map(|x| self.field.mul(x, e)).collect(),
            field: self.field.clone(),
            kind: self.kind,
        }
    }

    /// Create a column matrix. This operation is very cheap.
    pub fn into_matrix(self) -> Matrix<N> {
        Matrix {
            nrows: self.data.len(),
            ncols: 1,
            data: self.data.into(),
            field: self.field,
            kind: self.kind,
        }
    }
}

impl Vector<ScalarField> {
    /// Create a vector of self-describing scalars, that must all have the same type.
    pub fn from_scalars(data: Vec<Scalar>) -> Result<Vector<ScalarField>> {
        let field = homogeneous_field(&data)?;
        Self::new(data, field)
    }
}

impl<N: Numerical> Index<usize> for Vector<N> {
    type Output = N::Element;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<N: Numerical> Display for Vector<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        VectorPrinter::new(self).fmt(f)
    }
}

impl<N: Numerical> Neg for Vector<N> {
    type Output = Vector<N>;

    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = self.field.neg(e);
        }
        self
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::{
        domains::{
            float::F64,
            integer::{Integer, Z},
            rational::{Fraction, Q},
            scalar::Scalar,
        },
        error::ErrorCode,
        tensors::vector::Vector,
    };

    #[test]
    fn products() {
        let a = Vector::new(vec![1., 2., 3.], F64).unwrap();
        let b = Vector::new(vec![4., 5., 6.], F64).unwrap();
        assert_eq!(a.dot(&b).unwrap(), 32.);
        assert_eq!(a.cross(&b).unwrap().data(), &[-3., 6., -3.]);

        let short = Vector::new(vec![1., 2.], F64).unwrap();
        assert_eq!(a.dot(&short).unwrap_err().code, ErrorCode::DimensionMismatch);
        assert_eq!(
            short.cross(&short).unwrap_err().code,
            ErrorCode::DimensionMismatch
        );
    }

    #[test]
    fn geometry() {
        let x = Vector::new(vec![1., 0.], F64).unwrap();
        let y = Vector::new(vec![0., 2.], F64).unwrap();
        assert_relative_eq!(x.angle(&y).unwrap(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(x.distance(&y).unwrap(), 5f64.sqrt());
        assert_eq!(y.normalize().unwrap().data(), &[0., 1.]);

        let zero = Vector::new(vec![0., 0.], F64).unwrap();
        assert_eq!(zero.normalize().unwrap_err().code, ErrorCode::ZeroVector);
        assert_eq!(x.angle(&zero).unwrap_err().code, ErrorCode::ZeroVector);
        assert_eq!(x.project_onto(&zero).unwrap_err().code, ErrorCode::ZeroVector);

        let v = Vector::new(vec![3., 4.], F64).unwrap();
        assert_eq!(v.project_onto(&x).unwrap().data(), &[3., 0.]);
        assert_eq!(v.norm().unwrap(), 5.);
    }

    #[test]
    fn exact() {
        let a = Vector::new(vec![Fraction::from(1), Fraction::from(2)], Q).unwrap();
        let b = Vector::new(vec![Fraction::from(3), Fraction::from(1)], Q).unwrap();
        assert_eq!(
            b.project_onto(&a).unwrap().data(),
            &[Fraction::from(1), Fraction::from(2)]
        );

        let i = Vector::<Z>::from_native(vec![Integer::from(2), Integer::from(-3)]).unwrap();
        assert_eq!(i.scale(2.).unwrap().data(), &[4, -6]);
        assert_eq!((-i.clone())[1], 3);
        assert_eq!(i.clone().into_matrix().shape().to_string(), "(2,1)");
        assert_eq!(i.to_string(), "{2,-3}");
    }

    #[test]
    fn validation() {
        assert_eq!(
            Vector::<F64>::from_native(vec![]).unwrap_err().code,
            ErrorCode::InvalidDimensions
        );
        assert_eq!(
            Vector::from_scalars(vec![Scalar::Number(1.), Scalar::BigInt(Integer::from(1))])
                .unwrap_err()
                .code,
            ErrorCode::HeterogeneousElements
        );
        assert_eq!(
            Vector::<F64>::from_native(vec![1.]).unwrap().get(1).unwrap_err().code,
            ErrorCode::IndexOutOfBounds
        );
    }
}
