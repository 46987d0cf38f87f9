//! Linear systems, inversion and orthogonalization.
//!
//! All routines work on a copy of the matrix, except [Matrix::qr_decomposition], which rounds
//! the near-zero entries of its input.

use log::{debug, trace};

use crate::{
    domains::Numerical,
    error::{ErrorCode, MatrixError, Result},
    options::{EliminationOptions, Tolerance},
};

use super::{helpers, matrix::Matrix, vector::Vector};

/// The result of [Matrix::gaussian_elimination] and [Matrix::gauss_jordan].
#[derive(Clone, PartialEq, Debug)]
pub enum Reduction<N: Numerical> {
    /// The reduced matrix.
    Matrix(Matrix<N>),
    /// The solution of the augmented system.
    Solution(Vector<N>),
}

impl<N: Numerical> Reduction<N> {
    pub fn into_matrix(self) -> Option<Matrix<N>> {
        match self {
            Reduction::Matrix(m) => Some(m),
            Reduction::Solution(_) => None,
        }
    }

    pub fn into_solution(self) -> Option<Vector<N>> {
        match self {
            Reduction::Matrix(_) => None,
            Reduction::Solution(v) => Some(v),
        }
    }
}

fn no_unique_solution() -> MatrixError {
    MatrixError::new(
        ErrorCode::Unsolvable,
        "The system does not have a unique solution",
    )
}

impl<N: Numerical> Matrix<N> {
    fn check_system(&self, b: &Vector<N>) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::not_square(self.shape()));
        }
        if b.len() != self.nrows {
            return Err(MatrixError::length_mismatch(
                "The right-hand side",
                self.nrows,
                b.len(),
            ));
        }
        self.check_kind(b.kind())
    }

    fn unsolvable(&self, row: usize) -> MatrixError {
        debug!("Zero on the diagonal in row {} of {}", row, self.shape());
        MatrixError::new(
            ErrorCode::Unsolvable,
            format!("The system is singular: the diagonal entry in row {} is zero", row),
        )
    }

    /// Solve `A * x = b` for an upper triangular matrix `A`, starting from the last row.
    pub fn back_substitution(&self, b: &Vector<N>) -> Result<Vector<N>> {
        self.check_system(b)?;
        if !self.is_upper_triangular() {
            return Err(MatrixError::new(
                ErrorCode::NotTriangular,
                "Back substitution requires an upper triangular matrix",
            ));
        }

        let f = &self.field;
        let n = self.nrows;
        let mut x = vec![f.zero(); n];
        for i in (0..n).rev() {
            let mut s = b[i].clone();
            for j in i + 1..n {
                f.sub_mul_assign(&mut s, &self[(i, j)], &x[j]);
            }

            if f.is_zero(&self[(i, i)]) {
                return Err(self.unsolvable(i));
            }
            x[i] = f.div(&s, &self[(i, i)])?;
        }

        Ok(Vector::from_parts(x, f.clone(), self.kind))
    }

    /// Solve `A * x = b` for a lower triangular matrix `A`, starting from the first row.
    pub fn forward_substitution(&self, b: &Vector<N>) -> Result<Vector<N>> {
        self.check_system(b)?;
        if !self.is_lower_triangular() {
            return Err(MatrixError::new(
                ErrorCode::NotTriangular,
                "Forward substitution requires a lower triangular matrix",
            ));
        }

        let f = &self.field;
        let n = self.nrows;
        let mut x = vec![f.zero(); n];
        for i in 0..n {
            let mut s = b[i].clone();
            for j in 0..i {
                f.sub_mul_assign(&mut s, &self[(i, j)], &x[j]);
            }

            if f.is_zero(&self[(i, i)]) {
                return Err(self.unsolvable(i));
            }
            x[i] = f.div(&s, &self[(i, i)])?;
        }

        Ok(Vector::from_parts(x, f.clone(), self.kind))
    }

    /// Reduce the first `max_col` columns in-place. The pivot of every column is the first
    /// entry at or below the current row that is not zero up to the tolerance.
    ///
    /// When `jordan` is set, pivots are scaled to one and the entries above them are
    /// eliminated as well. Returns the number of pivots.
    fn eliminate(
        &mut self,
        max_col: usize,
        tolerance: &Tolerance,
        jordan: bool,
    ) -> Result<usize> {
        let field = self.field.clone();
        let zero = field.zero();

        let mut i = 0;
        for j in 0..max_col {
            if i >= self.nrows {
                break;
            }

            let pivot = (i..self.nrows).find(|&k| !field.is_near_zero(&self[(k, j)], tolerance));
            let Some(p) = pivot else {
                trace!("No pivot in column {}", j);
                continue;
            };
            self.swap_rows(i, p);

            if jordan && !field.is_one(&self[(i, j)]) {
                let x = self[(i, j)].clone();
                for l in j + 1..self.ncols {
                    let e = field.div(&self[(i, l)], &x)?;
                    self[(i, l)] = e;
                }
                self[(i, j)] = field.one();
            }

            let x = self[(i, j)].clone();
            let rows = if jordan { 0 } else { i + 1 };
            for k in rows..self.nrows {
                if k == i || field.is_zero(&self[(k, j)]) {
                    continue;
                }

                let s = field.div(&self[(k, j)], &x)?;
                self[(k, j)] = zero.clone();
                for l in j + 1..self.ncols {
                    let mut e = std::mem::replace(&mut self[(k, l)], zero.clone());
                    field.sub_mul_assign(&mut e, &self[(i, l)], &s);
                    self[(k, l)] = e;
                }
            }

            i += 1;
        }

        Ok(i)
    }

    fn coefficient_columns(&self, options: &EliminationOptions) -> Result<usize> {
        if !options.solve {
            return Ok(self.ncols);
        }

        if self.ncols < 2 {
            return Err(MatrixError::new(
                ErrorCode::InvalidDimensions,
                "An augmented system needs at least one coefficient column and a right-hand side",
            ));
        }
        Ok(self.ncols - 1)
    }

    /// Write the matrix in row echelon form.
    ///
    /// With [EliminationOptions::solve], the last column is the right-hand side of a linear
    /// system, and its solution is computed by back substitution on the reduced matrix.
    /// Equations beyond the number of unknowns must reduce to zero.
    ///
    /// The entries are divided by pivots, so this requires exact division for exact element
    /// types, as for [Q](type@crate::domains::rational::Q).
    pub fn gaussian_elimination(&self, options: &EliminationOptions) -> Result<Reduction<N>> {
        let max_col = self.coefficient_columns(options)?;

        let mut m = self.clone();
        let rank = m.eliminate(max_col, &options.tolerance, false)?;
        m.round_to_zero(&options.tolerance);
        trace!("Echelon form of {} has rank {}", m.shape(), rank);

        if !options.solve {
            return Ok(Reduction::Matrix(m));
        }

        if m.nrows < max_col {
            debug!("System {} has more unknowns than equations", self.shape());
            return Err(no_unique_solution());
        }

        // rows below the square block must vanish, right-hand side included
        if m.data[max_col * m.ncols..].iter().any(|e| !m.field.is_zero(e)) {
            debug!("System {} is inconsistent", self.shape());
            return Err(MatrixError::new(
                ErrorCode::Unsolvable,
                "The system is inconsistent",
            ));
        }

        let (a, b) = m.get_sub_matrix(0..max_col, 0..m.ncols)?.split_last_column();
        a.back_substitution(&b).map(Reduction::Solution)
    }

    /// Write the matrix in reduced row echelon form.
    ///
    /// With [EliminationOptions::solve], the last column is the right-hand side of a linear
    /// system, and it is returned as the solution when the coefficients reduce to the
    /// identity matrix.
    pub fn gauss_jordan(&self, options: &EliminationOptions) -> Result<Reduction<N>> {
        let max_col = self.coefficient_columns(options)?;

        let mut m = self.clone();
        m.eliminate(max_col, &options.tolerance, true)?;
        m.round_to_zero(&options.tolerance);

        if !options.solve {
            return Ok(Reduction::Matrix(m));
        }

        if !m.has_identity_block(max_col) {
            debug!("Coefficients of {} do not reduce to the identity", self.shape());
            return Err(no_unique_solution());
        }

        let (_, b) = m.split_last_column();
        Ok(Reduction::Solution(Vector::from_parts(
            b.data[..max_col].to_vec(),
            b.field,
            b.kind,
        )))
    }

    /// Check if the first `n` rows start with the identity matrix, and the other rows are zero.
    fn has_identity_block(&self, n: usize) -> bool {
        if self.nrows < n {
            return false;
        }

        self.row_iter().enumerate().all(|(i, row)| {
            if i < n {
                row[..n].iter().enumerate().all(|(j, e)| {
                    if i == j {
                        self.field.is_one(e)
                    } else {
                        self.field.is_zero(e)
                    }
                })
            } else {
                row.iter().all(|e| self.field.is_zero(e))
            }
        })
    }

    /// Compute the inverse of a square matrix by reducing `[A | I]` to `[I | A^-1]`.
    pub fn invert_square(&self) -> Result<Matrix<N>> {
        if !self.is_square() {
            return Err(MatrixError::not_square(self.shape()));
        }

        let n = self.nrows;
        let mut m = self.augment(&helpers::identity(n, self.field.clone())?)?;
        let rank = m.eliminate(n, &Tolerance::default(), true)?;

        if rank < n || !m.has_identity_block(n) {
            debug!("Matrix {} is singular with rank {}", self.shape(), rank);
            return Err(MatrixError::new(
                ErrorCode::Unsolvable,
                "The matrix is singular",
            ));
        }

        m.get_sub_matrix(0..n, n..2 * n)
    }

    fn invert_triangular(&self, upper: bool) -> Result<Matrix<N>> {
        if !self.is_square() {
            return Err(MatrixError::not_square(self.shape()));
        }

        let n = self.nrows;
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            let e = Vector::unit(n, i, self.field.clone());
            let x = if upper {
                self.back_substitution(&e)?
            } else {
                self.forward_substitution(&e)?
            };
            data.extend(x.data);
        }

        Ok(Matrix::from_linear(data, n, n, self.field.clone())?.transpose())
    }

    /// Compute the inverse of an upper triangular matrix by back substitution.
    pub fn invert_upper(&self) -> Result<Matrix<N>> {
        self.invert_triangular(true)
    }

    /// Compute the inverse of a lower triangular matrix by forward substitution.
    pub fn invert_lower(&self) -> Result<Matrix<N>> {
        self.invert_triangular(false)
    }

    /// Orthonormalize the columns using the Gram-Schmidt process.
    pub fn gram_schmidt(&self) -> Result<Matrix<N>> {
        self.gram_schmidt_with(&Tolerance::default())
    }

    /// Orthonormalize the columns using the Gram-Schmidt process. A column whose
    /// orthogonal part has a norm below the tolerance is linearly dependent.
    pub fn gram_schmidt_with(&self, tolerance: &Tolerance) -> Result<Matrix<N>> {
        let mut basis: Vec<Vector<N>> = Vec::with_capacity(self.ncols);
        for j in 0..self.ncols {
            let mut u = self.column_vector(j);
            for b in &basis {
                u = u.subtract(&u.project_onto(b)?)?;
            }

            let norm = u.norm()?;
            if self.field.is_zero(&norm) || self.field.to_f64(&norm) < tolerance.epsilon {
                return Err(MatrixError::new(
                    ErrorCode::LinearlyDependent,
                    format!("Column {} is linearly dependent on the previous columns", j),
                ));
            }
            basis.push(u);
        }

        let mut q = Matrix::new(self.nrows, self.ncols, self.field.clone());
        q.kind = self.kind;
        for (j, u) in basis.iter().enumerate() {
            for (i, e) in u.normalize()?.data.into_iter().enumerate() {
                q[(i, j)] = e;
            }
        }
        Ok(q)
    }

    /// Compute the QR decomposition `A = Q * R`, where `Q` has orthonormal columns
    /// and `R` is upper triangular.
    ///
    /// Entries of `A` that are zero up to the default tolerance are set to zero.
    pub fn qr_decomposition(&mut self) -> Result<(Matrix<N>, Matrix<N>)> {
        let tolerance = Tolerance::default();
        let q = self.gram_schmidt_with(&tolerance)?;
        let mut r = q.transpose().multiply(self)?;

        r.round_to_zero(&tolerance);
        self.round_to_zero(&tolerance);
        Ok((q, r))
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::Reduction;
    use crate::{
        domains::{
            float::F64,
            rational::{Fraction, Q},
        },
        error::ErrorCode,
        options::{EliminationOptions, Tolerance},
        tensors::{helpers::identity, matrix::Matrix, vector::Vector},
    };

    fn frac_matrix(rows: Vec<Vec<i64>>) -> Matrix<Q> {
        Matrix::from_nested_vec(
            rows.into_iter()
                .map(|r| r.into_iter().map(Fraction::from).collect())
                .collect(),
            Q,
        )
        .unwrap()
    }

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn substitution() {
        let u = Matrix::<F64>::from_rows(vec![vec![2., 1.], vec![0., 4.]]).unwrap();
        let b = Vector::new(vec![5., 8.], F64).unwrap();
        assert_eq!(u.back_substitution(&b).unwrap().data(), &[1.5, 2.]);
        assert_eq!(
            u.forward_substitution(&b).unwrap_err().code,
            ErrorCode::NotTriangular
        );

        let l = u.transpose();
        assert_eq!(l.forward_substitution(&b).unwrap().data(), &[2.5, 1.375]);

        let singular = Matrix::<F64>::from_rows(vec![vec![1., 1.], vec![0., 0.]]).unwrap();
        assert_eq!(
            singular.back_substitution(&b).unwrap_err().code,
            ErrorCode::Unsolvable
        );

        let lower_singular = Matrix::<F64>::from_rows(vec![vec![1., 0.], vec![2., 0.]]).unwrap();
        assert_eq!(
            lower_singular.forward_substitution(&b).unwrap_err().code,
            ErrorCode::Unsolvable
        );

        let short = Vector::new(vec![1.], F64).unwrap();
        assert_eq!(
            u.back_substitution(&short).unwrap_err().code,
            ErrorCode::DimensionMismatch
        );

        let wide = Matrix::<F64>::from_rows(vec![vec![1., 2., 3.]]).unwrap();
        assert_eq!(
            wide.back_substitution(&short).unwrap_err().code,
            ErrorCode::NotSquare
        );
    }

    #[test]
    fn echelon_form() {
        let a = Matrix::<F64>::from_rows(vec![vec![4., 3.], vec![6., 3.]]).unwrap();
        let r = a
            .gaussian_elimination(&EliminationOptions::reduce())
            .unwrap()
            .into_matrix()
            .unwrap();
        assert!(r.is_upper_triangular());
        assert_eq!(r.data(), &[4., 3., 0., -1.5]);

        let b = frac_matrix(vec![vec![0, 2, 4], vec![0, 1, 2], vec![0, 3, 7]]);
        let r = b
            .gaussian_elimination(&EliminationOptions::reduce())
            .unwrap()
            .into_matrix()
            .unwrap();
        assert_eq!(
            r,
            frac_matrix(vec![vec![0, 2, 4], vec![0, 0, 1], vec![0, 0, 0]])
        );
    }

    #[test]
    fn solve_systems() {
        // x + 2y = 5, 3x + 4y = 6
        let a = frac_matrix(vec![vec![1, 2, 5], vec![3, 4, 6]]);

        let x = a
            .gaussian_elimination(&EliminationOptions::solve())
            .unwrap()
            .into_solution()
            .unwrap();
        assert_eq!(x.data(), &[Fraction::from(-4), frac(9, 2)]);

        let y = a
            .gauss_jordan(&EliminationOptions::solve())
            .unwrap()
            .into_solution()
            .unwrap();
        assert_eq!(x, y);

        let singular = frac_matrix(vec![vec![1, 2, 5], vec![2, 4, 6]]);
        assert_eq!(
            singular
                .gaussian_elimination(&EliminationOptions::solve())
                .unwrap_err()
                .code,
            ErrorCode::Unsolvable
        );
        assert_eq!(
            singular
                .gauss_jordan(&EliminationOptions::solve())
                .unwrap_err()
                .code,
            ErrorCode::Unsolvable
        );

        let column = frac_matrix(vec![vec![1], vec![2]]);
        assert_eq!(
            column
                .gauss_jordan(&EliminationOptions::solve())
                .unwrap_err()
                .code,
            ErrorCode::InvalidDimensions
        );
    }

    #[test]
    fn overdetermined_systems() {
        // x = 1, y = 2, x + y = 3
        let consistent = frac_matrix(vec![vec![1, 0, 1], vec![0, 1, 2], vec![1, 1, 3]]);
        let x = consistent
            .gaussian_elimination(&EliminationOptions::solve())
            .unwrap()
            .into_solution()
            .unwrap();
        assert_eq!(x.data(), &[Fraction::from(1), Fraction::from(2)]);
        let y = consistent
            .gauss_jordan(&EliminationOptions::solve())
            .unwrap()
            .into_solution()
            .unwrap();
        assert_eq!(x, y);

        let inconsistent = frac_matrix(vec![vec![1, 0, 1], vec![0, 1, 2], vec![1, 1, 4]]);
        for r in [
            inconsistent.gaussian_elimination(&EliminationOptions::solve()),
            inconsistent.gauss_jordan(&EliminationOptions::solve()),
        ] {
            assert_eq!(r.unwrap_err().code, ErrorCode::Unsolvable);
        }

        let underdetermined = frac_matrix(vec![vec![1, 1, 2]]);
        for r in [
            underdetermined.gaussian_elimination(&EliminationOptions::solve()),
            underdetermined.gauss_jordan(&EliminationOptions::solve()),
        ] {
            assert_eq!(r.unwrap_err().code, ErrorCode::Unsolvable);
        }
    }

    #[test]
    fn reduced_echelon_form() {
        let a = frac_matrix(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        let r = a
            .gauss_jordan(&EliminationOptions::reduce())
            .unwrap()
            .into_matrix()
            .unwrap();
        assert_eq!(
            r,
            frac_matrix(vec![vec![1, 0, -1], vec![0, 1, 2], vec![0, 0, 0]])
        );

        let again = r.gauss_jordan(&EliminationOptions::reduce()).unwrap();
        assert_eq!(again, Reduction::Matrix(r));
    }

    #[test]
    fn inverse() {
        let a = frac_matrix(vec![vec![1, 2, 3], vec![4, 5, 16], vec![7, 8, 9]]);
        assert_eq!(
            a.invert_square().unwrap().data(),
            &[
                frac(-83, 60),
                frac(1, 10),
                frac(17, 60),
                frac(19, 15),
                frac(-1, 5),
                frac(-1, 15),
                frac(-1, 20),
                frac(1, 10),
                frac(-1, 20),
            ]
        );

        let i = identity(3, F64).unwrap();
        assert_eq!(i.invert_square().unwrap(), i);

        let singular = frac_matrix(vec![vec![1, 2], vec![2, 4]]);
        assert_eq!(
            singular.invert_square().unwrap_err().code,
            ErrorCode::Unsolvable
        );
        assert_eq!(
            frac_matrix(vec![vec![1, 2]]).invert_square().unwrap_err().code,
            ErrorCode::NotSquare
        );
    }

    #[test]
    fn triangular_inverse() {
        let u = frac_matrix(vec![vec![2, 1], vec![0, 4]]);
        let inv = u.invert_upper().unwrap();
        assert_eq!(inv.data(), &[frac(1, 2), frac(-1, 8), frac(0, 1), frac(1, 4)]);
        assert_eq!(inv, u.invert_square().unwrap());

        let l = u.transpose();
        assert_eq!(l.invert_lower().unwrap(), inv.transpose());
        assert_eq!(l.invert_upper().unwrap_err().code, ErrorCode::NotTriangular);
        assert_eq!(u.invert_lower().unwrap_err().code, ErrorCode::NotTriangular);
    }

    #[test]
    fn orthonormalize() {
        let a = Matrix::<F64>::from_rows(vec![vec![3., 1.], vec![4., 1.]]).unwrap();
        let q = a.gram_schmidt().unwrap();
        assert_relative_eq!(q[(0, 0)], 0.6);
        assert_relative_eq!(q[(1, 0)], 0.8);

        let qtq = q.transpose().multiply(&q).unwrap();
        assert!(qtq.equal(&identity(2, F64).unwrap()));

        let dependent = Matrix::<F64>::from_rows(vec![vec![1., 2.], vec![2., 4.]]).unwrap();
        assert_eq!(
            dependent.gram_schmidt().unwrap_err().code,
            ErrorCode::LinearlyDependent
        );
    }

    #[test]
    fn qr() {
        let mut a = Matrix::<F64>::from_rows(vec![
            vec![12., -51., 4.],
            vec![6., 167., -68.],
            vec![-4., 24., -41.],
        ])
        .unwrap();

        let (q, r) = a.qr_decomposition().unwrap();
        assert!(r.is_upper_triangular());
        let tolerance = Tolerance::new(1e-9);
        assert!(q.multiply(&r).unwrap().equal_with(&a, &tolerance));
        assert_relative_eq!(r[(0, 0)], 14., epsilon = 1e-12);
        assert_relative_eq!(r[(1, 1)], 175., epsilon = 1e-10);
    }

    #[test]
    fn qr_rounds_input() {
        let mut a = Matrix::<F64>::from_rows(vec![vec![3., 1e-15], vec![4., 2.]]).unwrap();
        let (q, r) = a.qr_decomposition().unwrap();
        assert_eq!(a[(0, 1)], 0.);
        assert_eq!(a.data(), &[3., 0., 4., 2.]);
        assert!(q.multiply(&r).unwrap().equal_with(&a, &Tolerance::new(1e-9)));
    }
}
