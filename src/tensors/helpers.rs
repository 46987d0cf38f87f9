//! Factories and predicates for matrices.

use rand::RngCore;

use crate::{
    domains::Numerical,
    error::{ErrorCode, MatrixError, Result},
    math::next_power_of_two,
    options::Tolerance,
};

use super::matrix::{checked_size, Matrix, Shape};

fn check_dimensions(nrows: usize, ncols: usize) -> Result<()> {
    if nrows == 0 || ncols == 0 {
        return Err(MatrixError::new(
            ErrorCode::InvalidDimensions,
            format!("A matrix cannot have shape {}", Shape::new(nrows, ncols)),
        ));
    }
    checked_size(nrows, ncols).map(|_| ())
}

/// Create a new square matrix with `n` rows and ones on the main diagonal and zeroes elsewhere.
pub fn identity<N: Numerical>(n: usize, field: N) -> Result<Matrix<N>> {
    check_dimensions(n, n)?;
    let mut m = Matrix::new(n, n, field);
    for i in 0..n {
        m[(i, i)] = m.field.one();
    }
    Ok(m)
}

pub fn zeros<N: Numerical>(nrows: usize, ncols: usize, field: N) -> Result<Matrix<N>> {
    check_dimensions(nrows, ncols)?;
    Ok(Matrix::new(nrows, ncols, field))
}

pub fn ones<N: Numerical>(nrows: usize, ncols: usize, field: N) -> Result<Matrix<N>> {
    check_dimensions(nrows, ncols)?;
    let mut m = Matrix::new(nrows, ncols, field);
    let one = m.field.one();
    m.data.iter_mut().for_each(|e| *e = one.clone());
    Ok(m)
}

/// Create a matrix with entries sampled from `[range.0, range.1)` by the thread-local generator.
pub fn random<N: Numerical>(
    nrows: usize,
    ncols: usize,
    range: (i64, i64),
    field: N,
) -> Result<Matrix<N>> {
    random_with_rng(nrows, ncols, range, field, &mut rand::thread_rng())
}

/// Create a matrix with entries sampled from `[range.0, range.1)` by `rng`.
pub fn random_with_rng<N: Numerical, R: RngCore>(
    nrows: usize,
    ncols: usize,
    range: (i64, i64),
    field: N,
    rng: &mut R,
) -> Result<Matrix<N>> {
    check_dimensions(nrows, ncols)?;
    if range.0 >= range.1 {
        return Err(MatrixError::new(
            ErrorCode::InvalidArgument,
            format!("Cannot sample from the empty range [{}, {})", range.0, range.1),
        ));
    }

    let mut m = Matrix::new(nrows, ncols, field);
    for i in 0..m.data.len() {
        m.data[i] = m.field.sample(rng, range);
    }
    Ok(m)
}

/// Check if all entries below the main diagonal are zero.
pub fn is_upper_triangular<N: Numerical>(m: &Matrix<N>) -> bool {
    m.row_iter()
        .enumerate()
        .all(|(i, row)| row.iter().take(i).all(|e| m.field.is_zero(e)))
}

/// Check if all entries above the main diagonal are zero.
pub fn is_lower_triangular<N: Numerical>(m: &Matrix<N>) -> bool {
    m.row_iter()
        .enumerate()
        .all(|(i, row)| row.iter().skip(i + 1).all(|e| m.field.is_zero(e)))
}

pub fn is_int_matrix<N: Numerical>(m: &Matrix<N>) -> bool {
    m.data.iter().all(|e| m.field.is_integral(e))
}

/// Pad the matrix with zeroes to a square matrix whose dimension is the smallest power
/// of two that fits both the rows and the columns.
pub fn pad_matrix_to_power_of_two<N: Numerical>(m: &Matrix<N>) -> Matrix<N> {
    m.padded(next_power_of_two(m.nrows.max(m.ncols)))
}

/// Replace entries that are zero up to `tolerance` by an exact zero.
pub fn round_matrix_to_zero<N: Numerical>(m: &mut Matrix<N>, tolerance: &Tolerance) {
    let field = &m.field;
    for e in m.data.iter_mut() {
        if field.is_near_zero(e, tolerance) && !field.is_zero(e) {
            *e = field.zero();
        }
    }
}

/// Round every entry to `digits` decimal places.
pub fn to_fixed_matrix<N: Numerical>(m: &mut Matrix<N>, digits: u32) {
    let field = &m.field;
    for e in m.data.iter_mut() {
        *e = field.round_to(e, digits);
    }
}
