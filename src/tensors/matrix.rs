use std::{
    fmt::Display,
    ops::{Index, IndexMut, Neg, Range},
    slice::Chunks,
};

use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    domains::{
        resolve,
        scalar::{Scalar, ScalarField},
        ElementKind, Numerical,
    },
    error::{Details, ErrorCode, MatrixError, Result},
    math::next_power_of_two,
    options::Tolerance,
    printer::MatrixPrinter,
};

use super::{helpers, vector::Vector};

/// The storage of matrix entries. Matrices up to 5x5 are stored inline.
pub(crate) type Storage<E> = SmallVec<[E; 25]>;

/// The number of rows and columns of a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

impl Shape {
    pub const fn new(rows: usize, columns: usize) -> Shape {
        Shape { rows, columns }
    }

    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// More rows than columns.
    pub fn is_tall(&self) -> bool {
        self.rows > self.columns
    }

    /// More columns than rows.
    pub fn is_wide(&self) -> bool {
        self.rows < self.columns
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.rows, self.columns)
    }
}

/// A dense matrix with entries that are elements of the numerical `N`, stored in row-major order.
///
/// Every entry has the same [ElementKind], which is checked when the matrix is built from
/// user-supplied entries. Binary operations require both operands to have the same kind.
///
/// ```
/// use numerica::{domains::float::F64, tensors::matrix::Matrix};
///
/// let a = Matrix::from_nested_vec(vec![vec![1., 2.], vec![3., 4.]], F64).unwrap();
/// let b = a.add(&Matrix::from_linear(vec![1.; 4], 2, 2, F64).unwrap()).unwrap();
/// assert_eq!(b.to_string(), "{{2,3},{4,5}}");
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Matrix<N: Numerical> {
    pub(crate) data: Storage<N::Element>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
    pub(crate) field: N,
    pub(crate) kind: ElementKind,
}

/// Check that all entries have the element kind of the numerical.
fn check_homogeneous<N: Numerical>(data: &[N::Element], field: &N) -> Result<ElementKind> {
    let kind = field.kind();
    if let Some((i, e)) = data
        .iter()
        .enumerate()
        .find(|(_, e)| field.element_kind(e) != kind)
    {
        return Err(MatrixError::new(
            ErrorCode::HeterogeneousElements,
            format!(
                "Entry {} = {} has type {}, while the matrix has type {}",
                i,
                e,
                field.element_kind(e),
                kind
            ),
        )
        .with_details(Details::Kinds(kind, field.element_kind(e))));
    }
    Ok(kind)
}

/// The number of entries of a matrix with the given shape. Fails when it does not fit in a `usize`.
pub(crate) fn checked_size(nrows: usize, ncols: usize) -> Result<usize> {
    nrows.checked_mul(ncols).ok_or_else(|| {
        MatrixError::new(
            ErrorCode::InvalidDimensions,
            format!("A matrix of shape {} has too many entries", Shape::new(nrows, ncols)),
        )
    })
}

fn check_range(range: &Range<usize>, bound: usize, what: &str) -> Result<()> {
    if range.start >= range.end || range.end > bound {
        return Err(MatrixError::new(
            ErrorCode::InvalidBounds,
            format!(
                "The {} range {}..{} is empty or exceeds the {} {}s of the matrix",
                what, range.start, range.end, bound, what
            ),
        ));
    }
    Ok(())
}

impl<N: Numerical> Matrix<N> {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub(crate) fn new(nrows: usize, ncols: usize, field: N) -> Matrix<N> {
        Matrix {
            data: (0..nrows * ncols).map(|_| field.zero()).collect(),
            nrows,
            ncols,
            kind: field.kind(),
            field,
        }
    }

    /// Convert a linear, row-major representation of a matrix to a `Matrix`.
    pub fn from_linear(
        data: Vec<N::Element>,
        nrows: usize,
        ncols: usize,
        field: N,
    ) -> Result<Matrix<N>> {
        if nrows == 0 || ncols == 0 {
            return Err(MatrixError::new(
                ErrorCode::InvalidDimensions,
                format!("A matrix cannot have shape {}", Shape::new(nrows, ncols)),
            ));
        }

        let size = checked_size(nrows, ncols)?;
        if data.len() != size {
            return Err(MatrixError::new(
                ErrorCode::InvalidDimensions,
                format!(
                    "Data length does not match matrix dimensions: {} vs {}",
                    data.len(),
                    Shape::new(nrows, ncols)
                ),
            )
            .with_details(Details::Lengths(size, data.len())));
        }

        let kind = check_homogeneous(&data, &field)?;

        Ok(Matrix {
            data: data.into(),
            nrows,
            ncols,
            field,
            kind,
        })
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    pub fn from_nested_vec(matrix: Vec<Vec<N::Element>>, field: N) -> Result<Matrix<N>> {
        let cols = matrix.first().map(|r| r.len()).unwrap_or(0);
        if cols == 0 {
            return Err(MatrixError::new(
                ErrorCode::InvalidDimensions,
                "Cannot create a matrix without entries",
            ));
        }

        let nrows = matrix.len();
        let mut data = Vec::with_capacity(nrows * cols);
        for (i, d) in matrix.into_iter().enumerate() {
            if d.len() != cols {
                return Err(MatrixError::new(
                    ErrorCode::InvalidDimensions,
                    format!(
                        "Matrix is not rectangular: row {} has {} entries instead of {}",
                        i,
                        d.len(),
                        cols
                    ),
                ));
            }

            data.extend(d);
        }

        Self::from_linear(data, nrows, cols, field)
    }

    /// Create a matrix from nested rows, using the native numerical of the element type.
    pub fn from_rows(matrix: Vec<Vec<N::Element>>) -> Result<Matrix<N>> {
        Self::from_nested_vec(matrix, resolve(None)?)
    }

    /// Create a matrix from row-major data, using the native numerical of the element type.
    pub fn from_linear_native(
        data: Vec<N::Element>,
        nrows: usize,
        ncols: usize,
    ) -> Result<Matrix<N>> {
        Self::from_linear(data, nrows, ncols, resolve(None)?)
    }

    /// Return the number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Return the number of entries.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.nrows, self.ncols)
    }

    pub fn is_square(&self) -> bool {
        self.shape().is_square()
    }

    pub fn is_tall(&self) -> bool {
        self.shape().is_tall()
    }

    pub fn is_wide(&self) -> bool {
        self.shape().is_wide()
    }

    /// Return the numerical of the matrix entries.
    pub fn field(&self) -> &N {
        &self.field
    }

    /// Return the type tag shared by all entries.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Return the entries in row-major order.
    pub fn data(&self) -> &[N::Element] {
        &self.data
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, N::Element> {
        self.data.chunks(self.ncols)
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::new(
                ErrorCode::IndexOutOfBounds,
                format!(
                    "Index ({},{}) is out of bounds for a matrix of shape {}",
                    row,
                    col,
                    self.shape()
                ),
            )
            .with_details(Details::Index {
                row,
                col,
                shape: self.shape(),
            }));
        }
        Ok(())
    }

    pub(crate) fn check_kind(&self, other: ElementKind) -> Result<()> {
        if self.kind != other {
            return Err(MatrixError::kind_mismatch(self.kind, other));
        }
        Ok(())
    }

    fn check_same_shape(&self, other: &Matrix<N>, op: &str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(MatrixError::shape_mismatch(op, self.shape(), other.shape()));
        }
        self.check_kind(other.kind)
    }

    /// Get the entry in row `row` and column `col`.
    pub fn get_element(&self, row: usize, col: usize) -> Result<&N::Element> {
        self.check_index(row, col)?;
        Ok(&self[(row, col)])
    }

    /// Set the entry in row `row` and column `col`. The value must have the type of the matrix.
    pub fn set_element(&mut self, row: usize, col: usize, value: N::Element) -> Result<()> {
        self.check_index(row, col)?;
        self.check_kind(self.field.element_kind(&value))?;
        self[(row, col)] = value;
        Ok(())
    }

    /// Get a copy of row `row`.
    pub fn get_row(&self, row: usize) -> Result<Vector<N>> {
        self.check_index(row, 0)?;
        Ok(self.row_vector(row))
    }

    /// Get a copy of column `col`.
    pub fn get_column(&self, col: usize) -> Result<Vector<N>> {
        self.check_index(0, col)?;
        Ok(self.column_vector(col))
    }

    pub(crate) fn row_vector(&self, row: usize) -> Vector<N> {
        Vector::from_parts(
            self.data[row * self.ncols..(row + 1) * self.ncols].to_vec(),
            self.field.clone(),
            self.kind,
        )
    }

    pub(crate) fn column_vector(&self, col: usize) -> Vector<N> {
        Vector::from_parts(
            (0..self.nrows).map(|r| self[(r, col)].clone()).collect(),
            self.field.clone(),
            self.kind,
        )
    }

    /// Copy the block with rows in `rows` and columns in `cols` into a new matrix.
    pub fn get_sub_matrix(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Matrix<N>> {
        check_range(&rows, self.nrows, "row")?;
        check_range(&cols, self.ncols, "column")?;
        Ok(self.block(rows.start, cols.start, rows.len(), cols.len()))
    }

    /// Overwrite the block with rows in `rows` and columns in `cols` by `block`.
    pub fn set_sub_matrix(
        &mut self,
        rows: Range<usize>,
        cols: Range<usize>,
        block: &Matrix<N>,
    ) -> Result<()> {
        check_range(&rows, self.nrows, "row")?;
        check_range(&cols, self.ncols, "column")?;

        let target = Shape::new(rows.len(), cols.len());
        if block.shape() != target {
            return Err(MatrixError::shape_mismatch(
                "insert a block into",
                target,
                block.shape(),
            ));
        }
        self.check_kind(block.kind)?;

        for (r, src) in rows.zip(block.row_iter()) {
            let start = r * self.ncols + cols.start;
            self.data[start..start + cols.len()].clone_from_slice(src);
        }

        Ok(())
    }

    /// Copy a block without bounds checks, padding with zeroes outside of the matrix.
    fn block(&self, row: usize, col: usize, nrows: usize, ncols: usize) -> Matrix<N> {
        let mut m = Matrix::new(nrows, ncols, self.field.clone());
        m.kind = self.kind;
        for i in 0..nrows.min(self.nrows.saturating_sub(row)) {
            for j in 0..ncols.min(self.ncols.saturating_sub(col)) {
                m[(i, j)] = self[(row + i, col + j)].clone();
            }
        }
        m
    }

    /// Pad the matrix with zeroes to a square matrix of dimension `n`.
    pub(crate) fn padded(&self, n: usize) -> Matrix<N> {
        self.block(0, 0, n, n)
    }

    fn zip_with(
        &self,
        other: &Matrix<N>,
        f: impl Fn(&N::Element, &N::Element) -> N::Element,
    ) -> Matrix<N> {
        Matrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
            kind: self.kind,
        }
    }

    /// Add two matrices of the same shape.
    pub fn add(&self, other: &Matrix<N>) -> Result<Matrix<N>> {
        self.check_same_shape(other, "add")?;
        Ok(self.zip_with(other, |a, b| self.field.add(a, b)))
    }

    /// Subtract `other` from `self`.
    pub fn subtract(&self, other: &Matrix<N>) -> Result<Matrix<N>> {
        self.check_same_shape(other, "subtract")?;
        Ok(self.zip_with(other, |a, b| self.field.sub(a, b)))
    }

    /// Multiply every entry by `factor`, converted to the element type.
    pub fn scale(&self, factor: f64) -> Result<Matrix<N>> {
        if !factor.is_finite() {
            return Err(MatrixError::new(
                ErrorCode::TypeMismatch,
                format!("Cannot scale a matrix by {}", factor),
            ));
        }
        let e = self.field.from_f64(factor)?;
        Ok(self.mul_scalar(&e))
    }

    /// Multiply the scalar `e` to each entry of the matrix.
    pub fn mul_scalar(&self, e: &N::Element) -> Matrix<N> {
        Matrix {
            data: self.data.iter().map(|ee| self.field.mul(ee, e)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
            kind: self.kind,
        }
    }

    /// Multiply column `j` by entry `j` of `v`.
    pub fn v_multiply(&self, v: &Vector<N>) -> Result<Matrix<N>> {
        if v.len() != self.ncols {
            return Err(MatrixError::length_mismatch(
                "The column scaling vector",
                self.ncols,
                v.len(),
            ));
        }
        self.check_kind(v.kind())?;

        let mut m = self.clone();
        for row in m.data.chunks_mut(self.ncols) {
            for (e, s) in row.iter_mut().zip(v.data()) {
                self.field.mul_assign(e, s);
            }
        }
        Ok(m)
    }

    /// Multiply two matrices.
    ///
    /// The right operand is transposed first, so that every entry of the result is the
    /// scalar product of two contiguous slices. These are accumulated in blocks of at most
    /// 16 entries.
    pub fn multiply(&self, other: &Matrix<N>) -> Result<Matrix<N>> {
        if self.ncols != other.nrows {
            return Err(MatrixError::shape_mismatch(
                "multiply",
                self.shape(),
                other.shape(),
            ));
        }
        self.check_kind(other.kind)?;

        let block_size = self.ncols.min(16);
        let t = other.transpose();

        let mut m = Matrix::new(self.nrows, other.ncols, self.field.clone());
        m.kind = self.kind;
        for (i, row) in self.row_iter().enumerate() {
            for (j, col) in t.row_iter().enumerate() {
                let sum = &mut m.data[i * other.ncols + j];
                for (a, b) in row.chunks(block_size).zip(col.chunks(block_size)) {
                    self.field.add_assign(sum, &self.field.dot(a, b));
                }
            }
        }

        Ok(m)
    }

    /// Multiply two matrices using the Strassen algorithm.
    ///
    /// Both operands are padded with zeroes to a square matrix whose dimension is a power
    /// of two, and the padding is removed from the result.
    pub fn strassen_multiply(&self, other: &Matrix<N>) -> Result<Matrix<N>> {
        if self.ncols != other.nrows {
            return Err(MatrixError::shape_mismatch(
                "multiply",
                self.shape(),
                other.shape(),
            ));
        }
        self.check_kind(other.kind)?;

        let n = next_power_of_two(self.nrows.max(self.ncols).max(other.ncols));
        if n != self.nrows || n != self.ncols || n != other.ncols {
            debug!(
                "Padding {} and {} to ({},{}) for Strassen multiplication",
                self.shape(),
                other.shape(),
                n,
                n
            );
        }

        let c = Self::strassen(&self.padded(n), &other.padded(n));
        Ok(c.block(0, 0, self.nrows, other.ncols))
    }

    fn strassen(a: &Matrix<N>, b: &Matrix<N>) -> Matrix<N> {
        let n = a.nrows;
        if n == 1 {
            let mut m = a.clone();
            m.data[0] = a.field.mul(&a.data[0], &b.data[0]);
            return m;
        }

        let h = n / 2;
        let f = &a.field;
        let add = |x: &Matrix<N>, y: &Matrix<N>| x.zip_with(y, |p, q| f.add(p, q));
        let sub = |x: &Matrix<N>, y: &Matrix<N>| x.zip_with(y, |p, q| f.sub(p, q));

        let (a11, a12, a21, a22) = (
            a.block(0, 0, h, h),
            a.block(0, h, h, h),
            a.block(h, 0, h, h),
            a.block(h, h, h, h),
        );
        let (b11, b12, b21, b22) = (
            b.block(0, 0, h, h),
            b.block(0, h, h, h),
            b.block(h, 0, h, h),
            b.block(h, h, h, h),
        );

        let m1 = Self::strassen(&add(&a11, &a22), &add(&b11, &b22));
        let m2 = Self::strassen(&add(&a21, &a22), &b11);
        let m3 = Self::strassen(&a11, &sub(&b12, &b22));
        let m4 = Self::strassen(&a22, &sub(&b21, &b11));
        let m5 = Self::strassen(&add(&a11, &a12), &b22);
        let m6 = Self::strassen(&sub(&a21, &a11), &add(&b11, &b12));
        let m7 = Self::strassen(&sub(&a12, &a22), &add(&b21, &b22));

        let c11 = add(&sub(&add(&m1, &m4), &m5), &m7);
        let c12 = add(&m3, &m5);
        let c21 = add(&m2, &m4);
        let c22 = add(&add(&sub(&m1, &m2), &m3), &m6);

        let mut c = Matrix::new(n, n, a.field.clone());
        c.kind = a.kind;
        for (quadrant, r, s) in [(&c11, 0, 0), (&c12, 0, h), (&c21, h, 0), (&c22, h, h)] {
            for (i, row) in quadrant.row_iter().enumerate() {
                let start = (r + i) * n + s;
                c.data[start..start + h].clone_from_slice(row);
            }
        }
        c
    }

    /// Raise a square matrix to the power `exp` by repeated squaring.
    pub fn pow(&self, exp: u32) -> Result<Matrix<N>> {
        if !self.is_square() {
            return Err(MatrixError::not_square(self.shape()));
        }

        match exp {
            0 => helpers::identity(self.nrows, self.field.clone()),
            1 => Ok(self.clone()),
            e if e % 2 == 0 => {
                let half = self.pow(e / 2)?;
                half.multiply(&half)
            }
            e => self.pow(e - 1)?.multiply(self),
        }
    }

    /// Transpose the matrix.
    pub fn transpose(&self) -> Matrix<N> {
        let mut m = Matrix::new(self.ncols, self.nrows, self.field.clone());
        m.kind = self.kind;
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                m[(j, i)] = self[(i, j)].clone();
            }
        }
        m
    }

    /// Check if the matrices have the same shape and type, and entries that are
    /// equal up to the default [Tolerance].
    pub fn equal(&self, other: &Matrix<N>) -> bool {
        self.equal_with(other, &Tolerance::default())
    }

    pub fn equal_with(&self, other: &Matrix<N>, tolerance: &Tolerance) -> bool {
        self.shape() == other.shape()
            && self.kind == other.kind
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| self.field.approx_eq(a, b, tolerance))
    }

    /// Reinterpret the row-major entries as a matrix with `nrows` rows and `ncols` columns.
    pub fn reshape(&self, nrows: usize, ncols: usize) -> Result<Matrix<N>> {
        if nrows == 0 || ncols == 0 || nrows.checked_mul(ncols) != Some(self.size()) {
            return Err(MatrixError::new(
                ErrorCode::ReshapeMismatch,
                format!(
                    "Cannot reshape a matrix of shape {} to {}",
                    self.shape(),
                    Shape::new(nrows, ncols)
                ),
            )
            .with_details(Details::Shapes(self.shape(), Shape::new(nrows, ncols))));
        }

        Ok(Matrix {
            data: self.data.clone(),
            nrows,
            ncols,
            field: self.field.clone(),
            kind: self.kind,
        })
    }

    /// Append the columns of `other` to the right of `self`.
    pub fn augment(&self, other: &Matrix<N>) -> Result<Matrix<N>> {
        if self.nrows != other.nrows {
            return Err(MatrixError::shape_mismatch(
                "augment",
                self.shape(),
                other.shape(),
            ));
        }
        self.check_kind(other.kind)?;

        let mut data = Storage::with_capacity(self.size() + other.size());
        for (a, b) in self.row_iter().zip(other.row_iter()) {
            data.extend(a.iter().cloned());
            data.extend(b.iter().cloned());
        }

        Ok(Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols + other.ncols,
            field: self.field.clone(),
            kind: self.kind,
        })
    }

    /// Apply a function `f` to each entry of the matrix.
    pub fn map<G: Numerical>(
        &self,
        f: impl Fn(&N::Element) -> G::Element,
        field: G,
    ) -> Result<Matrix<G>> {
        Matrix::from_linear(
            self.data.iter().map(f).collect(),
            self.nrows,
            self.ncols,
            field,
        )
    }

    /// Remove the last column, and return it as a vector.
    pub(crate) fn split_last_column(&self) -> (Matrix<N>, Vector<N>) {
        (
            self.block(0, 0, self.nrows, self.ncols - 1),
            self.column_vector(self.ncols - 1),
        )
    }

    pub(crate) fn swap_rows(&mut self, i: usize, k: usize) {
        if i != k {
            trace!("Swapping rows {} and {}", i, k);
            for l in 0..self.ncols {
                self.data.swap(self.ncols * i + l, self.ncols * k + l);
            }
        }
    }

    pub fn is_upper_triangular(&self) -> bool {
        helpers::is_upper_triangular(self)
    }

    pub fn is_lower_triangular(&self) -> bool {
        helpers::is_lower_triangular(self)
    }

    /// Check if all entries are integral.
    pub fn is_int_matrix(&self) -> bool {
        helpers::is_int_matrix(self)
    }

    /// Replace entries that are zero up to `tolerance` by an exact zero.
    pub fn round_to_zero(&mut self, tolerance: &Tolerance) {
        helpers::round_matrix_to_zero(self, tolerance)
    }

    /// Round every entry to `digits` decimal places.
    pub fn to_fixed(&mut self, digits: u32) {
        helpers::to_fixed_matrix(self, digits)
    }

    /// Write the shape, type and entries of the matrix to the debug log.
    pub fn log_debug(&self) {
        debug!("Matrix {} of {}: {}", self.shape(), self.kind, self);
    }
}

impl<N: Numerical + Send + Sync> Matrix<N>
where
    N::Element: Send + Sync,
{
    /// Add two matrices of the same shape, distributing the rows over the available threads.
    pub fn add_parallel(&self, other: &Matrix<N>) -> Result<Matrix<N>> {
        self.check_same_shape(other, "add")?;

        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(self.nrows);
        let chunk = self.nrows.div_ceil(threads) * self.ncols;
        trace!("Adding {} on {} threads", self.shape(), threads);

        let mut m = Matrix::new(self.nrows, self.ncols, self.field.clone());
        m.kind = self.kind;

        let field = &self.field;
        std::thread::scope(|s| {
            for (out, (a, b)) in m
                .data
                .chunks_mut(chunk)
                .zip(self.data.chunks(chunk).zip(other.data.chunks(chunk)))
            {
                s.spawn(move || {
                    for (c, (x, y)) in out.iter_mut().zip(a.iter().zip(b)) {
                        *c = field.add(x, y);
                    }
                });
            }
        });

        Ok(m)
    }
}

impl Matrix<ScalarField> {
    /// Create a matrix of self-describing scalars. The type of the matrix is the type of the
    /// first entry, and all other entries must have the same type.
    pub fn from_scalar_rows(matrix: Vec<Vec<Scalar>>) -> Result<Matrix<ScalarField>> {
        let field = matrix
            .first()
            .and_then(|r| r.first())
            .map(ScalarField::infer)
            .unwrap_or_default();
        Self::from_nested_vec(matrix, field)
    }
}

impl<N: Numerical> Index<(usize, usize)> for Matrix<N> {
    type Output = N::Element;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index.0 * self.ncols + index.1]
    }
}

impl<N: Numerical> IndexMut<(usize, usize)> for Matrix<N> {
    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut N::Element {
        &mut self.data[index.0 * self.ncols + index.1]
    }
}

impl<N: Numerical> Display for Matrix<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

impl<N: Numerical> Neg for Matrix<N> {
    type Output = Matrix<N>;

    /// Negate each entry of the matrix.
    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = self.field.neg(e);
        }

        self
    }
}

#[cfg(test)]
mod test {
    use crate::{
        domains::{
            float::F64,
            integer::{Integer, Z},
            rational::{Fraction, Q},
            scalar::Scalar,
            ElementKind,
        },
        error::ErrorCode,
        tensors::{helpers::identity, matrix::Matrix, vector::Vector},
    };

    fn int_matrix(rows: Vec<Vec<i64>>) -> Matrix<Z> {
        Matrix::from_nested_vec(
            rows.into_iter()
                .map(|r| r.into_iter().map(Integer::from).collect())
                .collect(),
            Z,
        )
        .unwrap()
    }

    #[test]
    fn construction() {
        let a = Matrix::<F64>::from_rows(vec![vec![1., 2.], vec![3., 4.]]).unwrap();
        assert_eq!(a.shape().to_string(), "(2,2)");
        assert_eq!(a.size(), 4);
        assert!(a.is_square() && !a.is_tall() && !a.is_wide());
        assert_eq!(a.kind(), ElementKind::Number);

        let b = Matrix::from_linear(vec![1., 2., 3., 4., 5., 6.], 3, 2, F64).unwrap();
        assert!(b.is_tall());
        assert!(b.transpose().is_wide());

        let single = Matrix::from_linear(vec![Integer::from(5)], 1, 1, Z).unwrap();
        assert_eq!(single.shape().size(), 1);

        assert_eq!(
            Matrix::<F64>::from_rows(vec![]).unwrap_err().code,
            ErrorCode::InvalidDimensions
        );
        assert_eq!(
            Matrix::<F64>::from_rows(vec![vec![1., 2.], vec![3.]]).unwrap_err().code,
            ErrorCode::InvalidDimensions
        );
        assert_eq!(
            Matrix::from_linear(vec![1., 2., 3.], 2, 2, F64).unwrap_err().code,
            ErrorCode::InvalidDimensions
        );
        assert_eq!(
            Matrix::from_linear(vec![], 0, 3, F64).unwrap_err().code,
            ErrorCode::InvalidDimensions
        );
        assert_eq!(
            Matrix::from_linear(vec![], 1usize << 63, 2, F64).unwrap_err().code,
            ErrorCode::InvalidDimensions
        );
        assert_eq!(
            Matrix::<Q>::from_rows(vec![vec![Fraction::from(1)]])
                .unwrap_err()
                .code,
            ErrorCode::MissingCapability
        );
    }

    #[test]
    fn mixed_scalars() {
        let err = Matrix::from_scalar_rows(vec![
            vec![Scalar::Number(1.), Scalar::BigInt(Integer::from(2))],
            vec![Scalar::Number(3.), Scalar::Number(4.)],
        ])
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::HeterogeneousElements);

        let m = Matrix::from_scalar_rows(vec![vec![
            Scalar::Fraction(Fraction::new(1, 2).unwrap()),
            Scalar::Fraction(Fraction::new(3, 2).unwrap()),
        ]])
        .unwrap();
        assert_eq!(m.kind(), ElementKind::Fraction);
        assert_eq!(m.to_string(), "{{1/2,3/2}}");

        let mut floats = Matrix::from_scalar_rows(vec![
            vec![Scalar::Number(1.), Scalar::Number(2.)],
            vec![Scalar::Number(3.), Scalar::Number(4.)],
        ])
        .unwrap();
        assert_eq!(
            floats
                .set_element(0, 0, Scalar::BigInt(Integer::from(5)))
                .unwrap_err()
                .code,
            ErrorCode::TypeMismatch
        );
        floats.set_element(0, 0, Scalar::Number(5.)).unwrap();

        let ints = Matrix::from_scalar_rows(vec![vec![Scalar::BigInt(Integer::from(7))]]).unwrap();
        assert_eq!(
            floats.set_sub_matrix(0..1, 0..1, &ints).unwrap_err().code,
            ErrorCode::TypeMismatch
        );
        assert_eq!(floats.to_string(), "{{5,2},{3,4}}");
    }

    #[test]
    fn access() {
        let mut a = int_matrix(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        assert_eq!(*a.get_element(1, 2).unwrap(), 6);
        assert_eq!(
            a.get_element(3, 0).unwrap_err().code,
            ErrorCode::IndexOutOfBounds
        );
        a.set_element(0, 0, Integer::from(10)).unwrap();
        assert_eq!(a[(0, 0)], 10);

        assert_eq!(a.get_row(1).unwrap().data(), &[4, 5, 6]);
        assert_eq!(a.get_column(2).unwrap().data(), &[3, 6, 9]);
        assert_eq!(a.get_column(3).unwrap_err().code, ErrorCode::IndexOutOfBounds);

        let s = a.get_sub_matrix(1..3, 0..2).unwrap();
        assert_eq!(s.data(), &[4, 5, 7, 8]);
        assert_eq!(
            a.get_sub_matrix(2..1, 0..2).unwrap_err().code,
            ErrorCode::InvalidBounds
        );
        assert_eq!(
            a.get_sub_matrix(0..4, 0..2).unwrap_err().code,
            ErrorCode::InvalidBounds
        );

        let block = int_matrix(vec![vec![0, 0], vec![0, 0]]);
        a.set_sub_matrix(0..2, 1..3, &block).unwrap();
        assert_eq!(a.data(), &[10, 0, 0, 4, 0, 0, 7, 8, 9]);
        assert_eq!(
            a.set_sub_matrix(0..3, 1..3, &block).unwrap_err().code,
            ErrorCode::DimensionMismatch
        );

        let rows: Vec<_> = a.row_iter().map(|r| r.len()).collect();
        assert_eq!(rows, vec![3, 3, 3]);
    }

    #[test]
    fn arithmetic() {
        let a = Matrix::<F64>::from_rows(vec![vec![1., 2.], vec![3., 4.]]).unwrap();
        let ones = Matrix::<F64>::from_rows(vec![vec![1., 1.], vec![1., 1.]]).unwrap();
        assert_eq!(a.add(&ones).unwrap().data(), &[2., 3., 4., 5.]);
        assert_eq!(a.add_parallel(&ones).unwrap(), a.add(&ones).unwrap());
        assert_eq!(a.subtract(&a).unwrap().data(), &[0., 0., 0., 0.]);
        assert_eq!(a.scale(0.5).unwrap().data(), &[0.5, 1., 1.5, 2.]);
        assert_eq!(a.scale(f64::NAN).unwrap_err().code, ErrorCode::TypeMismatch);
        assert_eq!((-a.clone()).data(), &[-1., -2., -3., -4.]);

        let wide = Matrix::<F64>::from_rows(vec![vec![1., 2., 3.]]).unwrap();
        let err = a.add(&wide).unwrap_err();
        assert_eq!(err.code, ErrorCode::DimensionMismatch);

        let v = Vector::new(vec![2., 10.], F64).unwrap();
        assert_eq!(a.v_multiply(&v).unwrap().data(), &[2., 20., 6., 40.]);

        let i = int_matrix(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(
            i.scale(0.5).unwrap_err().code,
            ErrorCode::TypeMismatch
        );
        assert_eq!(i.scale(3.).unwrap().data(), &[3, 6, 9, 12]);
    }

    #[test]
    fn multiplication() {
        let a = int_matrix(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let b = int_matrix(vec![vec![7, 8], vec![9, 10], vec![11, 12]]);

        let c = a.multiply(&b).unwrap();
        assert_eq!(c.data(), &[58, 64, 139, 154]);
        assert_eq!(a.strassen_multiply(&b).unwrap(), c);
        assert_eq!(
            a.multiply(&a).unwrap_err().code,
            ErrorCode::DimensionMismatch
        );

        let d = b.multiply(&a).unwrap();
        assert_eq!(d.shape().to_string(), "(3,3)");
        assert_eq!(b.strassen_multiply(&a).unwrap(), d);
    }

    #[test]
    fn long_rows() {
        let n = 40;
        let a = Matrix::from_linear((0..n).map(|x| x as f64).collect(), 1, n, F64).unwrap();
        let c = a.multiply(&a.transpose()).unwrap();
        assert_eq!(c.data(), &[(0..n).map(|x| (x * x) as f64).sum::<f64>()]);
    }

    #[test]
    fn power() {
        let a = Matrix::<F64>::from_rows(vec![vec![2., 0.], vec![0., 2.]]).unwrap();
        assert_eq!(a.pow(3).unwrap().data(), &[8., 0., 0., 8.]);
        assert_eq!(a.pow(0).unwrap(), identity(2, F64).unwrap());

        let f = int_matrix(vec![vec![1, 1], vec![1, 0]]);
        assert_eq!(f.pow(10).unwrap().data(), &[89, 55, 55, 34]);

        let wide = Matrix::<F64>::from_rows(vec![vec![1., 2.]]).unwrap();
        assert_eq!(wide.pow(2).unwrap_err().code, ErrorCode::NotSquare);
    }

    #[test]
    fn structure() {
        let a = Matrix::<F64>::from_rows(vec![vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
        assert_eq!(a.transpose().data(), &[1., 4., 2., 5., 3., 6.]);
        assert_eq!(a.transpose().transpose(), a);

        let r = a.reshape(3, 2).unwrap();
        assert_eq!(r.shape().to_string(), "(3,2)");
        assert_eq!(r.data(), a.data());
        assert_eq!(a.reshape(4, 2).unwrap_err().code, ErrorCode::ReshapeMismatch);
        let row = Matrix::<F64>::from_rows(vec![vec![1., 2.]]).unwrap();
        assert_eq!(
            row.reshape((1 << 63) + 1, 2).unwrap_err().code,
            ErrorCode::ReshapeMismatch
        );

        let b = Matrix::<F64>::from_rows(vec![vec![7.], vec![8.]]).unwrap();
        let aug = a.augment(&b).unwrap();
        assert_eq!(aug.data(), &[1., 2., 3., 7., 4., 5., 6., 8.]);
        assert_eq!(
            a.augment(&a.transpose()).unwrap_err().code,
            ErrorCode::DimensionMismatch
        );

        let m = a.map(|x| Integer::from(*x as i64), Z).unwrap();
        assert_eq!(m.kind(), ElementKind::BigInt);
        assert_eq!(m.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn equality() {
        let a = Matrix::<F64>::from_rows(vec![vec![0.1 + 0.2, 1.]]).unwrap();
        let b = Matrix::<F64>::from_rows(vec![vec![0.3, 1.]]).unwrap();
        assert!(a.equal(&b));
        assert_ne!(a, b);
        assert!(!a.equal(&b.transpose()));
    }
}
