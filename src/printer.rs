//! Compact textual forms of matrices and vectors.
//!
//! Matrices are printed as nested braces, row by row: `{{1,2},{3,4}}`.

use std::fmt::{self, Display, Write};

use crate::{
    domains::Numerical,
    tensors::{matrix::Matrix, vector::Vector},
};

fn fmt_list<'a, E: Display + 'a>(
    entries: impl IntoIterator<Item = &'a E>,
    f: &mut fmt::Formatter,
) -> fmt::Result {
    f.write_char('{')?;
    for (i, e) in entries.into_iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        e.fmt(f)?;
    }
    f.write_char('}')
}

pub struct MatrixPrinter<'a, N: Numerical> {
    pub matrix: &'a Matrix<N>,
}

impl<'a, N: Numerical> MatrixPrinter<'a, N> {
    pub fn new(matrix: &'a Matrix<N>) -> MatrixPrinter<'a, N> {
        MatrixPrinter { matrix }
    }
}

impl<'a, N: Numerical> Display for MatrixPrinter<'a, N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char('{')?;
        for (ri, r) in self.matrix.row_iter().enumerate() {
            if ri > 0 {
                f.write_char(',')?;
            }
            fmt_list(r, f)?;
        }
        f.write_char('}')
    }
}

pub struct VectorPrinter<'a, N: Numerical> {
    pub vector: &'a Vector<N>,
}

impl<'a, N: Numerical> VectorPrinter<'a, N> {
    pub fn new(vector: &'a Vector<N>) -> VectorPrinter<'a, N> {
        VectorPrinter { vector }
    }
}

impl<'a, N: Numerical> Display for VectorPrinter<'a, N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_list(self.vector.data(), f)
    }
}
