//! Tunable settings for comparisons and elimination.

/// The tolerance used to decide when a floating-point value counts as zero
/// and when two values are considered equal.
///
/// Exact element types ignore the tolerance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerance {
    pub epsilon: f64,
}

impl Tolerance {
    pub const fn new(epsilon: f64) -> Tolerance {
        Tolerance { epsilon }
    }

    /// Only values that are exactly zero are zero.
    pub const fn exact() -> Tolerance {
        Tolerance { epsilon: 0. }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance { epsilon: 1e-12 }
    }
}

/// Options for [gaussian_elimination](crate::tensors::matrix::Matrix::gaussian_elimination)
/// and [gauss_jordan](crate::tensors::matrix::Matrix::gauss_jordan).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EliminationOptions {
    /// Treat the last column as the right-hand side of a linear system
    /// and return its solution instead of the reduced matrix.
    pub solve: bool,
    pub tolerance: Tolerance,
}

impl EliminationOptions {
    /// Reduce the matrix.
    pub fn reduce() -> EliminationOptions {
        EliminationOptions::default()
    }

    /// Solve the augmented system.
    pub fn solve() -> EliminationOptions {
        EliminationOptions {
            solve: true,
            ..Default::default()
        }
    }

    pub fn with_tolerance(self, tolerance: Tolerance) -> EliminationOptions {
        EliminationOptions { tolerance, ..self }
    }
}
