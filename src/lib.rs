//! Numerica is a library for dense linear algebra over exact and floating-point numbers.
//!
//! Matrices and vectors are generic over a [Numerical](domains::Numerical), which performs
//! all arithmetic on their entries. Floats, arbitrary-precision integers and fractions are
//! supported out of the box, and any other number type can be used by implementing
//! [Numerical](domains::Numerical) for it.
//!
//! For example:
//!
//! ```
//! use numerica::{
//!     domains::rational::{Fraction, Q},
//!     options::EliminationOptions,
//!     tensors::matrix::Matrix,
//! };
//!
//! // x + 2y = 5, 3x + 4y = 6
//! let system = Matrix::from_nested_vec(
//!     vec![
//!         vec![1.into(), 2.into(), 5.into()],
//!         vec![3.into(), 4.into(), 6.into()],
//!     ],
//!     Q,
//! )
//! .unwrap();
//!
//! let x = system
//!     .gauss_jordan(&EliminationOptions::solve())
//!     .unwrap()
//!     .into_solution()
//!     .unwrap();
//! assert_eq!(x.data(), &[Fraction::from(-4), Fraction::new(9, 2).unwrap()]);
//! ```
//!
//! The library logs through the [log] facade and never installs a logger itself.

pub mod domains;
pub mod error;
pub mod math;
pub mod options;
pub mod printer;
pub mod tensors;
pub mod utils;

pub use error::{ErrorCode, MatrixError, Result};
pub use tensors::{matrix::Matrix, vector::Vector};
