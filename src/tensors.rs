//! Dense matrices and vectors, and the linear algebra on them.

pub mod helpers;
pub mod matrix;
pub mod solve;
pub mod vector;
