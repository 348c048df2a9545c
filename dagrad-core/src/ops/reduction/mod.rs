//! Reductions of a matrix to a scalar.

pub mod max;
pub mod sum;

pub use max::{max, MatrixMax};
pub use sum::{sum, MatrixCoefSum};
