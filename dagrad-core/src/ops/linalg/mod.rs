pub mod dot;
pub mod matmul;

pub use dot::{dot, Dot};
pub use matmul::{matmul, MatrixProduct};
