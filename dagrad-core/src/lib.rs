//! Reverse-mode automatic differentiation over computation graphs of scalars
//! and matrices, with gradient-descent optimizers.

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod utils;
pub mod value;

pub use autograd::{Environment, Executor, ExecutorOptions, Graph, NodeId, Operator};
pub use error::DagradError;
pub use value::{Cube, Matrix, Scalar, Value, ValueKind};

// Matrices are `ndarray` arrays; re-exported so callers can build them without
// a direct dependency.
pub use ndarray;
