//! Gradient-descent optimizers.
//!
//! Each optimizer owns the [`Executor`](crate::autograd::Executor) of a loss
//! graph and moves its updatable nodes in place from the accumulated gradients.

pub mod adam;
pub mod optimizer_trait;
pub mod sgd;

pub use adam::{AdamConfig, AdamOptimizer, AdamParamState, AdamWConfig, AdamWOptimizer};
pub use optimizer_trait::Optimizer;
pub use sgd::{SgdConfig, SgdOptimizer};
