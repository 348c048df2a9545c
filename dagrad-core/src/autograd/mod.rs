//! Graph construction and reverse-mode differentiation.
//!
//! A [`Graph`] owns the nodes; an [`Executor`] orders the subgraph reachable
//! from a root and runs forward and backward propagation over it.

pub mod executor;
mod export;
pub mod grad_check;
pub mod graph;
pub mod operator;

pub use executor::{Executor, ExecutorOptions};
pub use graph::Graph;
pub use operator::{Environment, NodeId, Operator};

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_tests;
