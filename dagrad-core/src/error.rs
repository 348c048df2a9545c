use crate::autograd::NodeId;
use crate::value::ValueKind;
use thiserror::Error;

/// Custom error type for the dagrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum DagradError {
    #[error("Cycle detected in the computation graph: ordered {ordered} of {reachable} reachable nodes")]
    CycleDetected { ordered: usize, reachable: usize },

    #[error("Node {0} does not exist in this graph")]
    UnknownNode(NodeId),

    #[error("Node {0} has no cached value; it was not evaluated by the last propagation")]
    NotEvaluated(NodeId),

    #[error("Type mismatch: expected {expected}, got {actual} during operation {operation}")]
    TypeMismatch {
        expected: ValueKind,
        actual: ValueKind,
        operation: String,
    },

    #[error("Operation {operation} is not defined for operands of kind {lhs} and {rhs}")]
    UnsupportedCombination {
        operation: String,
        lhs: ValueKind,
        rhs: ValueKind,
    },

    #[error("Operation {operation} is not defined for operands of kind {kind}")]
    UnsupportedKind { operation: String, kind: ValueKind },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Node {node} returned {actual} gradients for {expected} inputs")]
    ArityMismatch {
        node: NodeId,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid {phase} value at node {node}: {detail}")]
    InvalidValue {
        node: NodeId,
        phase: &'static str,
        detail: String,
    },

    #[error("No gradient available: propagate with gradients before updating")]
    GradientNotAvailable,

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
