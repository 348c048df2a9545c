use crate::error::DagradError;
use crate::value::{Matrix, Scalar, Value, ValueKind};
use std::collections::HashMap;
use std::fmt::{self, Debug};

/// Stable handle of a node inside a [`Graph`](super::Graph) arena.
///
/// Two nodes are distinct even when structurally identical; sharing a `NodeId`
/// between several consumers is what turns an expression tree into a DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its arena (insertion order).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only view of the values computed so far by the current propagation.
///
/// Operators fetch their inputs through the environment instead of holding
/// them, so the same operator can be driven by any executor.
#[derive(Debug, Clone, Copy)]
pub struct Environment<'a> {
    values: &'a HashMap<NodeId, Value>,
}

impl<'a> Environment<'a> {
    pub(crate) fn new(values: &'a HashMap<NodeId, Value>) -> Self {
        Environment { values }
    }

    /// Returns the cached value of `id`.
    ///
    /// Fails with [`DagradError::NotEvaluated`] if `id` has not been visited yet,
    /// which means the caller asked for a node that is not one of its inputs.
    pub fn value_of(&self, id: NodeId) -> Result<&'a Value, DagradError> {
        self.values.get(&id).ok_or(DagradError::NotEvaluated(id))
    }

    pub fn scalar(&self, id: NodeId) -> Result<Scalar, DagradError> {
        self.value_of(id)?.as_scalar()
    }

    pub fn matrix(&self, id: NodeId) -> Result<&'a Matrix, DagradError> {
        self.value_of(id)?.as_matrix()
    }
}

/// Defines the interface of a node in the computation graph.
///
/// An operator declares its inputs and the kind of value it produces, computes
/// that value from its inputs' cached values (`evaluate`), and turns the
/// gradient of its output into one gradient per input (`differentiate`).
/// Trainable leaves additionally accept in-place updates from an optimizer.
pub trait Operator: Debug {
    /// Short label used by graph export and error messages.
    fn name(&self) -> &'static str;

    /// Ordered input nodes. Empty for leaves. Must not change after the node is
    /// added to a graph.
    fn inputs(&self) -> Vec<NodeId>;

    /// The kind of value `evaluate` produces. Fixed at construction.
    fn output_kind(&self) -> ValueKind;

    /// Computes this node's value from the environment and its own state.
    ///
    /// Takes `&mut self` so that stateful nodes (dropout) can record what the
    /// forward pass did; pure operators ignore the mutability.
    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError>;

    /// Computes the gradient with respect to each input, given the gradient with
    /// respect to this node's output.
    ///
    /// The returned `Vec` **must** have one entry per element of `inputs()`,
    /// in the same order.
    fn differentiate(
        &self,
        env: &Environment<'_>,
        output_grad: &Value,
    ) -> Result<Vec<Value>, DagradError>;

    /// Does the node hold trainable parameters?
    fn is_updatable(&self) -> bool {
        false
    }

    /// Adds `delta` to the stored parameter value. No-op for other nodes.
    fn apply_update(&mut self, _delta: &Value) -> Result<(), DagradError> {
        Ok(())
    }

    /// The value held by a leaf, if the node stores one.
    fn stored_value(&self) -> Option<&Value> {
        None
    }

    /// Replaces the value held by a settable leaf.
    fn assign(&mut self, _value: Value) -> Result<(), DagradError> {
        Err(DagradError::UnsupportedOperation(format!(
            "{} is not a settable leaf",
            self.name()
        )))
    }

    /// Switches between training and inference behaviour. Only meaningful for
    /// nodes such as dropout.
    fn set_training(&mut self, _training: bool) {}
}
