use crate::autograd::{Executor, Graph, NodeId};
use crate::error::DagradError;
use crate::value::Value;
use log::warn;

/// Trait defining the common interface for all optimizers.
///
/// An optimizer owns the [`Executor`] of a loss graph. Clients run one or more
/// gradient-enabled propagations, call [`Optimizer::update`] once to move every
/// trainable node, then clear the accumulated gradients before the next batch.
pub trait Optimizer {
    fn executor(&self) -> &Executor;

    fn executor_mut(&mut self) -> &mut Executor;

    /// Applies one optimization step to every updatable node reachable from
    /// the loss, using the gradients accumulated since the last clear.
    ///
    /// Fails with [`DagradError::GradientNotAvailable`] if no gradient-enabled
    /// propagation has run yet.
    fn update(&mut self, graph: &mut Graph) -> Result<(), DagradError>;

    /// Forwards to [`Executor::propagate`].
    fn propagate(&mut self, graph: &mut Graph, with_gradient: bool) -> Result<&Value, DagradError> {
        self.executor_mut().propagate(graph, with_gradient)
    }

    /// Forwards to [`Executor::clear_gradient`].
    fn clear_gradient(&mut self) {
        self.executor_mut().clear_gradient();
    }

    fn value_of(&self, id: NodeId) -> Result<&Value, DagradError> {
        self.executor().value_of(id)
    }

    fn gradient_of(&self, id: NodeId) -> Result<Value, DagradError> {
        self.executor().gradient_of(id)
    }
}

/// Updatable nodes of the executor's subgraph, in evaluation order.
pub(crate) fn trainable_nodes(executor: &Executor, graph: &Graph) -> Result<Vec<NodeId>, DagradError> {
    if !executor.has_gradient() {
        return Err(DagradError::GradientNotAvailable);
    }
    let mut nodes = Vec::new();
    for &id in executor.topo_order() {
        let node = graph.node(id)?;
        if node.is_updatable() {
            if !executor.has_accumulated_gradient(id) {
                warn!("{} at {} has no accumulated gradient, updating with zeros", node.name(), id);
            }
            nodes.push(id);
        }
    }
    Ok(nodes)
}
