use super::graph::{topological_sort, Graph};
use super::operator::{Environment, NodeId};
use crate::error::DagradError;
use crate::value::Value;
use log::{debug, trace};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Runtime switches of an [`Executor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Reject NaN or infinite forward values and gradients with
    /// [`DagradError::InvalidValue`].
    pub check_numerics: bool,
}

/// Drives forward and backward propagation over the subgraph reachable from a
/// root node.
///
/// The evaluation order is computed once at construction. Each propagation
/// evaluates every reachable node exactly once, then optionally walks the
/// order in reverse to push gradients from the root down to the leaves.
/// Gradients of successive gradient-enabled propagations are summed into the
/// accumulated map until [`Executor::clear_gradient`] is called.
#[derive(Debug)]
pub struct Executor {
    root: NodeId,
    order: Vec<NodeId>,
    positions: HashMap<NodeId, usize>,
    options: ExecutorOptions,
    last_values: HashMap<NodeId, Value>,
    last_grads: HashMap<NodeId, Value>,
    grads: HashMap<NodeId, Value>,
    gradient_passes: usize,
}

impl Executor {
    /// Builds an executor for `root`. Fails with [`DagradError::CycleDetected`]
    /// if the reachable subgraph is not acyclic.
    pub fn new(graph: &Graph, root: NodeId) -> Result<Self, DagradError> {
        Self::with_options(graph, root, ExecutorOptions::default())
    }

    pub fn with_options(
        graph: &Graph,
        root: NodeId,
        options: ExecutorOptions,
    ) -> Result<Self, DagradError> {
        let order = topological_sort(graph, root)?;
        let positions = order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        debug!(
            "executor: root {} ({}) orders {} nodes",
            root,
            graph.node(root)?.name(),
            order.len()
        );
        Ok(Executor {
            root,
            order,
            positions,
            options,
            last_values: HashMap::new(),
            last_grads: HashMap::new(),
            grads: HashMap::new(),
            gradient_passes: 0,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Reachable nodes, inputs before consumers, root last.
    pub fn topo_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Index of `id` in [`Executor::topo_order`].
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn options(&self) -> ExecutorOptions {
        self.options
    }

    pub fn set_check_numerics(&mut self, enabled: bool) {
        self.options.check_numerics = enabled;
    }

    /// Evaluates every reachable node and, if `with_gradient`, back-propagates
    /// from the root and adds the result to the accumulated gradients.
    ///
    /// Returns the root's value. On error, the caches of the previous
    /// successful propagation are left untouched.
    pub fn propagate(&mut self, graph: &mut Graph, with_gradient: bool) -> Result<&Value, DagradError> {
        let values = self.forward(graph)?;
        let grads = if with_gradient {
            Some(self.backward(graph, &values)?)
        } else {
            None
        };

        if let Some(grads) = &grads {
            // Every merge is checked before any cache is touched.
            for (id, grad) in grads {
                if let Some(existing) = self.grads.get(id) {
                    existing.ensure_same_layout(grad, "accumulate")?;
                }
            }
        }

        self.last_values = values;
        match grads {
            Some(grads) => {
                for (id, grad) in &grads {
                    match self.grads.entry(*id) {
                        Entry::Occupied(mut slot) => slot.get_mut().accumulate(grad)?,
                        Entry::Vacant(slot) => {
                            slot.insert(grad.clone());
                        }
                    }
                }
                self.last_grads = grads;
                self.gradient_passes += 1;
                trace!(
                    "executor: forward+backward over {} nodes (pass {})",
                    self.order.len(),
                    self.gradient_passes
                );
            }
            None => {
                self.last_grads.clear();
                trace!("executor: forward over {} nodes", self.order.len());
            }
        }
        self.value_of(self.root)
    }

    fn forward(&self, graph: &mut Graph) -> Result<HashMap<NodeId, Value>, DagradError> {
        let mut values = HashMap::with_capacity(self.order.len());
        for &id in &self.order {
            let node = graph.node_mut(id)?;
            let value = node.evaluate(&Environment::new(&values))?;
            let expected = node.output_kind();
            if value.kind() != expected {
                return Err(DagradError::TypeMismatch {
                    expected,
                    actual: value.kind(),
                    operation: format!("evaluate {} at {}", node.name(), id),
                });
            }
            if self.options.check_numerics {
                if let Some(detail) = value.non_finite() {
                    return Err(DagradError::InvalidValue { node: id, phase: "forward", detail });
                }
            }
            values.insert(id, value);
        }
        Ok(values)
    }

    fn backward(
        &self,
        graph: &Graph,
        values: &HashMap<NodeId, Value>,
    ) -> Result<HashMap<NodeId, Value>, DagradError> {
        let root_value = values.get(&self.root).ok_or(DagradError::NotEvaluated(self.root))?;
        let mut grads: HashMap<NodeId, Value> = HashMap::with_capacity(self.order.len());
        grads.insert(self.root, root_value.ones_like());

        let env = Environment::new(values);
        for &id in self.order.iter().rev() {
            let node = graph.node(id)?;
            let inputs = node.inputs();
            if inputs.is_empty() {
                continue;
            }
            let input_grads = match grads.get(&id) {
                Some(output_grad) => node.differentiate(&env, output_grad)?,
                None => continue,
            };
            if input_grads.len() != inputs.len() {
                return Err(DagradError::ArityMismatch {
                    node: id,
                    expected: inputs.len(),
                    actual: input_grads.len(),
                });
            }
            for (input, grad) in inputs.into_iter().zip(input_grads) {
                let expected = graph.kind_of(input)?;
                if grad.kind() != expected {
                    return Err(DagradError::TypeMismatch {
                        expected,
                        actual: grad.kind(),
                        operation: format!("gradient of {} from {}", input, node.name()),
                    });
                }
                values
                    .get(&input)
                    .ok_or(DagradError::NotEvaluated(input))?
                    .ensure_same_layout(&grad, &format!("gradient of {} from {}", input, node.name()))?;
                if self.options.check_numerics {
                    if let Some(detail) = grad.non_finite() {
                        return Err(DagradError::InvalidValue { node: input, phase: "backward", detail });
                    }
                }
                match grads.entry(input) {
                    Entry::Occupied(mut slot) => slot.get_mut().accumulate(&grad)?,
                    Entry::Vacant(slot) => {
                        slot.insert(grad);
                    }
                }
            }
        }
        Ok(grads)
    }

    /// Value computed for `id` by the last successful propagation.
    pub fn value_of(&self, id: NodeId) -> Result<&Value, DagradError> {
        if !self.positions.contains_key(&id) {
            return Err(DagradError::UnknownNode(id));
        }
        self.last_values.get(&id).ok_or(DagradError::NotEvaluated(id))
    }

    /// Gradient of the root with respect to `id`, summed over every
    /// gradient-enabled propagation since the last clear.
    ///
    /// A node that has received no gradient yet reports zeros shaped like its
    /// last value.
    pub fn gradient_of(&self, id: NodeId) -> Result<Value, DagradError> {
        self.gradient_from(&self.grads, id)
    }

    /// Gradient of the root with respect to `id` from the most recent
    /// propagation only. Zeros if that propagation did not compute gradients.
    pub fn last_gradient_of(&self, id: NodeId) -> Result<Value, DagradError> {
        self.gradient_from(&self.last_grads, id)
    }

    fn gradient_from(&self, grads: &HashMap<NodeId, Value>, id: NodeId) -> Result<Value, DagradError> {
        let value = self.value_of(id)?;
        Ok(grads.get(&id).cloned().unwrap_or_else(|| value.zeros_like()))
    }

    /// Drops the accumulated gradients. Cached values and the last-pass
    /// gradients are kept.
    pub fn clear_gradient(&mut self) {
        self.grads.clear();
    }

    /// True if `id` holds an accumulated gradient entry since the last clear.
    pub fn has_accumulated_gradient(&self, id: NodeId) -> bool {
        self.grads.contains_key(&id)
    }

    /// True once at least one gradient-enabled propagation has completed.
    pub fn has_gradient(&self) -> bool {
        self.gradient_passes > 0
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
