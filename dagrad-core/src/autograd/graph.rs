use super::operator::{NodeId, Operator};
use crate::error::DagradError;
use crate::value::{Value, ValueKind};
use log::trace;
use std::collections::{HashMap, HashSet, VecDeque};

/// Arena owning every node of a computation graph.
///
/// Nodes are addressed by [`NodeId`] and never removed, so handles stay valid
/// for the lifetime of the graph. Edges are the `inputs()` lists of the nodes.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Box<dyn Operator>>,
}

impl Graph {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    /// Adds `op` to the graph. Every input of `op` must already be in the graph.
    pub fn push<O: Operator + 'static>(&mut self, op: O) -> Result<NodeId, DagradError> {
        self.push_boxed(Box::new(op))
    }

    pub fn push_boxed(&mut self, op: Box<dyn Operator>) -> Result<NodeId, DagradError> {
        for input in op.inputs() {
            self.node(input)?;
        }
        Ok(self.insert(op))
    }

    /// Adds a node without validating its inputs. Only used for leaves.
    pub(crate) fn insert(&mut self, op: Box<dyn Operator>) -> NodeId {
        let id = NodeId(self.nodes.len());
        trace!("graph: added {} as {}", op.name(), id);
        self.nodes.push(op);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&dyn Operator, DagradError> {
        self.nodes
            .get(id.0)
            .map(|node| node.as_ref())
            .ok_or(DagradError::UnknownNode(id))
    }

    pub(crate) fn node_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut (dyn Operator + 'static), DagradError> {
        match self.nodes.get_mut(id.0) {
            Some(node) => Ok(&mut **node),
            None => Err(DagradError::UnknownNode(id)),
        }
    }

    /// Declared output kind of `id`.
    pub fn kind_of(&self, id: NodeId) -> Result<ValueKind, DagradError> {
        Ok(self.node(id)?.output_kind())
    }

    /// The value currently held by leaf `id` (input or parameter).
    pub fn leaf_value(&self, id: NodeId) -> Result<&Value, DagradError> {
        let node = self.node(id)?;
        node.stored_value().ok_or_else(|| {
            DagradError::UnsupportedOperation(format!("{} at {} holds no value", node.name(), id))
        })
    }

    /// Re-sets an input leaf. The new value takes effect on the next propagation.
    pub fn set(&mut self, id: NodeId, value: impl Into<Value>) -> Result<(), DagradError> {
        let value = value.into();
        let node = self.node_mut(id)?;
        let expected = node.output_kind();
        if value.kind() != expected {
            return Err(DagradError::TypeMismatch {
                expected,
                actual: value.kind(),
                operation: format!("set {}", id),
            });
        }
        node.assign(value)
    }

    /// Switches every node between training and inference mode.
    pub fn set_training(&mut self, training: bool) {
        for node in &mut self.nodes {
            node.set_training(training);
        }
    }
}

/// Orders the nodes reachable from `root` so that every node comes after all
/// of its inputs (Kahn's algorithm).
///
/// A breadth-first pass from `root` discovers the reachable nodes, their
/// in-degree and their consumers. Leaves seed the ready queue; a consumer
/// becomes ready once all of its inputs have been emitted. Shared nodes are
/// emitted once. If the queue drains before every reachable node is emitted,
/// the graph contains a cycle.
pub(crate) fn topological_sort(graph: &Graph, root: NodeId) -> Result<Vec<NodeId>, DagradError> {
    graph.node(root)?;

    let mut in_degree: HashMap<NodeId, usize> = HashMap::new();
    let mut consumers: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut discover: VecDeque<NodeId> = VecDeque::new();
    let mut ready: VecDeque<NodeId> = VecDeque::new();

    visited.insert(root);
    discover.push_back(root);
    while let Some(node) = discover.pop_front() {
        let inputs = graph.node(node)?.inputs();
        if inputs.is_empty() {
            ready.push_back(node);
        }
        in_degree.insert(node, inputs.len());
        for input in inputs {
            graph.node(input)?;
            // One entry per edge: a node using the same input twice is counted twice.
            consumers.entry(input).or_default().push(node);
            if visited.insert(input) {
                discover.push_back(input);
            }
        }
    }

    let mut order = Vec::with_capacity(visited.len());
    while let Some(node) = ready.pop_front() {
        order.push(node);
        if let Some(outs) = consumers.get(&node) {
            for consumer in outs {
                if let Some(remaining) = in_degree.get_mut(consumer) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        ready.push_back(*consumer);
                    }
                }
            }
        }
    }

    if order.len() != visited.len() {
        return Err(DagradError::CycleDetected {
            ordered: order.len(),
            reachable: visited.len(),
        });
    }
    Ok(order)
}
