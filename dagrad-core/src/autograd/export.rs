use super::executor::Executor;
use super::graph::Graph;
use crate::error::DagradError;

impl Executor {
    /// Renders the executor's subgraph in Graphviz DOT syntax.
    ///
    /// Vertices are numbered from 1 in evaluation order and labelled with the
    /// operator name. Each input edge is written as `input->consumer;`.
    pub fn to_dot(&self, graph: &Graph) -> Result<String, DagradError> {
        let mut dot = String::from("digraph g {\n");
        for (i, id) in self.topo_order().iter().enumerate() {
            dot.push_str(&format!("  {}[label=\"{}\"];\n", i + 1, graph.node(*id)?.name()));
        }
        for (i, id) in self.topo_order().iter().enumerate() {
            for input in graph.node(*id)?.inputs() {
                let from = self
                    .position_of(input)
                    .ok_or(DagradError::UnknownNode(input))?;
                dot.push_str(&format!("  {}->{};\n", from + 1, i + 1));
            }
        }
        dot.push('}');
        Ok(dot)
    }
}
