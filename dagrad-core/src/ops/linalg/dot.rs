use crate::autograd::{Environment, Graph, NodeId, Operator};
use crate::error::DagradError;
use crate::ops::unsupported;
use crate::value::{ensure_same_shape, Value, ValueKind};

/// Frobenius inner product: the sum of the element-wise product of two
/// matrices of the same shape.
#[derive(Debug, Clone)]
pub struct Dot {
    lhs: NodeId,
    rhs: NodeId,
}

impl Dot {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        Dot { lhs, rhs }
    }
}

impl Operator for Dot {
    fn name(&self) -> &'static str {
        "Dot"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.lhs, self.rhs]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let a = env.matrix(self.lhs)?;
        let b = env.matrix(self.rhs)?;
        ensure_same_shape(a, b, self.name())?;
        Ok(Value::Scalar((a * b).sum()))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_scalar()?;
        let a = env.matrix(self.lhs)?;
        let b = env.matrix(self.rhs)?;
        Ok(vec![Value::Matrix(b * g), Value::Matrix(a * g)])
    }
}

pub fn dot(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(a)?, graph.kind_of(b)?) {
        (ValueKind::Matrix, ValueKind::Matrix) => graph.push(Dot::new(a, b)),
        (lhs, rhs) => Err(unsupported("dot", lhs, rhs)),
    }
}

#[cfg(test)]
#[path = "dot_test.rs"]
mod tests;
