use crate::autograd::{Environment, Graph, NodeId, Operator};
use crate::error::DagradError;
use crate::ops::expect_kind;
use crate::value::{Value, ValueKind};

/// Largest element of a matrix.
///
/// The gradient flows to every element equal to the maximum; ties all receive
/// the full output gradient.
#[derive(Debug, Clone)]
pub struct MatrixMax {
    operand: NodeId,
}

impl MatrixMax {
    pub fn new(operand: NodeId) -> Self {
        MatrixMax { operand }
    }
}

impl Operator for MatrixMax {
    fn name(&self) -> &'static str {
        "MatrixMax"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.operand]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let m = env.matrix(self.operand)?;
        if m.is_empty() {
            return Err(DagradError::UnsupportedOperation("max of an empty matrix".to_string()));
        }
        Ok(Value::Scalar(m.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x))))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_scalar()?;
        let m = env.matrix(self.operand)?;
        let top = m.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
        Ok(vec![Value::Matrix(m.mapv(|x| if x == top { g } else { 0.0 }))])
    }
}

pub fn max(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    expect_kind("max", graph.kind_of(a)?, &[ValueKind::Matrix])?;
    graph.push(MatrixMax::new(a))
}

#[cfg(test)]
#[path = "max_test.rs"]
mod tests;
