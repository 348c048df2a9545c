use crate::autograd::{Environment, Graph, NodeId, Operator};
use crate::error::DagradError;
use crate::ops::expect_kind;
use crate::value::{Value, ValueKind};

/// Sum of every element of a matrix.
#[derive(Debug, Clone)]
pub struct MatrixCoefSum {
    operand: NodeId,
}

impl MatrixCoefSum {
    pub fn new(operand: NodeId) -> Self {
        MatrixCoefSum { operand }
    }
}

impl Operator for MatrixCoefSum {
    fn name(&self) -> &'static str {
        "MatrixCoefSum"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.operand]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(Value::Scalar(env.matrix(self.operand)?.sum()))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_scalar()?;
        let m = env.matrix(self.operand)?;
        Ok(vec![Value::Matrix(m.mapv(|_| g))])
    }
}

pub fn sum(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    expect_kind("sum", graph.kind_of(a)?, &[ValueKind::Matrix])?;
    graph.push(MatrixCoefSum::new(a))
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
