use crate::autograd::{Environment, Graph, NodeId, Operator};
use crate::error::DagradError;
use crate::ops::expect_kind;
use crate::value::{Matrix, Scalar, Value, ValueKind};

/// Added to the normaliser of [`Softmax`].
pub const SOFTMAX_EPSILON: Scalar = 1e-8;

/// Softmax over every element of a matrix: `exp(x - max) / (Σ exp(x - max) + ε)`.
#[derive(Debug, Clone)]
pub struct Softmax {
    operand: NodeId,
}

impl Softmax {
    pub fn new(operand: NodeId) -> Self {
        Softmax { operand }
    }
}

fn softmax_of(x: &Matrix) -> Matrix {
    let top = x.fold(Scalar::NEG_INFINITY, |acc, &v| acc.max(v));
    let shifted = x.mapv(|v| (v - top).exp());
    let total = shifted.sum() + SOFTMAX_EPSILON;
    shifted / total
}

impl Operator for Softmax {
    fn name(&self) -> &'static str {
        "Softmax"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.operand]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Matrix
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(Value::Matrix(softmax_of(env.matrix(self.operand)?)))
    }

    /// Full Jacobian-vector product: `s ⊙ (g - Σ g ⊙ s)`.
    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        let s = softmax_of(env.matrix(self.operand)?);
        let weighted = (g * &s).sum();
        Ok(vec![Value::Matrix(&s * &g.mapv(|v| v - weighted))])
    }
}

pub fn softmax(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    expect_kind("softmax", graph.kind_of(a)?, &[ValueKind::Matrix])?;
    graph.push(Softmax::new(a))
}

#[cfg(test)]
#[path = "softmax_test.rs"]
mod tests;
