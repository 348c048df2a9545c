use crate::autograd::{Environment, Graph, NodeId, Operator};
use crate::error::DagradError;
use crate::ops::unsupported;
use crate::value::{Matrix, Value, ValueKind};

/// Matrix product `lhs · rhs`.
#[derive(Debug, Clone)]
pub struct MatrixProduct {
    lhs: NodeId,
    rhs: NodeId,
}

impl MatrixProduct {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        MatrixProduct { lhs, rhs }
    }
}

fn ensure_inner_dims(a: &Matrix, b: &Matrix) -> Result<(), DagradError> {
    if a.ncols() != b.nrows() {
        return Err(DagradError::ShapeMismatch {
            expected: vec![a.ncols(), b.ncols()],
            actual: b.shape().to_vec(),
            operation: "MatrixProduct".to_string(),
        });
    }
    Ok(())
}

impl Operator for MatrixProduct {
    fn name(&self) -> &'static str {
        "MatrixProduct"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.lhs, self.rhs]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Matrix
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let a = env.matrix(self.lhs)?;
        let b = env.matrix(self.rhs)?;
        ensure_inner_dims(a, b)?;
        Ok(Value::Matrix(a.dot(b)))
    }

    /// dA = G · Bᵀ, dB = Aᵀ · G
    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        let a = env.matrix(self.lhs)?;
        let b = env.matrix(self.rhs)?;
        Ok(vec![
            Value::Matrix(g.dot(&b.t())),
            Value::Matrix(a.t().dot(g)),
        ])
    }
}

/// Matrix product of two matrix nodes. Same as [`mul`](crate::ops::mul) on
/// two matrices.
pub fn matmul(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(a)?, graph.kind_of(b)?) {
        (ValueKind::Matrix, ValueKind::Matrix) => graph.push(MatrixProduct::new(a, b)),
        (lhs, rhs) => Err(unsupported("matmul", lhs, rhs)),
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
