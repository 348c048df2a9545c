use crate::autograd::{Environment, NodeId, Operator};
use crate::error::DagradError;
use crate::value::{ensure_same_shape, Value, ValueKind};

/// `lhs + rhs` for two scalars.
#[derive(Debug, Clone)]
pub struct ScalarSum {
    lhs: NodeId,
    rhs: NodeId,
}

/// `lhs + rhs` for two matrices of the same shape.
#[derive(Debug, Clone)]
pub struct MatrixSum {
    lhs: NodeId,
    rhs: NodeId,
}

/// Adds the scalar `rhs` to every element of the matrix `lhs`.
#[derive(Debug, Clone)]
pub struct MatrixScalarSum {
    matrix: NodeId,
    scalar: NodeId,
}

impl ScalarSum {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        ScalarSum { lhs, rhs }
    }
}

impl MatrixSum {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        MatrixSum { lhs, rhs }
    }
}

impl MatrixScalarSum {
    pub fn new(matrix: NodeId, scalar: NodeId) -> Self {
        MatrixScalarSum { matrix, scalar }
    }
}

impl Operator for ScalarSum {
    fn name(&self) -> &'static str {
        "ScalarSum"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.lhs, self.rhs]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(Value::Scalar(env.scalar(self.lhs)? + env.scalar(self.rhs)?))
    }

    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_scalar()?;
        Ok(vec![Value::Scalar(g), Value::Scalar(g)])
    }
}

impl Operator for MatrixSum {
    fn name(&self) -> &'static str {
        "MatrixSum"
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
        ensure_same_shape(a, b, self.name())?;
        Ok(Value::Matrix(a + b))
    }

    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        Ok(vec![Value::Matrix(g.clone()), Value::Matrix(g.clone())])
    }
}

impl Operator for MatrixScalarSum {
    fn name(&self) -> &'static str {
        "MatrixScalarSum"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.matrix, self.scalar]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Matrix
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let s = env.scalar(self.scalar)?;
        Ok(Value::Matrix(env.matrix(self.matrix)?.mapv(|x| x + s)))
    }

    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        // The broadcast scalar receives the sum of every element's gradient.
        Ok(vec![Value::Matrix(g.clone()), Value::Scalar(g.sum())])
    }
}
