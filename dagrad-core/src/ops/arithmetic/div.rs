use crate::autograd::{Environment, NodeId, Operator};
use crate::error::DagradError;
use crate::value::{ensure_same_shape, Value, ValueKind};

#[derive(Debug, Clone)]
pub struct ScalarQuotient {
    lhs: NodeId,
    rhs: NodeId,
}

/// Divides every element of `matrix` by `scalar`.
#[derive(Debug, Clone)]
pub struct MatrixScalarQuotient {
    matrix: NodeId,
    scalar: NodeId,
}

/// Element-wise quotient of two matrices of the same shape.
#[derive(Debug, Clone)]
pub struct MatrixCwiseQuotient {
    lhs: NodeId,
    rhs: NodeId,
}

impl ScalarQuotient {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        ScalarQuotient { lhs, rhs }
    }
}

impl MatrixScalarQuotient {
    pub fn new(matrix: NodeId, scalar: NodeId) -> Self {
        MatrixScalarQuotient { matrix, scalar }
    }
}

impl MatrixCwiseQuotient {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        MatrixCwiseQuotient { lhs, rhs }
    }
}

impl Operator for ScalarQuotient {
    fn name(&self) -> &'static str {
        "ScalarQuotient"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.lhs, self.rhs]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(Value::Scalar(env.scalar(self.lhs)? / env.scalar(self.rhs)?))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_scalar()?;
        let a = env.scalar(self.lhs)?;
        let b = env.scalar(self.rhs)?;
        Ok(vec![Value::Scalar(g / b), Value::Scalar(-g * a / (b * b))])
    }
}

impl Operator for MatrixScalarQuotient {
    fn name(&self) -> &'static str {
        "MatrixScalarQuotient"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.matrix, self.scalar]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Matrix
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let s = env.scalar(self.scalar)?;
        Ok(Value::Matrix(env.matrix(self.matrix)? / s))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        let m = env.matrix(self.matrix)?;
        let s = env.scalar(self.scalar)?;
        Ok(vec![
            Value::Matrix(g / s),
            Value::Scalar(-(g * m).sum() / (s * s)),
        ])
    }
}

impl Operator for MatrixCwiseQuotient {
    fn name(&self) -> &'static str {
        "MatrixCwiseQuotient"
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
        Ok(Value::Matrix(a / b))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        let a = env.matrix(self.lhs)?;
        let b = env.matrix(self.rhs)?;
        let grad_a = g / b;
        let grad_b = -(&grad_a * a) / b;
        Ok(vec![Value::Matrix(grad_a), Value::Matrix(grad_b)])
    }
}
