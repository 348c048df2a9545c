use crate::autograd::{Environment, NodeId, Operator};
use crate::error::DagradError;
use crate::value::{ensure_same_shape, Value, ValueKind};

#[derive(Debug, Clone)]
pub struct ScalarProduct {
    lhs: NodeId,
    rhs: NodeId,
}

/// Scales every element of `matrix` by `scalar`.
#[derive(Debug, Clone)]
pub struct MatrixScalarProduct {
    scalar: NodeId,
    matrix: NodeId,
}

/// Element-wise (Hadamard) product of two matrices of the same shape.
#[derive(Debug, Clone)]
pub struct MatrixCwiseProduct {
    lhs: NodeId,
    rhs: NodeId,
}

impl ScalarProduct {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        ScalarProduct { lhs, rhs }
    }
}

impl MatrixScalarProduct {
    pub fn new(scalar: NodeId, matrix: NodeId) -> Self {
        MatrixScalarProduct { scalar, matrix }
    }
}

impl MatrixCwiseProduct {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        MatrixCwiseProduct { lhs, rhs }
    }
}

impl Operator for ScalarProduct {
    fn name(&self) -> &'static str {
        "ScalarProduct"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.lhs, self.rhs]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(Value::Scalar(env.scalar(self.lhs)? * env.scalar(self.rhs)?))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_scalar()?;
        let a = env.scalar(self.lhs)?;
        let b = env.scalar(self.rhs)?;
        Ok(vec![Value::Scalar(g * b), Value::Scalar(g * a)])
    }
}

impl Operator for MatrixScalarProduct {
    fn name(&self) -> &'static str {
        "MatrixScalarProduct"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.scalar, self.matrix]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Matrix
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let s = env.scalar(self.scalar)?;
        Ok(Value::Matrix(env.matrix(self.matrix)? * s))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        let s = env.scalar(self.scalar)?;
        let m = env.matrix(self.matrix)?;
        Ok(vec![Value::Scalar((g * m).sum()), Value::Matrix(g * s)])
    }
}

impl Operator for MatrixCwiseProduct {
    fn name(&self) -> &'static str {
        "MatrixCwiseProduct"
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
        Ok(Value::Matrix(a * b))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        let a = env.matrix(self.lhs)?;
        let b = env.matrix(self.rhs)?;
        Ok(vec![Value::Matrix(g * b), Value::Matrix(g * a)])
    }
}
